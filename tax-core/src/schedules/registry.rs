use std::collections::HashMap;

use tracing::debug;

use super::builtin;
use crate::models::{BracketSchedule, ScheduleError};

/// Named bracket schedules, keyed by lowercase name.
///
/// Typical lifetime:
/// 1. Start from [`ScheduleRegistry::builtin`] (or an empty registry).
/// 2. Call `register` for any schedules loaded from configuration.
/// 3. Look schedules up with `get`; nothing is mutated after start-up.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    schedules: HashMap<String, BracketSchedule>,
}

impl ScheduleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the `old` and `new` regimes.
    pub fn builtin() -> Result<Self, ScheduleError> {
        let mut registry = Self::new();
        for schedule in builtin::all()? {
            registry.register(schedule);
        }
        Ok(registry)
    }

    /// Add a schedule, replacing any existing one with the same name.
    ///
    /// Returns `true` when a schedule was replaced.
    pub fn register(
        &mut self,
        schedule: BracketSchedule,
    ) -> bool {
        let name = schedule.name().to_string();
        let replaced = self.schedules.insert(name.clone(), schedule).is_some();
        debug!(schedule = %name, replaced, "registered bracket schedule");
        replaced
    }

    /// Look up a schedule by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownSchedule`] listing the registered names.
    pub fn get(
        &self,
        name: &str,
    ) -> Result<&BracketSchedule, ScheduleError> {
        let key = name.trim().to_lowercase();
        self.schedules
            .get(&key)
            .ok_or_else(|| ScheduleError::UnknownSchedule {
                name: name.to_string(),
                available: self.available_schedules(),
            })
    }

    /// Names of every registered schedule, sorted alphabetically.
    pub fn available_schedules(&self) -> Vec<String> {
        let mut names: Vec<_> = self.schedules.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
