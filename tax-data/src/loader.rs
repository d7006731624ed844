use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketSchedule, ScheduleError, ScheduleRegistry, TaxBracket};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading bracket schedules.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schedule '{schedule}' has conflicting standard deductions {first} and {second}")]
    ConflictingDeduction {
        schedule: String,
        first: Decimal,
        second: Decimal,
    },

    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a schedules CSV file.
///
/// - `schedule`: name of the schedule the bracket belongs to (e.g. `old`)
/// - `max_income`: inclusive upper bound (empty for the unbounded bracket)
/// - `rate`: marginal rate as a decimal (e.g. 0.05 for 5%)
/// - `standard_deduction`: optional; may appear on any row of the schedule
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub schedule: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub standard_deduction: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Rows of one schedule collected before validation.
#[derive(Debug)]
struct PendingSchedule {
    name: String,
    standard_deduction: Option<Decimal>,
    brackets: Vec<TaxBracket>,
}

impl PendingSchedule {
    fn add(
        &mut self,
        record: &BracketRecord,
    ) -> Result<(), ScheduleLoaderError> {
        if let Some(amount) = record.standard_deduction {
            match self.standard_deduction {
                Some(existing) if existing != amount => {
                    return Err(ScheduleLoaderError::ConflictingDeduction {
                        schedule: self.name.clone(),
                        first: existing,
                        second: amount,
                    });
                }
                _ => self.standard_deduction = Some(amount),
            }
        }

        self.brackets.push(TaxBracket {
            max_income: record.max_income,
            tax_rate: record.rate,
        });
        Ok(())
    }

    fn finish(self) -> Result<BracketSchedule, ScheduleError> {
        BracketSchedule::new(
            &self.name,
            self.standard_deduction.unwrap_or(Decimal::ZERO),
            self.brackets,
        )
    }
}

/// Loader for bracket schedules stored as CSV.
///
/// Rows are grouped by schedule name (case-insensitive) in order of first
/// appearance; brackets keep their file order, which must be ascending.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize()
            .collect::<Result<Vec<BracketRecord>, _>>()?;

        debug!(count = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Group records into validated schedules.
    ///
    /// # Errors
    ///
    /// * [`ScheduleLoaderError::ConflictingDeduction`] if one schedule lists
    ///   two different standard deductions.
    /// * [`ScheduleLoaderError::Schedule`] if a grouped schedule is malformed.
    pub fn build(records: &[BracketRecord]) -> Result<Vec<BracketSchedule>, ScheduleLoaderError> {
        let mut order: HashMap<String, usize> = HashMap::new();
        let mut pending: Vec<PendingSchedule> = Vec::new();

        for record in records {
            let key = record.schedule.trim().to_lowercase();
            let index = *order.entry(key).or_insert_with(|| {
                pending.push(PendingSchedule {
                    name: record.schedule.clone(),
                    standard_deduction: None,
                    brackets: Vec::new(),
                });
                pending.len() - 1
            });
            pending[index].add(record)?;
        }

        pending
            .into_iter()
            .map(|schedule| schedule.finish().map_err(ScheduleLoaderError::from))
            .collect()
    }

    /// Build schedules from `records` and register them.
    ///
    /// Schedules sharing a name with an existing entry replace it. Returns
    /// the number of schedules registered.
    pub fn load(
        registry: &mut ScheduleRegistry,
        records: &[BracketRecord],
    ) -> Result<usize, ScheduleLoaderError> {
        let schedules = Self::build(records)?;
        let count = schedules.len();

        for schedule in schedules {
            let name = schedule.name().to_string();
            if registry.register(schedule) {
                info!(schedule = %name, "replaced schedule from CSV");
            }
        }

        Ok(count)
    }

    /// Convenience wrapper: open a CSV file, parse it and build its schedules.
    pub fn load_from_path(path: &Path) -> Result<Vec<BracketSchedule>, ScheduleLoaderError> {
        let file = File::open(path).map_err(|source| ScheduleLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::parse(file)?;
        Self::build(&records)
    }
}
