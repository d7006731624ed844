//! Named bracket schedules and their lookup table.

pub mod builtin;
pub mod registry;

pub use builtin::{NEW_REGIME, OLD_REGIME};
pub use registry::ScheduleRegistry;
