//! Loading bracket schedules from CSV files.

mod loader;

pub use loader::{BracketRecord, ScheduleLoader, ScheduleLoaderError};
