use thiserror::Error;

use crate::calculations::EvaluationError;
use crate::models::ScheduleError;

/// Any failure surfaced by the calculator: bad input or bad configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] EvaluationError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ScheduleError),
}
