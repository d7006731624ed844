//! Tax calculations over named bracket schedules.
//!
//! [`evaluator`] holds the marginal-rate walk, [`comparator`] ranks two
//! results, and [`calculator`] ties both to a
//! [`ScheduleRegistry`](crate::schedules::ScheduleRegistry).

pub mod calculator;
pub mod common;
pub mod comparator;
pub mod evaluator;

pub use calculator::TaxCalculator;
pub use comparator::{compare, try_compare};
pub use evaluator::{
    BracketEvaluator, EvaluationError, evaluate, evaluate_breakdown, income_from_f64,
};
