//! Side-by-side comparison of two tax results.

use std::cmp::Ordering;

use crate::calculations::EvaluationError;
use crate::models::{ComparisonOutcome, TaxResult};

/// Reports which result owes less tax and the difference.
///
/// Strict: identical `tax_due` values compare as [`ComparisonOutcome::Equal`].
pub fn compare(
    first: &TaxResult,
    second: &TaxResult,
) -> ComparisonOutcome {
    let (a, b) = (first.tax_due(), second.tax_due());
    match a.cmp(&b) {
        Ordering::Less => ComparisonOutcome::FirstCheaper { savings: b - a },
        Ordering::Greater => ComparisonOutcome::SecondCheaper { savings: a - b },
        Ordering::Equal => ComparisonOutcome::Equal,
    }
}

/// [`compare`] for operands that may be absent.
///
/// # Errors
///
/// [`EvaluationError::MissingResult`] naming the first absent operand.
pub fn try_compare(
    first: Option<&TaxResult>,
    second: Option<&TaxResult>,
) -> Result<ComparisonOutcome, EvaluationError> {
    let first = first.ok_or(EvaluationError::MissingResult("first"))?;
    let second = second.ok_or(EvaluationError::MissingResult("second"))?;
    Ok(compare(first, second))
}
