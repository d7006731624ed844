//! Progressive (marginal) tax evaluation over a [`BracketSchedule`].
//!
//! Each slice of taxable income is taxed at the rate of the bracket it falls
//! into; the whole income is never taxed at the top rate.
//!
//! # Algorithm
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Reject negative income or deduction |
//! | 2    | Taxable income = max(0, income - deduction) |
//! | 3    | Walk brackets upwards from a lower edge of 0 |
//! | 4    | Slice = min(taxable, bracket bound) - lower edge, taxed at the bracket rate |
//! | 5    | Stop once the taxable income is used up or the unbounded bracket is reached |
//! | 6    | Tax due = sum of slice taxes (unrounded) |
//!
//! An income exactly on a bound is taxed entirely within the lower bracket.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::evaluate;
//! use tax_core::schedules::builtin;
//!
//! let old = builtin::old_regime().unwrap();
//!
//! // 750000 - 50000 = 700000 taxable
//! // 250000 * 5% + 200000 * 20% = 12500 + 40000
//! let tax = evaluate(dec!(750000), &old, dec!(50000)).unwrap();
//! assert_eq!(tax, dec!(52500));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;
use tracing::{debug, trace};

use crate::calculations::common::floor_at_zero;
use crate::models::{BracketSchedule, BracketSlice};

/// Invalid input handed to the evaluator or comparator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    /// Carries the rendered float (`NaN`, `inf`, ...).
    #[error("income must be a finite number, got {0}")]
    NonFiniteIncome(String),

    #[error("deduction must be non-negative, got {0}")]
    NegativeDeduction(Decimal),

    #[error("amount exceeds the supported range")]
    Overflow,

    /// A comparison operand was absent. Holds `"first"` or `"second"`.
    #[error("missing {0} result for comparison")]
    MissingResult(&'static str),
}

/// Converts a float income into money, rejecting NaN, infinities, negatives
/// and values beyond the decimal range.
pub fn income_from_f64(value: f64) -> Result<Decimal, EvaluationError> {
    if !value.is_finite() {
        return Err(EvaluationError::NonFiniteIncome(value.to_string()));
    }
    let income = Decimal::from_f64(value).ok_or(EvaluationError::Overflow)?;
    if income < Decimal::ZERO {
        return Err(EvaluationError::NegativeIncome(income));
    }
    Ok(income)
}

/// Evaluates `income` against `schedule` after subtracting `deduction`.
///
/// Shorthand for [`BracketEvaluator::evaluate`].
pub fn evaluate(
    income: Decimal,
    schedule: &BracketSchedule,
    deduction: Decimal,
) -> Result<Decimal, EvaluationError> {
    BracketEvaluator::new(schedule).evaluate(income, deduction)
}

/// Per-bracket contributions for `income`; their taxes sum to [`evaluate`].
pub fn evaluate_breakdown(
    income: Decimal,
    schedule: &BracketSchedule,
    deduction: Decimal,
) -> Result<Vec<BracketSlice>, EvaluationError> {
    BracketEvaluator::new(schedule).breakdown(income, deduction)
}

/// Evaluator bound to one schedule.
#[derive(Debug, Clone, Copy)]
pub struct BracketEvaluator<'a> {
    schedule: &'a BracketSchedule,
}

impl<'a> BracketEvaluator<'a> {
    pub fn new(schedule: &'a BracketSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'a BracketSchedule {
        self.schedule
    }

    /// Total tax owed, unrounded.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] if income or deduction is negative, or if
    /// a slice overflows the decimal range.
    pub fn evaluate(
        &self,
        income: Decimal,
        deduction: Decimal,
    ) -> Result<Decimal, EvaluationError> {
        let tax: Decimal = self
            .breakdown(income, deduction)?
            .iter()
            .map(|slice| slice.tax)
            .sum();

        debug!(
            schedule = self.schedule.name(),
            %income,
            %deduction,
            %tax,
            "evaluated tax"
        );

        Ok(tax)
    }

    /// Slices of taxable income, lowest bracket first.
    ///
    /// Brackets that receive no income are omitted.
    pub fn breakdown(
        &self,
        income: Decimal,
        deduction: Decimal,
    ) -> Result<Vec<BracketSlice>, EvaluationError> {
        if income < Decimal::ZERO {
            return Err(EvaluationError::NegativeIncome(income));
        }
        if deduction < Decimal::ZERO {
            return Err(EvaluationError::NegativeDeduction(deduction));
        }

        self.slices(self.taxable_income(income, deduction))
    }

    /// Income left after the deduction, floored at zero.
    pub fn taxable_income(
        &self,
        income: Decimal,
        deduction: Decimal,
    ) -> Decimal {
        floor_at_zero(income - deduction)
    }

    fn slices(
        &self,
        taxable: Decimal,
    ) -> Result<Vec<BracketSlice>, EvaluationError> {
        let mut slices = Vec::new();

        for (lower, bracket) in self.schedule.bands() {
            if taxable <= lower {
                break;
            }

            let upper = bracket.max_income.map_or(taxable, |max| max.min(taxable));
            let amount = upper - lower;
            let tax = amount
                .checked_mul(bracket.tax_rate)
                .ok_or(EvaluationError::Overflow)?;

            trace!(%lower, %amount, rate = %bracket.tax_rate, %tax, "bracket slice");

            slices.push(BracketSlice {
                lower,
                upper: bracket.max_income,
                tax_rate: bracket.tax_rate,
                amount,
                tax,
            });
        }

        Ok(slices)
    }
}
