//! Regime-level calculations: look a schedule up by name, apply its standard
//! deduction and evaluate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxCalculator;
//! use tax_core::{ComparisonOutcome, ScheduleRegistry};
//!
//! let registry = ScheduleRegistry::builtin().unwrap();
//! let calculator = TaxCalculator::new(&registry);
//!
//! let comparison = calculator
//!     .compare_regimes(dec!(750000), "old", "new")
//!     .unwrap();
//!
//! assert_eq!(comparison.first.tax_due(), dec!(52500));
//! assert_eq!(comparison.second.tax_due(), dec!(30000));
//! assert_eq!(
//!     comparison.outcome,
//!     ComparisonOutcome::SecondCheaper { savings: dec!(22500) }
//! );
//! ```

use rust_decimal::Decimal;
use tracing::info;

use crate::TaxError;
use crate::calculations::{BracketEvaluator, compare};
use crate::models::{RegimeComparison, TaxResult};
use crate::schedules::ScheduleRegistry;

/// Calculator over the schedules of a [`ScheduleRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    registry: &'a ScheduleRegistry,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(registry: &'a ScheduleRegistry) -> Self {
        Self { registry }
    }

    /// Tax owed on `income` under the named regime.
    ///
    /// # Errors
    ///
    /// * [`TaxError::Configuration`] if the regime is not registered.
    /// * [`TaxError::InvalidInput`] if the income is negative.
    pub fn calculate(
        &self,
        income: Decimal,
        regime: &str,
    ) -> Result<TaxResult, TaxError> {
        let schedule = self.registry.get(regime)?;
        let evaluator = BracketEvaluator::new(schedule);
        let deduction = schedule.standard_deduction();

        let breakdown = evaluator.breakdown(income, deduction)?;
        let taxable_income = evaluator.taxable_income(income, deduction);

        Ok(TaxResult::new(
            income,
            schedule.name(),
            deduction,
            taxable_income,
            breakdown,
        ))
    }

    /// Evaluates both regimes for the same income and ranks them.
    pub fn compare_regimes(
        &self,
        income: Decimal,
        first: &str,
        second: &str,
    ) -> Result<RegimeComparison, TaxError> {
        let first = self.calculate(income, first)?;
        let second = self.calculate(income, second)?;
        let outcome = compare(&first, &second);

        info!(
            %income,
            first = first.regime(),
            second = second.regime(),
            ?outcome,
            "compared regimes"
        );

        Ok(RegimeComparison {
            first,
            second,
            outcome,
        })
    }
}
