//! Console rendering of a regime comparison.

use std::fmt;

use tax_core::{BracketSlice, ComparisonOutcome, RegimeComparison, TaxResult};

use crate::utils::{format_amount, format_rate};

/// Banner printed before the prompts.
pub const TITLE: &str = "TAX CALCULATOR";

/// Formats a [`RegimeComparison`] the way `tax-calc` prints it.
///
/// Amounts are rounded to whole units here and nowhere else.
#[derive(Debug, Clone, Copy)]
pub struct TaxReport<'a> {
    comparison: &'a RegimeComparison,
    currency: &'a str,
    breakdown: bool,
}

impl<'a> TaxReport<'a> {
    pub fn new(
        comparison: &'a RegimeComparison,
        currency: &'a str,
    ) -> Self {
        Self {
            comparison,
            currency,
            breakdown: false,
        }
    }

    /// Also list each regime's bracket slices under its tax line.
    pub fn with_breakdown(
        mut self,
        breakdown: bool,
    ) -> Self {
        self.breakdown = breakdown;
        self
    }

    fn write_regime(
        &self,
        f: &mut fmt::Formatter<'_>,
        result: &TaxResult,
    ) -> fmt::Result {
        writeln!(
            f,
            " {} REGIME TAX: {}",
            result.regime().to_uppercase(),
            format_amount(self.currency, result.tax_due())
        )?;

        if self.breakdown {
            if !result.deduction().is_zero() {
                writeln!(
                    f,
                    "   standard deduction: {}",
                    format_amount(self.currency, result.deduction())
                )?;
            }
            for slice in result.breakdown() {
                writeln!(f, "   {}", self.describe_slice(slice))?;
            }
        }
        Ok(())
    }

    fn describe_slice(
        &self,
        slice: &BracketSlice,
    ) -> String {
        let range = match slice.upper {
            Some(upper) => format!("{} - {}", slice.lower, upper),
            None => format!("above {}", slice.lower),
        };
        format!(
            "{range} @ {}: {}",
            format_rate(slice.tax_rate),
            format_amount(self.currency, slice.tax)
        )
    }
}

impl fmt::Display for TaxReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let RegimeComparison {
            first,
            second,
            outcome,
        } = self.comparison;

        writeln!(
            f,
            " TOTAL INCOME: {}",
            format_amount(self.currency, first.total_income())
        )?;
        self.write_regime(f, first)?;
        self.write_regime(f, second)?;

        match outcome.cheaper(first, second) {
            Some(cheaper) => writeln!(
                f,
                " YOU SAVE {} MORE USING THE {} REGIME",
                format_amount(self.currency, outcome.savings()),
                cheaper.regime().to_uppercase()
            ),
            None => {
                debug_assert_eq!(*outcome, ComparisonOutcome::Equal);
                writeln!(f, " TAX IS THE SAME UNDER BOTH REGIMES")
            }
        }
    }
}
