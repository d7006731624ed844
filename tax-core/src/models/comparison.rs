use rust_decimal::Decimal;
use serde::Serialize;

use super::TaxResult;

/// Which of two results carries the lower tax, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOutcome {
    FirstCheaper { savings: Decimal },
    SecondCheaper { savings: Decimal },
    Equal,
}

impl ComparisonOutcome {
    /// Difference between the two tax amounts; zero when equal.
    pub fn savings(&self) -> Decimal {
        match self {
            Self::FirstCheaper { savings } | Self::SecondCheaper { savings } => *savings,
            Self::Equal => Decimal::ZERO,
        }
    }

    /// Picks the cheaper of the two results this outcome was computed from.
    pub fn cheaper<'r>(
        &self,
        first: &'r TaxResult,
        second: &'r TaxResult,
    ) -> Option<&'r TaxResult> {
        match self {
            Self::FirstCheaper { .. } => Some(first),
            Self::SecondCheaper { .. } => Some(second),
            Self::Equal => None,
        }
    }
}

/// Two regimes evaluated for the same income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeComparison {
    pub first: TaxResult,
    pub second: TaxResult,
    pub outcome: ComparisonOutcome,
}

impl RegimeComparison {
    pub fn cheaper(&self) -> Option<&TaxResult> {
        self.outcome.cheaper(&self.first, &self.second)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn result(
        regime: &str,
        tax: Decimal,
    ) -> TaxResult {
        let slice = crate::models::BracketSlice {
            lower: dec!(0),
            upper: None,
            tax_rate: dec!(0.10),
            amount: tax * dec!(10),
            tax,
        };
        TaxResult::new(tax * dec!(10), regime, dec!(0), tax * dec!(10), vec![slice])
    }

    #[test]
    fn savings_reports_difference() {
        let outcome = ComparisonOutcome::SecondCheaper {
            savings: dec!(22500),
        };

        assert_eq!(outcome.savings(), dec!(22500));
        assert_eq!(ComparisonOutcome::Equal.savings(), Decimal::ZERO);
    }

    #[test]
    fn cheaper_selects_matching_result() {
        let old = result("old", dec!(52500));
        let new = result("new", dec!(67500));
        let outcome = ComparisonOutcome::FirstCheaper {
            savings: dec!(15000),
        };

        assert_eq!(outcome.cheaper(&old, &new).map(TaxResult::regime), Some("old"));
        assert_eq!(ComparisonOutcome::Equal.cheaper(&old, &new), None);
    }
}
