use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate band of a [`BracketSchedule`](super::BracketSchedule).
///
/// The band's lower edge is implied by the previous bracket's `max_income`
/// (zero for the first bracket). `max_income` is the inclusive upper edge;
/// `None` marks the final, unbounded bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// A bracket that ends at `max_income` (inclusive).
    pub fn capped(
        max_income: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            max_income: Some(max_income),
            tax_rate,
        }
    }

    /// The open-ended top bracket.
    pub fn unbounded(tax_rate: Decimal) -> Self {
        Self {
            max_income: None,
            tax_rate,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }
}
