use rust_decimal::Decimal;
use serde::Serialize;

/// The part of taxable income that fell inside one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketSlice {
    /// Exclusive lower edge of the bracket.
    pub lower: Decimal,
    /// Inclusive upper edge, `None` for the unbounded bracket.
    pub upper: Option<Decimal>,
    pub tax_rate: Decimal,
    /// Taxable income that fell inside the bracket.
    pub amount: Decimal,
    /// `amount * tax_rate`, unrounded.
    pub tax: Decimal,
}

/// Outcome of evaluating one income against one named schedule.
///
/// Built by [`TaxCalculator`](crate::calculations::TaxCalculator) and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    total_income: Decimal,
    regime: String,
    deduction: Decimal,
    taxable_income: Decimal,
    tax_due: Decimal,
    breakdown: Vec<BracketSlice>,
}

impl TaxResult {
    pub fn new(
        total_income: Decimal,
        regime: impl Into<String>,
        deduction: Decimal,
        taxable_income: Decimal,
        breakdown: Vec<BracketSlice>,
    ) -> Self {
        let tax_due = breakdown.iter().map(|slice| slice.tax).sum();
        Self {
            total_income,
            regime: regime.into(),
            deduction,
            taxable_income,
            tax_due,
            breakdown,
        }
    }

    pub fn total_income(&self) -> Decimal {
        self.total_income
    }

    pub fn regime(&self) -> &str {
        &self.regime
    }

    pub fn deduction(&self) -> Decimal {
        self.deduction
    }

    pub fn taxable_income(&self) -> Decimal {
        self.taxable_income
    }

    /// Exact tax owed. Round only for display.
    pub fn tax_due(&self) -> Decimal {
        self.tax_due
    }

    pub fn breakdown(&self) -> &[BracketSlice] {
        &self.breakdown
    }
}
