//! The two schedules available without any configuration.
//!
//! | Regime | Standard deduction | Brackets (upper bound @ rate) |
//! |--------|--------------------|-------------------------------|
//! | `old`  | 50,000 | 2,50,000 @ 0%, 5,00,000 @ 5%, 10,00,000 @ 20%, above @ 30% |
//! | `new`  | 0 | 3,00,000 @ 0%, 6,00,000 @ 5%, 9,00,000 @ 10%, 12,00,000 @ 15%, 15,00,000 @ 20%, above @ 30% |

use rust_decimal::Decimal;

use crate::models::{BracketSchedule, ScheduleError, TaxBracket};

pub const OLD_REGIME: &str = "old";
pub const NEW_REGIME: &str = "new";

fn percent(rate: i64) -> Decimal {
    Decimal::new(rate, 2)
}

/// Old regime: flat 50,000 standard deduction, four brackets.
pub fn old_regime() -> Result<BracketSchedule, ScheduleError> {
    BracketSchedule::new(
        OLD_REGIME,
        Decimal::from(50_000),
        vec![
            TaxBracket::capped(Decimal::from(250_000), percent(0)),
            TaxBracket::capped(Decimal::from(500_000), percent(5)),
            TaxBracket::capped(Decimal::from(1_000_000), percent(20)),
            TaxBracket::unbounded(percent(30)),
        ],
    )
}

/// New regime: no deduction, six brackets.
pub fn new_regime() -> Result<BracketSchedule, ScheduleError> {
    BracketSchedule::new(
        NEW_REGIME,
        Decimal::ZERO,
        vec![
            TaxBracket::capped(Decimal::from(300_000), percent(0)),
            TaxBracket::capped(Decimal::from(600_000), percent(5)),
            TaxBracket::capped(Decimal::from(900_000), percent(10)),
            TaxBracket::capped(Decimal::from(1_200_000), percent(15)),
            TaxBracket::capped(Decimal::from(1_500_000), percent(20)),
            TaxBracket::unbounded(percent(30)),
        ],
    )
}

/// Both built-in schedules, old first.
pub fn all() -> Result<Vec<BracketSchedule>, ScheduleError> {
    Ok(vec![old_regime()?, new_regime()?])
}
