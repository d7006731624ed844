mod bracket_schedule;
mod comparison;
mod tax_bracket;
mod tax_result;

pub use bracket_schedule::{BracketSchedule, ScheduleError};
pub use comparison::{ComparisonOutcome, RegimeComparison};
pub use tax_bracket::TaxBracket;
pub use tax_result::{BracketSlice, TaxResult};
