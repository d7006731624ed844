use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::TaxBracket;

/// Errors raised while defining or looking up a bracket schedule.
///
/// These are configuration failures: they are reported when a schedule is
/// built, never while a tax amount is being evaluated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule name must not be empty")]
    EmptyName,

    #[error("schedule '{0}' has no brackets")]
    NoBrackets(String),

    /// Bounds must be strictly increasing, starting above zero.
    #[error(
        "schedule '{schedule}': bracket {index} bound {bound} must be greater than {previous}"
    )]
    NonIncreasingBound {
        schedule: String,
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("schedule '{schedule}': bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { schedule: String, index: usize },

    #[error("schedule '{0}': the last bracket must be unbounded")]
    BoundedFinalBracket(String),

    #[error("schedule '{schedule}': bracket {index} rate {rate} must be in [0, 1)")]
    RateOutOfRange {
        schedule: String,
        index: usize,
        rate: Decimal,
    },

    #[error("schedule '{schedule}': standard deduction {amount} must be non-negative")]
    NegativeDeduction { schedule: String, amount: Decimal },

    #[error("unknown schedule '{name}'; available: {available:?}")]
    UnknownSchedule {
        name: String,
        available: Vec<String>,
    },
}

/// A named, ordered and validated set of marginal-rate brackets.
///
/// Once built a schedule cannot be changed; all fields are private and only
/// exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSchedule {
    name: String,
    standard_deduction: Decimal,
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates and builds a schedule.
    ///
    /// The name is trimmed and lowercased so lookups are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the name is blank, the bracket list is
    /// empty, bounds are not strictly increasing, only the last bracket is
    /// not unbounded, a rate lies outside `[0, 1)` or the deduction is
    /// negative. Rates are not required to increase.
    pub fn new(
        name: &str,
        standard_deduction: Decimal,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, ScheduleError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(ScheduleError::EmptyName);
        }
        if brackets.is_empty() {
            return Err(ScheduleError::NoBrackets(name));
        }
        if standard_deduction < Decimal::ZERO {
            return Err(ScheduleError::NegativeDeduction {
                schedule: name,
                amount: standard_deduction,
            });
        }

        let last = brackets.len() - 1;
        let mut previous = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate >= Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange {
                    schedule: name,
                    index,
                    rate: bracket.tax_rate,
                });
            }

            match bracket.max_income {
                Some(_) if index == last => {
                    return Err(ScheduleError::BoundedFinalBracket(name));
                }
                Some(bound) if bound <= previous => {
                    return Err(ScheduleError::NonIncreasingBound {
                        schedule: name,
                        index,
                        bound,
                        previous,
                    });
                }
                Some(bound) => previous = bound,
                None if index != last => {
                    return Err(ScheduleError::UnboundedBeforeEnd {
                        schedule: name,
                        index,
                    });
                }
                None => {}
            }
        }

        Ok(Self {
            name,
            standard_deduction,
            brackets,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount subtracted from income before the brackets are applied.
    pub fn standard_deduction(&self) -> Decimal {
        self.standard_deduction
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Iterates `(lower, bracket)` pairs, where `lower` is the exclusive
    /// lower edge of each bracket.
    pub fn bands(&self) -> impl Iterator<Item = (Decimal, &TaxBracket)> {
        let lowers = std::iter::once(Decimal::ZERO).chain(
            self.brackets
                .iter()
                .filter_map(|bracket| bracket.max_income),
        );
        lowers.zip(self.brackets.iter())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn three_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::capped(dec!(1000), dec!(0)),
            TaxBracket::capped(dec!(5000), dec!(0.10)),
            TaxBracket::unbounded(dec!(0.20)),
        ]
    }

    #[test]
    fn new_accepts_well_formed_schedule() {
        let schedule = BracketSchedule::new("Basic", dec!(100), three_brackets()).unwrap();

        assert_eq!(schedule.name(), "basic");
        assert_eq!(schedule.standard_deduction(), dec!(100));
        assert_eq!(schedule.brackets().len(), 3);
    }

    #[test]
    fn new_trims_name() {
        let schedule = BracketSchedule::new("  OLD ", dec!(0), three_brackets()).unwrap();

        assert_eq!(schedule.name(), "old");
    }

    #[test]
    fn new_accepts_single_unbounded_bracket() {
        let schedule =
            BracketSchedule::new("flat", dec!(0), vec![TaxBracket::unbounded(dec!(0.15))]);

        assert!(schedule.is_ok());
    }

    #[test]
    fn new_accepts_decreasing_rates() {
        let brackets = vec![
            TaxBracket::capped(dec!(1000), dec!(0.20)),
            TaxBracket::unbounded(dec!(0.10)),
        ];

        assert!(BracketSchedule::new("regressive", dec!(0), brackets).is_ok());
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = BracketSchedule::new("   ", dec!(0), three_brackets());

        assert_eq!(result, Err(ScheduleError::EmptyName));
    }

    #[test]
    fn new_rejects_empty_brackets() {
        let result = BracketSchedule::new("empty", dec!(0), vec![]);

        assert_eq!(result, Err(ScheduleError::NoBrackets("empty".to_string())));
    }

    #[test]
    fn new_rejects_non_increasing_bounds() {
        let brackets = vec![
            TaxBracket::capped(dec!(5000), dec!(0)),
            TaxBracket::capped(dec!(5000), dec!(0.10)),
            TaxBracket::unbounded(dec!(0.20)),
        ];

        let result = BracketSchedule::new("bad", dec!(0), brackets);

        assert_eq!(
            result,
            Err(ScheduleError::NonIncreasingBound {
                schedule: "bad".to_string(),
                index: 1,
                bound: dec!(5000),
                previous: dec!(5000),
            })
        );
    }

    #[test]
    fn new_rejects_zero_first_bound() {
        let brackets = vec![
            TaxBracket::capped(dec!(0), dec!(0)),
            TaxBracket::unbounded(dec!(0.20)),
        ];

        let result = BracketSchedule::new("bad", dec!(0), brackets);

        assert!(matches!(
            result,
            Err(ScheduleError::NonIncreasingBound { index: 0, .. })
        ));
    }

    #[test]
    fn new_rejects_unbounded_bracket_before_end() {
        let brackets = vec![
            TaxBracket::unbounded(dec!(0.10)),
            TaxBracket::unbounded(dec!(0.20)),
        ];

        let result = BracketSchedule::new("bad", dec!(0), brackets);

        assert_eq!(
            result,
            Err(ScheduleError::UnboundedBeforeEnd {
                schedule: "bad".to_string(),
                index: 0,
            })
        );
    }

    #[test]
    fn new_rejects_bounded_final_bracket() {
        let brackets = vec![
            TaxBracket::capped(dec!(1000), dec!(0)),
            TaxBracket::capped(dec!(2000), dec!(0.10)),
        ];

        let result = BracketSchedule::new("bad", dec!(0), brackets);

        assert_eq!(
            result,
            Err(ScheduleError::BoundedFinalBracket("bad".to_string()))
        );
    }

    #[test]
    fn new_rejects_negative_rate() {
        let brackets = vec![
            TaxBracket::capped(dec!(1000), dec!(-0.01)),
            TaxBracket::unbounded(dec!(0.20)),
        ];

        let result = BracketSchedule::new("bad", dec!(0), brackets);

        assert_eq!(
            result,
            Err(ScheduleError::RateOutOfRange {
                schedule: "bad".to_string(),
                index: 0,
                rate: dec!(-0.01),
            })
        );
    }

    #[test]
    fn new_rejects_rate_of_one() {
        let result =
            BracketSchedule::new("bad", dec!(0), vec![TaxBracket::unbounded(dec!(1))]);

        assert!(matches!(
            result,
            Err(ScheduleError::RateOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn new_rejects_negative_deduction() {
        let result = BracketSchedule::new("bad", dec!(-1), three_brackets());

        assert_eq!(
            result,
            Err(ScheduleError::NegativeDeduction {
                schedule: "bad".to_string(),
                amount: dec!(-1),
            })
        );
    }

    #[test]
    fn bands_pair_each_bracket_with_its_lower_edge() {
        let schedule = BracketSchedule::new("basic", dec!(0), three_brackets()).unwrap();

        let lowers: Vec<Decimal> = schedule.bands().map(|(lower, _)| lower).collect();

        assert_eq!(lowers, vec![dec!(0), dec!(1000), dec!(5000)]);
    }
}
