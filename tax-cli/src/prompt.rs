//! Line-oriented prompting for amounts.
//!
//! Generic over the reader and writer so the flow can be driven from tests.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::utils::{ParseAmountError, parse_amount};

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read {label}: {source}")]
    Io {
        label: String,
        #[source]
        source: io::Error,
    },

    #[error("input ended before {0} was entered")]
    Eof(String),

    #[error("invalid {label}: {source}")]
    Amount {
        label: String,
        #[source]
        source: ParseAmountError,
    },
}

/// Writes ` ENTER YOUR <LABEL>:` and reads one line.
///
/// Returns `None` when the input is exhausted.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, " ENTER YOUR {}:", label.to_uppercase())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Prompts for a single amount. There is no retry: the first bad line fails.
pub fn prompt_amount<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Decimal, PromptError> {
    let line = prompt_line(input, output, label)
        .map_err(|source| PromptError::Io {
            label: label.to_string(),
            source,
        })?
        .ok_or_else(|| PromptError::Eof(label.to_string()))?;

    amount_from_str(&line, label)
}

/// Parses an amount supplied outside the prompt (e.g. a command-line flag).
pub fn amount_from_str(
    raw: &str,
    label: &str,
) -> Result<Decimal, PromptError> {
    parse_amount(raw).map_err(|source| PromptError::Amount {
        label: label.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn prompt_amount_reads_one_line() {
        let mut input = Cursor::new("700000\n50000\n");
        let mut output = Vec::new();

        let amount = prompt_amount(&mut input, &mut output, "ctc").unwrap();

        assert_eq!(amount, dec!(700000));
        assert_eq!(String::from_utf8(output).unwrap(), " ENTER YOUR CTC:");
    }

    #[test]
    fn consecutive_prompts_consume_consecutive_lines() {
        let mut input = Cursor::new("700000\n50,000\n");
        let mut output = Vec::new();

        let ctc = prompt_amount(&mut input, &mut output, "CTC").unwrap();
        let bonus = prompt_amount(&mut input, &mut output, "BONUS").unwrap();

        assert_eq!((ctc, bonus), (dec!(700000), dec!(50000)));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            " ENTER YOUR CTC: ENTER YOUR BONUS:"
        );
    }

    #[test]
    fn prompt_amount_fails_on_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let result = prompt_amount(&mut input, &mut output, "CTC");

        assert!(matches!(result, Err(PromptError::Eof(label)) if label == "CTC"));
    }

    #[test]
    fn prompt_amount_fails_on_bad_line() {
        let mut input = Cursor::new("seven lakh\n");
        let mut output = Vec::new();

        let result = prompt_amount(&mut input, &mut output, "CTC");

        assert!(matches!(
            result,
            Err(PromptError::Amount {
                source: ParseAmountError::Invalid { .. },
                ..
            })
        ));
    }

    #[test]
    fn amount_from_str_rejects_empty_flag_value() {
        let result = amount_from_str("", "BONUS");

        assert!(matches!(
            result,
            Err(PromptError::Amount {
                source: ParseAmountError::Empty,
                ..
            })
        ));
    }
}
