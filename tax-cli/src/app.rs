use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::calculations::{EvaluationError, TaxCalculator};
use tax_core::{RegimeComparison, ScheduleRegistry};
use tax_data::ScheduleLoader;
use tracing::{debug, info};

use crate::prompt::{PromptError, amount_from_str, prompt_amount};
use crate::report::{TITLE, TaxReport};
use crate::settings::{Settings, SettingsError};

/// Message shown when either amount cannot be used.
pub const INVALID_INPUT_MESSAGE: &str =
    "Invalid input. Please enter numeric values for CTC and Bonus.";

/// Values given on the command line. Each one, when present, beats the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ctc: Option<String>,
    pub bonus: Option<String>,
    pub regimes: Vec<String>,
    pub schedules_file: Option<PathBuf>,
    pub breakdown: bool,
}

/// Everything a run needs once settings and flags are merged.
#[derive(Debug)]
pub struct AppConfig {
    pub ctc: Option<String>,
    pub bonus: Option<String>,
    pub first_regime: String,
    pub second_regime: String,
    pub currency: String,
    pub breakdown: bool,
    pub registry: ScheduleRegistry,
}

impl AppConfig {
    /// Merges `overrides` over `settings` and builds the schedule registry.
    pub fn resolve(
        settings: Settings,
        overrides: Overrides,
    ) -> Result<Self> {
        let regimes = if overrides.regimes.is_empty() {
            settings.regimes
        } else {
            overrides.regimes
        };
        let (first_regime, second_regime) = match <[String; 2]>::try_from(regimes) {
            Ok([first, second]) => (first, second),
            Err(regimes) => {
                return Err(anyhow::Error::new(SettingsError::RegimeCount(regimes.len()))
                    .context("Failed to choose regimes to compare"));
            }
        };

        let schedules_file = overrides.schedules_file.or(settings.schedules_file);
        let registry = build_registry(schedules_file.as_deref())?;

        // Fail before prompting if a regime name is wrong.
        for regime in [&first_regime, &second_regime] {
            registry.get(regime)?;
        }

        Ok(Self {
            ctc: overrides.ctc,
            bonus: overrides.bonus,
            first_regime,
            second_regime,
            currency: settings.currency,
            breakdown: overrides.breakdown,
            registry,
        })
    }
}

/// Built-in schedules, plus any defined in `schedules_file`.
///
/// Schedules from the file replace built-ins of the same name.
pub fn build_registry(schedules_file: Option<&Path>) -> Result<ScheduleRegistry> {
    let mut registry =
        ScheduleRegistry::builtin().context("Built-in schedules failed validation")?;

    if let Some(path) = schedules_file {
        let schedules = ScheduleLoader::load_from_path(path)
            .with_context(|| format!("Failed to load schedules: {}", path.display()))?;
        let count = schedules.len();
        for schedule in schedules {
            registry.register(schedule);
        }
        info!(path = %path.display(), count, "loaded schedules from file");
    }

    debug!(schedules = ?registry.available_schedules(), "schedule registry ready");
    Ok(registry)
}

/// Sum of CTC and bonus.
pub fn total_income(
    ctc: Decimal,
    bonus: Decimal,
) -> Result<Decimal, EvaluationError> {
    ctc.checked_add(bonus).ok_or(EvaluationError::Overflow)
}

fn read_amount<R: BufRead, W: Write>(
    given: Option<&str>,
    label: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Decimal, PromptError> {
    match given {
        Some(raw) => amount_from_str(raw, label),
        None => prompt_amount(input, output, label),
    }
}

/// Runs one calculation: collect the amounts, compare, print the report.
///
/// Amounts missing from `config` are prompted for on `input`. The first
/// invalid amount aborts the run with [`INVALID_INPUT_MESSAGE`].
pub fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<RegimeComparison> {
    writeln!(output, "{TITLE}")?;

    let ctc = read_amount(config.ctc.as_deref(), "CTC", input, output)
        .context(INVALID_INPUT_MESSAGE)?;
    let bonus = read_amount(config.bonus.as_deref(), "BONUS", input, output)
        .context(INVALID_INPUT_MESSAGE)?;
    let income = total_income(ctc, bonus).context(INVALID_INPUT_MESSAGE)?;
    debug!(%ctc, %bonus, %income, "collected amounts");

    let comparison = TaxCalculator::new(&config.registry)
        .compare_regimes(income, &config.first_regime, &config.second_regime)
        .context("Failed to calculate tax")?;

    // Prompts leave the cursor mid-line when input is not echoed.
    if config.ctc.is_none() || config.bonus.is_none() {
        writeln!(output)?;
    }
    let report = TaxReport::new(&comparison, &config.currency).with_breakdown(config.breakdown);
    write!(output, "{report}")?;
    output.flush()?;

    Ok(comparison)
}
