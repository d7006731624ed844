use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tax_core::calculations::common::round_whole;
use tax_core::calculations::evaluate;
use tax_core::{BracketSchedule, TaxBracket};
use tax_data::ScheduleLoader;

/// Validate a bracket schedules CSV file and print what it defines.
///
/// The CSV file should have the following columns:
/// - schedule: The schedule name (e.g. old, new)
/// - max_income: The inclusive upper bound (empty for the last bracket)
/// - rate: The marginal tax rate as a decimal (e.g., 0.05)
/// - standard_deduction: Optional deduction applied before the brackets
#[derive(Parser, Debug)]
#[command(name = "tax-schedule-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket schedules
    #[arg(short, long)]
    file: PathBuf,

    /// Income to evaluate against every schedule in the file
    #[arg(short, long)]
    income: Option<Decimal>,
}

fn describe_bracket(
    lower: Decimal,
    bracket: &TaxBracket,
) -> String {
    let rate = bracket.tax_rate * Decimal::ONE_HUNDRED;
    match bracket.max_income {
        Some(max) => format!("  {lower} - {max} @ {}%", rate.normalize()),
        None => format!("  above {lower} @ {}%", rate.normalize()),
    }
}

fn print_schedule(
    schedule: &BracketSchedule,
    income: Option<Decimal>,
) -> Result<()> {
    println!(
        "{} (standard deduction {})",
        schedule.name(),
        schedule.standard_deduction()
    );
    for (lower, bracket) in schedule.bands() {
        println!("{}", describe_bracket(lower, bracket));
    }

    if let Some(income) = income {
        let tax = evaluate(income, schedule, schedule.standard_deduction())
            .with_context(|| format!("Failed to evaluate schedule '{}'", schedule.name()))?;
        println!("  tax on {income}: {}", round_whole(tax));
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking bracket schedules in: {}", args.file.display());

    let schedules = ScheduleLoader::load_from_path(&args.file)
        .with_context(|| format!("Failed to load schedules: {}", args.file.display()))?;

    println!("Found {} valid schedule(s).", schedules.len());

    for schedule in &schedules {
        println!();
        print_schedule(schedule, args.income)?;
    }

    Ok(())
}
