use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tax_cli::app::{self, AppConfig, Overrides};
use tax_cli::logging;
use tax_cli::settings::Settings;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the tax owed on CTC plus bonus under two bracket regimes.
///
/// Amounts not given as flags are read from stdin.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// Annual cost to company. Prompted for when omitted.
    #[arg(long)]
    ctc: Option<String>,

    /// Annual bonus. Prompted for when omitted.
    #[arg(long)]
    bonus: Option<String>,

    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file of extra or replacement schedules.
    #[arg(long)]
    schedules: Option<PathBuf>,

    /// Regime to compare; give exactly two (default: old, new).
    #[arg(long = "regime", value_name = "NAME")]
    regimes: Vec<String>,

    /// List the per-bracket slices under each regime.
    #[arg(long)]
    breakdown: bool,

    /// Log filter, e.g. `debug` or `tax_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };

    logging::init_logging(cli.log_level.as_deref(), settings.log_level.as_deref())?;
    debug!(?cli, "starting");

    let config = AppConfig::resolve(
        settings,
        Overrides {
            ctc: cli.ctc,
            bonus: cli.bonus,
            regimes: cli.regimes,
            schedules_file: cli.schedules,
            breakdown: cli.breakdown,
        },
    )?;

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    app::run(&config, &mut input, &mut output)?;

    Ok(())
}
