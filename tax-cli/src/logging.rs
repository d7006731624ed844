use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Level used when neither the command line, `RUST_LOG`, nor the settings file name one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// --- Filter selection ---

/// Picks the filter directive to use.
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the settings file,
/// then [`DEFAULT_LOG_LEVEL`]. Blank values are skipped.
pub fn select_directive(
    cli_level: Option<&str>,
    env_level: Option<&str>,
    settings_level: Option<&str>,
) -> String {
    [cli_level, env_level, settings_level]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_string()
}

fn make_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("invalid log level '{directive}': {e}"))
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// Records go to stderr so they never mix with the report on stdout.
/// Timestamps and target names are stripped to keep CLI output clean.
pub fn init_logging(
    cli_level: Option<&str>,
    settings_level: Option<&str>,
) -> Result<()> {
    let env_level = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = select_directive(cli_level, env_level.as_deref(), settings_level);
    let filter = make_filter(&directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))
}
