//! Optional TOML settings for `tax-calc`.
//!
//! ```toml
//! currency = "RS."
//! regimes = ["old", "new"]
//! schedules_file = "schedules.csv"
//! log_level = "info"
//! ```
//!
//! Every key is optional. Unknown keys are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::schedules::{NEW_REGIME, OLD_REGIME};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CURRENCY: &str = "RS.";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("exactly two regimes must be configured, got {0}")]
    RegimeCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Prefix printed before every amount.
    pub currency: String,
    /// The two schedules to compare, in display order.
    pub regimes: Vec<String>,
    /// CSV file whose schedules are added to (or replace) the built-ins.
    pub schedules_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            regimes: vec![OLD_REGIME.to_string(), NEW_REGIME.to_string()],
            schedules_file: None,
            log_level: None,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text and validates them.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.regime_pair()?;
        Ok(settings)
    }

    /// Loads settings from a file.
    ///
    /// A relative `schedules_file` is resolved against the directory that
    /// holds the settings file, not the working directory.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&contents)?;

        if let Some(file) = settings.schedules_file.take() {
            let resolved = match path.parent() {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file,
            };
            settings.schedules_file = Some(resolved);
        }

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// The configured regimes as a `(first, second)` pair.
    pub fn regime_pair(&self) -> Result<(&str, &str), SettingsError> {
        match self.regimes.as_slice() {
            [first, second] => Ok((first.as_str(), second.as_str())),
            other => Err(SettingsError::RegimeCount(other.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.currency, "RS.");
        assert_eq!(settings.regime_pair().unwrap(), ("old", "new"));
    }

    #[test]
    fn all_keys_parse() {
        let settings = Settings::from_toml_str(
            r#"
            currency = "INR "
            regimes = ["new", "old"]
            schedules_file = "/etc/tax/schedules.csv"
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(settings.currency, "INR ");
        assert_eq!(settings.regime_pair().unwrap(), ("new", "old"));
        assert_eq!(
            settings.schedules_file,
            Some(PathBuf::from("/etc/tax/schedules.csv"))
        );
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Settings::from_toml_str("colour = \"red\"\n");

        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn wrong_regime_count_is_rejected() {
        let one = Settings::from_toml_str("regimes = [\"old\"]\n");
        let three = Settings::from_toml_str("regimes = [\"old\", \"new\", \"flat\"]\n");

        assert!(matches!(one, Err(SettingsError::RegimeCount(1))));
        assert!(matches!(three, Err(SettingsError::RegimeCount(3))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Settings::load(Path::new("/definitely/not/here.toml"));

        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }
}
