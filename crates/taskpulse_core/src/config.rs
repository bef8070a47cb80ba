//! Core configuration.
//!
//! # Responsibility
//! - Hold tunables for trend windowing and fallback context building.
//! - Load them from TOML with every field optional.
//!
//! # Invariants
//! - Missing sections/fields fall back to compiled defaults.
//! - An explicit path that cannot be read is an error, never silently ignored.

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_MIN_WINDOW_DAYS: u32 = 14;
pub const DEFAULT_RATE_DECIMALS: u32 = 2;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 12_000;
/// Fixed reply shown when a store or answerer call fails.
pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Configuration load failure.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Trend windowing and rounding options (`[trends]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Minimum number of calendar days in creation/priority windows.
    pub min_window_days: u32,
    /// Decimal places kept in completion rates.
    pub rate_decimals: u32,
    /// Offset from UTC defining "local" day boundaries.
    pub utc_offset_minutes: i32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_window_days: DEFAULT_MIN_WINDOW_DAYS,
            rate_decimals: DEFAULT_RATE_DECIMALS,
            utc_offset_minutes: 0,
        }
    }
}

impl TrendConfig {
    /// Day-boundary offset; out-of-range values degrade to UTC.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Fallback context options (`[fallback]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Upper bound on the context block handed to the answerer.
    pub max_context_chars: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
        }
    }
}

/// Top-level core configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub trends: TrendConfig,
    pub fallback: FallbackConfig,
}

impl CoreConfig {
    /// Parses TOML text; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file at an explicit path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};

    #[test]
    fn empty_document_yields_defaults() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.trends.min_window_days, 14);
        assert_eq!(config.fallback.max_context_chars, 12_000);
    }

    #[test]
    fn partial_sections_override_only_given_keys() {
        let config = CoreConfig::from_toml_str(
            "[trends]\nutc_offset_minutes = 120\n[fallback]\nmax_context_chars = 500\n",
        )
        .unwrap();
        assert_eq!(config.trends.utc_offset_minutes, 120);
        assert_eq!(config.trends.rate_decimals, 2);
        assert_eq!(config.trends.offset().local_minus_utc(), 7200);
        assert_eq!(config.fallback.max_context_chars, 500);
    }

    #[test]
    fn out_of_range_offset_degrades_to_utc() {
        let config = CoreConfig::from_toml_str("[trends]\nutc_offset_minutes = 100000\n").unwrap();
        assert_eq!(config.trends.offset().local_minus_utc(), 0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CoreConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
