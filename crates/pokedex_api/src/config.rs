//! Boundary configuration resolved from the process environment.
//!
//! # Invariants
//! - Resolution never touches the filesystem; it only validates shapes.
//! - An empty or whitespace-only variable counts as unset.

use pokedex_core::logging::normalize_level;
use pokedex_core::{default_log_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "POKEDEX_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "POKEDEX_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "POKEDEX_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "pokedex.sqlite3";

/// Resolved boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// SQLite file opened for every request session.
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Rolling log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

/// Configuration resolution or logging bootstrap failure.
#[derive(Debug)]
pub enum ConfigError {
    InvalidLogLevel(LoggingError),
    RelativeLogDir(PathBuf),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(err) => write!(f, "{LOG_LEVEL_ENV}: {err}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
            Self::Logging(err) => write!(f, "logging init failed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) | Self::Logging(err) => Some(err),
            Self::RelativeLogDir(_) => None,
        }
    }
}

impl ApiConfig {
    /// Config for an explicit database file with logging disabled.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }

    /// Resolves config from `POKEDEX_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = match read(LOG_DIR_ENV).map(PathBuf::from) {
            Some(dir) if !dir.is_absolute() => return Err(ConfigError::RelativeLogDir(dir)),
            other => other,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, ConfigError, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = ApiConfig::from_lookup(lookup(&[(DB_PATH_ENV, "  ")]))
            .expect("defaults should resolve");
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("pokedex.sqlite3")
        );
        assert_eq!(config.log_level, pokedex_core::default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_are_normalized() {
        let log_dir = std::env::temp_dir().join("pokedex-logs");
        let config = ApiConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, " /data/pokedex.db "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, log_dir.to_str().expect("utf-8 temp dir")),
        ]))
        .expect("explicit config should resolve");
        assert_eq!(config.db_path, PathBuf::from("/data/pokedex.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let level = ApiConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "chatty")]))
            .expect_err("unknown level should fail");
        assert!(matches!(level, ConfigError::InvalidLogLevel(_)));

        let dir = ApiConfig::from_lookup(lookup(&[(LOG_DIR_ENV, "logs")]))
            .expect_err("relative dir should fail");
        assert!(matches!(dir, ConfigError::RelativeLogDir(_)));
        assert!(dir.to_string().contains(LOG_DIR_ENV));
    }
}
