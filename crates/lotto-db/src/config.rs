//! # Ledger Configuration
//!
//! Where the database lives and how loudly to log.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by `daily`)          │
//! │     --db ./today.db                                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     LOTTO_DB_PATH=/srv/lotto/ledger.db                                 │
//! │     LOTTO_LOG=debug                                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/lotto-ledger/ledger.toml (Linux)                         │
//! │     ~/Library/Application Support/com.lotto.ledger/ledger.toml (macOS) │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     <data dir>/lotto-ledger.db, filter "info,lotto=debug,sqlx=warn"    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # ledger.toml
//! [database]
//! path = "/srv/lotto/ledger.db"
//! max_connections = 5
//! connect_timeout_secs = 30
//!
//! [logging]
//! filter = "info,lotto=debug,sqlx=warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::DbConfig;

/// Default tracing filter when neither `RUST_LOG` nor config says otherwise.
pub const DEFAULT_LOG_FILTER: &str = "info,lotto=debug,sqlx=warn";

const DB_FILE_NAME: &str = "lotto-ledger.db";
const CONFIG_FILE_NAME: &str = "ledger.toml";

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "lotto", "ledger")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(DB_FILE_NAME))
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Ledger Configuration
// =============================================================================

/// Complete configuration for the `daily` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl LedgerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else `ledger.toml` in the config dir)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(config_path: Option<&Path>) -> DbResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                info!(path = %path.display(), "Loading ledger config from file");
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(path = %path.display(), "Loading ledger config from file");
                    Self::from_file(&path)?
                }
                other => {
                    debug!(?other, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> DbResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> DbResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DbResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(DbError::Config("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(DbError::Config(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.database.connect_timeout_secs == 0 {
            return Err(DbError::Config(
                "database.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `LOTTO_DB_PATH` and `LOTTO_LOG`.
    ///
    /// Takes a lookup function so tests don't have to mutate the process
    /// environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("LOTTO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(filter) = lookup("LOTTO_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lotto", "ledger")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pool configuration for [`Database::new`](crate::Database::new).
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database.path)
            .max_connections(self.database.max_connections)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.path.ends_with(DB_FILE_NAME));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LedgerConfig::from_toml(
            r#"
            [database]
            path = "/srv/lotto/ledger.db"
            connect_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/srv/lotto/ledger.db"));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.db_config().connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = LedgerConfig::from_toml("[database]\nmax_connections = \"many\"").unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = LedgerConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.database.path = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.database.connect_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LedgerConfig::default();
        config.apply_env_overrides(|key| match key {
            "LOTTO_DB_PATH" => Some("/tmp/override.db".to_string()),
            "LOTTO_LOG" => Some("debug".to_string()),
            _ => None,
        });

        assert_eq!(config.database.path, PathBuf::from("/tmp/override.db"));
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.db_config().database_path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = LedgerConfig::load(Some(Path::new("/definitely/not/here/ledger.toml"))).unwrap_err();
        assert!(matches!(err, DbError::Io(_)));
    }
}
