//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use seed_types::TokenParams;
use seed_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),
}

/// Configuration for the `seed-ledger` binary.
///
/// Loaded from a TOML file via [`LedgerConfig::from_toml_file`]; CLI flags
/// and environment variables override individual fields afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Token state machine parameters (`[params]` table).
    #[serde(default)]
    pub params: TokenParams,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./seed_data")
}

fn default_map_size() -> usize {
    seed_store_lmdb::LmdbEnvironment::DEFAULT_MAP_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: TokenParams::default(),
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_types::RefundWindow;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.params.refund_delay_secs, 604_800);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn test_params_table() {
        let toml = r#"
            data_dir = "/var/lib/seed"
            log_format = "json"

            [params]
            refund_delay_secs = 60
            refund_window = "preserve"
        "#;
        let config = LedgerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/seed"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.params.refund_delay_secs, 60);
        assert_eq!(config.params.refund_window, RefundWindow::Preserve);
        assert_eq!(config.params.max_memo_bytes, 256);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = LedgerConfig::default();
        config.params.refund_window = RefundWindow::Preserve;
        let text = config.to_toml_string().unwrap();
        assert_eq!(LedgerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let err = LedgerConfig::from_toml_str("[params]\nrefund_window = \"later\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = LedgerConfig::from_toml_file(Path::new("/nonexistent/seed.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
