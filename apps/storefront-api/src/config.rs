//! Storefront API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                        | Default                          |
//! |---------------------------------|----------------------------------|
//! | `STOREFRONT_PORT`               | `8080`                           |
//! | `STOREFRONT_DB_PATH`            | platform data dir `storefront.db`|
//! | `STOREFRONT_DB_MAX_CONNECTIONS` | `5`                              |
//! | `STOREFRONT_UNIQUE_TITLES`      | `true`                           |

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Storefront API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Reject products whose title already exists
    pub unique_titles: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup("STOREFRONT_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path(),
        };

        Ok(ApiConfig {
            port: lookup("STOREFRONT_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_PORT".to_string()))?,

            database_path,

            db_max_connections: lookup("STOREFRONT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .ok()
                .filter(|max: &u32| *max > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue("STOREFRONT_DB_MAX_CONNECTIONS".to_string())
                })?,

            unique_titles: match lookup("STOREFRONT_UNIQUE_TITLES") {
                Some(value) => parse_flag(&value)
                    .ok_or_else(|| ConfigError::InvalidValue("STOREFRONT_UNIQUE_TITLES".to_string()))?,
                None => true,
            },
        })
    }
}

/// Database file under the platform data directory.
///
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// Falls back to the working directory when no home directory is known.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().join("storefront.db"))
        .unwrap_or_else(|| PathBuf::from("storefront.db"))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot prepare database directory {path}: {source}")]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.db_max_connections, 5);
        assert!(config.unique_titles);
        assert!(config.database_path.ends_with("storefront.db"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_PORT", "9000"),
            ("STOREFRONT_DB_PATH", "/tmp/shop.db"),
            ("STOREFRONT_DB_MAX_CONNECTIONS", "2"),
            ("STOREFRONT_UNIQUE_TITLES", "false"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.db_max_connections, 2);
        assert!(!config.unique_titles);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("STOREFRONT_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "STOREFRONT_PORT"
        ));
        assert!(config_from(&[("STOREFRONT_DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config_from(&[("STOREFRONT_UNIQUE_TITLES", "maybe")]).is_err());
    }
}
