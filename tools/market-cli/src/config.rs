//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use market_commerce::store::{CartStoreConfig, DEFAULT_MAILBOX_CAPACITY, DEFAULT_STORAGE_KEY};
use market_observability::LogConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["market.toml", ".market.toml", "market.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where and under which key the cart is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Find the nearest config file at or above `start`.
    ///
    /// A file that exists but fails to parse is an error rather than being
    /// skipped.
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            for name in CONFIG_NAMES {
                let path = dir.join(name);
                if path.is_file() {
                    return Self::load(&path).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// Store configuration derived from this file.
    pub fn store_config(&self) -> CartStoreConfig {
        CartStoreConfig::default()
            .with_storage_key(self.storage.key.clone())
            .with_mailbox_capacity(self.storage.mailbox_capacity)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart file (default: `$HOME/.local/share/market`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Queued operations before callers wait.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_mailbox_capacity() -> usize {
    DEFAULT_MAILBOX_CAPACITY
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_key(),
            mailbox_capacity: default_mailbox_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_observability::{LogFormat, LogLevel};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.storage.dir, None);
    }

    #[test]
    fn test_parse_toml() {
        let config: CliConfig = toml::from_str(
            r#"
[storage]
dir = "/var/lib/market"
key = "@Shop:cart"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.storage.dir, Some(PathBuf::from("/var/lib/market")));
        assert_eq!(config.storage.key, "@Shop:cart");
        assert_eq!(config.storage.mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.store_config().storage_key, "@Shop:cart");
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market.json");

        let mut config = CliConfig::default();
        config.storage.key = "@Json:cart".to_string();
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join("market.toml"),
            "[storage]\nkey = \"@Found:cart\"\n",
        )
        .unwrap();

        let config = CliConfig::discover(&nested).unwrap().unwrap();
        assert_eq!(config.storage.key, "@Found:cart");
    }

    #[test]
    fn test_discover_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("market.toml"), "[storage\n").unwrap();

        assert!(CliConfig::discover(dir.path()).is_err());
    }
}
