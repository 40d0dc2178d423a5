//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use market_cache::FileStore;
use market_commerce::store::CartStore;
use market_observability::{LogConfig, LogLevel};
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Directory the cart file lives in.
    pub data_dir: PathBuf,
}

impl Context {
    /// Load context from the config file and flags.
    ///
    /// `--data-dir` beats `[storage] dir`, which beats the default location.
    pub fn load(config_path: Option<&str>, data_dir: Option<PathBuf>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CliConfig::load(Path::new(path))?,
            None => CliConfig::discover(&cwd)?.unwrap_or_default(),
        };

        let data_dir = data_dir
            .or_else(|| config.storage.dir.clone())
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            config,
            output,
            data_dir: resolve_path(&cwd, data_dir),
        })
    }

    /// Logging config, raised to `debug` in verbose mode.
    pub fn log_config(&self) -> LogConfig {
        let config = self.config.logging.clone();
        if self.output.is_verbose() {
            let level = config.level.min(LogLevel::Debug);
            config.with_level(level)
        } else {
            config
        }
    }

    /// Start a cart store over the data directory.
    pub async fn open_store(&self) -> Result<CartStore> {
        self.output
            .debug(&format!("Data directory: {}", self.data_dir.display()));
        let kv = FileStore::open(&self.data_dir).with_context(|| {
            format!("Failed to open data directory: {}", self.data_dir.display())
        })?;

        let config = self.config.store_config();
        debug!(data_dir = %self.data_dir.display(), key = %config.storage_key, "Opening cart store");
        let store = CartStore::spawn(kv, config);
        store.handle().ready().await?;
        Ok(store)
    }
}

fn resolve_path(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn default_data_dir() -> PathBuf {
    let base = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    };
    base.join("market")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_resolve_against_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_path(cwd, PathBuf::from("data")),
            PathBuf::from("/work/data")
        );
        assert_eq!(
            resolve_path(cwd, PathBuf::from("/abs")),
            PathBuf::from("/abs")
        );
    }

    fn context(verbose: bool, level: LogLevel) -> Context {
        let mut config = CliConfig::default();
        config.logging.level = level;
        Context {
            config,
            output: Output::new(verbose, false),
            data_dir: PathBuf::from("/tmp/market"),
        }
    }

    #[test]
    fn test_verbose_raises_log_level_to_debug() {
        assert_eq!(context(true, LogLevel::Warn).log_config().level, LogLevel::Debug);
        assert_eq!(context(true, LogLevel::Trace).log_config().level, LogLevel::Trace);
        assert_eq!(context(false, LogLevel::Warn).log_config().level, LogLevel::Warn);
    }

    #[test]
    fn test_default_data_dir_is_named_market() {
        assert!(default_data_dir().ends_with("market"));
    }
}
