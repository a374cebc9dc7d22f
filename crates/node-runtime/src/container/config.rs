//! # Node Configuration
//!
//! Everything the host reads from its environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `IL_STORE_BACKEND` | `memory` | `memory` or `rocksdb` |
//! | `IL_DATA_DIR` | `./data` | RocksDB directory parent |
//! | `IL_LOG_LEVEL` | `info` | `EnvFilter` directive |
//! | `IL_JSON_LOGS` | `false` | JSON log lines |
//! | `IL_KEY_CACHE_SIZE` | 1024 | apply-path node key cache entries |
//!
//! `RUST_LOG`, when set, overrides `IL_LOG_LEVEL`.

use il_08_transaction_dispatcher::DispatcherConfig;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_STORE_BACKEND: &str = "IL_STORE_BACKEND";
pub const ENV_DATA_DIR: &str = "IL_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "IL_LOG_LEVEL";
pub const ENV_JSON_LOGS: &str = "IL_JSON_LOGS";
pub const ENV_KEY_CACHE_SIZE: &str = "IL_KEY_CACHE_SIZE";

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Ledger application tunables.
    pub dispatcher: DispatcherConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown store backend '{0}', expected 'memory' or 'rocksdb'")]
    UnknownBackend(String),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },

    /// The binary was built without RocksDB support.
    #[error("Store backend 'rocksdb' requires building with the 'rocksdb' feature")]
    BackendUnavailable,
}

/// Which [`il_01_entity_store::KeyValueStore`] backs the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Ordered in-memory map; state is lost on exit.
    #[default]
    Memory,
    /// RocksDB under `data_dir`.
    RocksDb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "rocksdb" => Ok(StoreBackend::RocksDb),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    /// Data directory; RocksDB lives in `<data_dir>/ledger`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl StorageConfig {
    /// Directory of the RocksDB instance.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger")
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `il_08_transaction_dispatcher=debug`.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NodeConfig::default();

        if let Some(backend) = lookup(ENV_STORE_BACKEND) {
            config.storage.backend = backend.parse()?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.is_empty()) {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|l| !l.is_empty()) {
            config.logging.level = level;
        }
        if let Some(json) = lookup(ENV_JSON_LOGS) {
            config.logging.json = parse_bool(ENV_JSON_LOGS, &json)?;
        }
        if let Some(size) = lookup(ENV_KEY_CACHE_SIZE) {
            config.dispatcher.key_cache_size =
                size.trim()
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(ConfigError::InvalidValue {
                        var: ENV_KEY_CACHE_SIZE,
                        value: size.clone(),
                    })?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}
