//! Configuration providers.
//!
//! A table never reads global state for its configuration. The host resolves
//! a [`TableConfig`] through a provider and hands it to
//! [`DataTable::from_config`](crate::DataTable::from_config).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::TableConfig;
use crate::error::ConfigError;

/// Source of table configurations, keyed by table id.
pub trait ConfigProvider {
    /// Get the configuration for a table, if the provider has one.
    fn table_config(&self, table_id: &str) -> Result<Option<TableConfig>, ConfigError>;

    /// Get the configuration for a table, failing if there is none.
    fn require(&self, table_id: &str) -> Result<TableConfig, ConfigError> {
        self.table_config(table_id)?
            .ok_or_else(|| ConfigError::NotFound(table_id.to_string()))
    }

    /// Get the configuration for a table, or the default configuration.
    fn table_config_or_default(&self, table_id: &str) -> Result<TableConfig, ConfigError> {
        Ok(self.table_config(table_id)?.unwrap_or_default())
    }
}

/// In-memory provider, for tests and for configurations built in code.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    configs: HashMap<String, TableConfig>,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration (builder pattern).
    pub fn with(mut self, table_id: impl Into<String>, config: TableConfig) -> Self {
        self.insert(table_id, config);
        self
    }

    /// Add or replace a configuration.
    pub fn insert(&mut self, table_id: impl Into<String>, config: TableConfig) {
        self.configs.insert(table_id.into(), config);
    }
}

impl ConfigProvider for MemoryProvider {
    fn table_config(&self, table_id: &str) -> Result<Option<TableConfig>, ConfigError> {
        Ok(self.configs.get(table_id).cloned())
    }
}

/// Reads `<dir>/<table_id>.toml`.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider over a directory. The directory need not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory configurations are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the configuration file for a table.
    pub fn path_for(&self, table_id: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", table_id))
    }
}

impl ConfigProvider for DirectoryProvider {
    fn table_config(&self, table_id: &str) -> Result<Option<TableConfig>, ConfigError> {
        let is_path = table_id.contains(|c: char| c == '/' || c == '\\');
        if table_id.is_empty() || is_path || table_id.starts_with('.') {
            return Err(ConfigError::invalid(format!("bad table id {:?}", table_id)));
        }
        let path = self.path_for(table_id);
        if !path.is_file() {
            debug!("no config for {} at {}", table_id, path.display());
            return Ok(None);
        }
        TableConfig::load(&path).map(Some)
    }
}
