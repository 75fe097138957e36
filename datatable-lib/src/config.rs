//! Table configuration.
//!
//! A table can be described in TOML instead of code:
//!
//! ```toml
//! page_size = 25
//! window = 5
//! identity_field = "id"
//!
//! [[columns]]
//! key = "number"
//! label = "Invoice"
//! sortable = true
//!
//! [[columns]]
//! key = "amount"
//! label = "Amount"
//! sortable = true
//! align = "right"
//! format = { kind = "currency", symbol = "$", decimals = 2 }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::model::{Alignment, CellFormat, Column};
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW};

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

/// One column of a [`TableConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Field key.
    pub key: String,
    /// Header label; defaults to the key.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Alignment,
    /// Named display format.
    #[serde(default)]
    pub format: Option<CellFormat>,
}

impl ColumnConfig {
    /// Builds the column descriptor.
    pub fn to_column<R>(&self) -> Column<R> {
        let label = self.label.clone().unwrap_or_else(|| self.key.clone());
        let mut column = Column::new(self.key.clone(), label).align(self.align);
        if self.sortable {
            column = column.sortable();
        }
        if let Some(format) = &self.format {
            column = column.format(format.clone());
        }
        column
    }
}

/// Declarative description of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Maximum number of page buttons.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Field whose value identifies a row for selection.
    #[serde(default)]
    pub identity_field: Option<String>,
    /// Column definitions, in display order.
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window: DEFAULT_WINDOW,
            identity_field: None,
            columns: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(
            "loaded table config from {} ({} columns)",
            path.display(),
            config.columns.len()
        );
        Ok(config)
    }

    /// Checks the configuration describes a usable table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size must be at least 1"));
        }
        if self.window == 0 {
            return Err(ConfigError::invalid("window must be at least 1"));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.key.trim().is_empty() {
                return Err(ConfigError::invalid("column key must not be empty"));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate column key {:?}",
                    column.key
                )));
            }
        }
        if let Some(field) = &self.identity_field
            && field.trim().is_empty()
        {
            return Err(ConfigError::invalid("identity_field must not be empty"));
        }
        Ok(())
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVOICES: &str = r#"
        page_size = 25
        identity_field = "id"

        [[columns]]
        key = "number"
        label = "Invoice"
        sortable = true

        [[columns]]
        key = "amount"
        sortable = true
        align = "right"
        format = { kind = "currency", symbol = "€" }
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = TableConfig::from_toml_str(INVOICES).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.window, DEFAULT_WINDOW);
        assert_eq!(config.identity_field.as_deref(), Some("id"));
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.columns[1].align, Alignment::Right);
        assert_eq!(
            config.columns[1].format,
            Some(CellFormat::Currency {
                symbol: "€".into(),
                decimals: 2
            })
        );
    }

    #[test]
    fn test_defaults() {
        let config = TableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_label_defaults_to_key() {
        let config = TableConfig::from_toml_str(INVOICES).unwrap();
        let column = config.columns[1].to_column::<crate::model::Record>();
        assert_eq!(column.label, "amount");
        assert!(column.sortable);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = TableConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let text = r#"
            [[columns]]
            key = "a"
            [[columns]]
            key = "a"
        "#;
        let err = TableConfig::from_toml_str(text).unwrap_err();
        assert!(err.to_string().contains("duplicate column key"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let text = r#"
            [[columns]]
            key = "a"
            format = { kind = "sparkline" }
        "#;
        assert!(matches!(
            TableConfig::from_toml_str(text),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = TableConfig::from_toml_str(INVOICES).unwrap();
        let text = config.to_toml_string().unwrap();
        assert_eq!(TableConfig::from_toml_str(&text).unwrap(), config);
    }
}
