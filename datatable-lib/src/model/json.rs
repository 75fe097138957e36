//! Loading records from JSON.

use std::fs;
use std::path::Path;

use log::debug;

use super::Record;
use crate::error::RowsError;

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Parses a JSON array of objects into records.
///
/// ```
/// use datatable_lib::model::parse_records;
///
/// let rows = parse_records(r#"[{"name": "a", "v": 1}, {"name": "b"}]"#).unwrap();
/// assert_eq!(rows.len(), 2);
/// ```
pub fn parse_records(text: &str) -> Result<Vec<Record>, RowsError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => return Err(RowsError::NotAnArray(json_kind(&other))),
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(obj) => Ok(Record::from(obj)),
            other => Err(RowsError::NotAnObject {
                index,
                kind: json_kind(other),
            }),
        })
        .collect()
}

/// Reads and parses a JSON row file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, RowsError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RowsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&text)?;
    debug!("loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}
