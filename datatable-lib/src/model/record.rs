//! Row trait, the built-in `Record` row, and row identity.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::Value;

/// Stable key identifying a row for selection membership.
pub type RowKey = String;

/// Anything the table can display.
///
/// The table never inspects a row beyond asking for field values by column
/// key. A missing field is `None`; the table shows it as an empty string and
/// sorts it as null.
pub trait Row {
    /// Returns the value stored under `key`, if any.
    fn field(&self, key: &str) -> Option<Value>;

    /// Whether `other` is this very row, not merely an equal one.
    ///
    /// Position identity uses this to find a row in the row list. Shared
    /// handles compare the rows they point to.
    fn same_row(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        std::ptr::eq(self, other)
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }

    fn same_row(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

impl<R: Row + ?Sized> Row for Rc<R> {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }

    fn same_row(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl Row for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }
}

impl Row for serde_json::Value {
    fn field(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|obj| obj.field(key))
    }
}

/// A row of named field values.
///
/// # Example
///
/// ```
/// use datatable_lib::{Record, Row, Value};
///
/// let invoice = Record::new()
///     .set("number", "INV-0042")
///     .set("amount", 129.5)
///     .set("paid", false);
///
/// assert_eq!(invoice.field("number"), Some(Value::from("INV-0042")));
/// assert_eq!(invoice.field("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Gets a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns all fields in key order.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl Row for Record {
    fn field(&self, key: &str) -> Option<Value> {
        self.fields.get(key).cloned()
    }
}

impl From<&serde_json::Map<String, serde_json::Value>> for Record {
    fn from(obj: &serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = obj
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v)))
            .collect();
        Self { fields }
    }
}

// =============================================================================
// Row identity
// =============================================================================

type KeyFn<R> = Rc<dyn Fn(&R) -> RowKey>;

/// Maps a row to the key used for selection membership.
///
/// The default identity is the row's position in the table's row list,
/// written as `#<index>`. It stays valid across filtering, sorting and
/// paging, but not across `set_rows` with a reordered list; supply a field
/// or function identity when rows are replaced. A row that is not in the
/// list has no position key.
pub enum RowIdentity<R> {
    /// Position in the row list.
    Position,
    /// The display string of a field.
    Field(String),
    /// A caller-supplied key function.
    Custom(KeyFn<R>),
}

impl<R> RowIdentity<R> {
    /// Identity derived from a field value.
    pub fn field(key: impl Into<String>) -> Self {
        RowIdentity::Field(key.into())
    }

    /// Identity derived from a caller-supplied function.
    pub fn custom(f: impl Fn(&R) -> RowKey + 'static) -> Self {
        RowIdentity::Custom(Rc::new(f))
    }
}

impl<R: Row> RowIdentity<R> {
    /// Computes the key for `row`, which sits at `index` in the row list.
    pub fn key(&self, row: &R, index: usize) -> RowKey {
        match self {
            RowIdentity::Position => format!("#{}", index),
            RowIdentity::Field(key) => row.field(key).unwrap_or_default().to_string(),
            RowIdentity::Custom(f) => f(row),
        }
    }
}

impl<R> Default for RowIdentity<R> {
    fn default() -> Self {
        RowIdentity::Position
    }
}

impl<R> Clone for RowIdentity<R> {
    fn clone(&self) -> Self {
        match self {
            RowIdentity::Position => RowIdentity::Position,
            RowIdentity::Field(key) => RowIdentity::Field(key.clone()),
            RowIdentity::Custom(f) => RowIdentity::Custom(Rc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for RowIdentity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIdentity::Position => f.write_str("Position"),
            RowIdentity::Field(key) => f.debug_tuple("Field").field(key).finish(),
            RowIdentity::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
