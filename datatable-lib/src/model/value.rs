//! Value enum for dynamic cell values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// A dynamic value read from a row field.
///
/// Rows are opaque to the table; the only thing it asks of them is a
/// `Value` per column key. The value drives three things:
///
/// | Use | Source |
/// |-----|--------|
/// | Search | [`Display`](fmt::Display) output, lowercased |
/// | Display | [`Display`](fmt::Display) output, or a column formatter |
/// | Sort | [`Value::compare`] |
///
/// # Example
///
/// ```
/// use datatable_lib::Value;
///
/// let name = Value::from("Contoso");
/// let seats = Value::from(12i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Exact decimal (amounts, prices).
    Decimal(Decimal),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// String value.
    Text(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }

    /// Kind rank used when two values of different kinds meet.
    ///
    /// Null never reaches the comparator from the sorter, but it still needs a
    /// place so that `compare` stays total.
    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 1,
            Value::DateTime(_) => 2,
            Value::Text(_) => 3,
            Value::Null => 4,
        }
    }

    /// Total ordering over values.
    ///
    /// Numbers compare numerically across `Int`, `Float` and `Decimal`.
    /// Values of different kinds order by kind: bool, number, datetime, text,
    /// then null.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::Int(a), Value::Decimal(b)) => Decimal::from(*a).cmp(b),
            (Value::Decimal(a), Value::Int(b)) => a.cmp(&Decimal::from(*b)),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Null, Value::Null) => Ordering::Equal,
            _ if self.rank() == 1 && other.rank() == 1 => {
                // At least one side is a float.
                let a = self.as_f64().unwrap_or(f64::NAN);
                let b = other.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Text(v) => f.write_str(v),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from(&v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_coercion() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(
            Value::from(Decimal::from_str("19.90").unwrap()).to_string(),
            "19.90"
        );
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(Value::from(at).to_string(), "2024-03-01T12:00:00Z");
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(7)), Value::Int(7));
        assert_eq!(Value::from(json!(7.25)), Value::Float(7.25));
        assert_eq!(Value::from(json!("x")), Value::Text("x".into()));
        assert_eq!(Value::from(json!([1, 2])), Value::Text("[1,2]".into()));
    }

    #[test]
    fn test_numeric_compare_across_kinds() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Ordering::Less);
        assert_eq!(Value::Int(2).compare(&Value::Float(1.5)), Ordering::Greater);
        assert_eq!(Value::Float(1.0).compare(&Value::Int(1)), Ordering::Equal);
        let price = Value::Decimal(Decimal::from_str("2.50").unwrap());
        assert_eq!(Value::Int(2).compare(&price), Ordering::Less);
        assert_eq!(price.compare(&Value::Float(3.0)), Ordering::Less);
    }

    #[test]
    fn test_cross_kind_compare_by_rank() {
        assert_eq!(Value::Bool(true).compare(&Value::Int(0)), Ordering::Less);
        assert_eq!(Value::Int(99).compare(&Value::from("1")), Ordering::Less);
        assert_eq!(Value::from("z").compare(&Value::Null), Ordering::Less);
        assert_eq!(Value::from("a").compare(&Value::from("b")), Ordering::Less);
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let values = [
            Value::Null,
            Value::Bool(false),
            Value::Int(3),
            Value::Float(2.5),
            Value::Float(f64::NAN),
            Value::from("m"),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.compare(b), b.compare(a).reverse(), "{:?} vs {:?}", a, b);
            }
        }
    }
}
