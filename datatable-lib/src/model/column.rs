//! Column descriptors and cell formatters.

use std::fmt;
use std::fmt::Write as _;
use std::rc::Rc;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use serde::Serialize;

use super::Row;
use super::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Named cell formatter with fixed semantics.
///
/// Formats are applied to the raw field value; a missing field always
/// formats as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellFormat {
    /// The value's own string form.
    #[default]
    Plain,
    Uppercase,
    Lowercase,
    /// Numbers rounded to a fixed number of decimals.
    Fixed { decimals: u32 },
    /// Numbers with a currency symbol prefix, e.g. `$1,204.50`.
    Currency {
        #[serde(default = "default_currency_symbol")]
        symbol: String,
        #[serde(default = "default_currency_decimals")]
        decimals: u32,
    },
    /// Ratios shown as percentages: `0.125` becomes `12.5%`.
    Percent {
        #[serde(default)]
        decimals: u32,
    },
    /// Booleans as `Yes`/`No`.
    YesNo,
    /// Timestamps through a strftime pattern.
    Date { pattern: String },
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u32 {
    2
}

impl CellFormat {
    /// Formats a raw field value.
    ///
    /// Values the format does not apply to (text under `Fixed`, numbers
    /// under `Date`) fall back to their plain string form.
    pub fn apply(&self, value: &Value) -> String {
        if value.is_null() {
            return String::new();
        }
        match self {
            CellFormat::Plain => value.to_string(),
            CellFormat::Uppercase => value.to_string().to_uppercase(),
            CellFormat::Lowercase => value.to_string().to_lowercase(),
            CellFormat::Fixed { decimals } => match to_decimal(value) {
                Some(d) => round(d, *decimals).to_string(),
                None => value.to_string(),
            },
            CellFormat::Currency { symbol, decimals } => match to_decimal(value) {
                Some(d) => {
                    let rounded = round(d, *decimals);
                    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
                        "-"
                    } else {
                        ""
                    };
                    format!("{}{}{}", sign, symbol, group_thousands(&rounded.abs().to_string()))
                }
                None => value.to_string(),
            },
            CellFormat::Percent { decimals } => {
                match to_decimal(value).and_then(|d| d.checked_mul(Decimal::ONE_HUNDRED)) {
                    Some(d) => format!("{}%", round(d, *decimals)),
                    None => value.to_string(),
                }
            }
            CellFormat::YesNo => match value {
                Value::Bool(true) => "Yes".to_string(),
                Value::Bool(false) => "No".to_string(),
                other => other.to_string(),
            },
            CellFormat::Date { pattern } => match value {
                // An invalid pattern makes chrono's formatter fail; show the raw value instead.
                Value::DateTime(at) => {
                    let mut out = String::new();
                    match write!(out, "{}", at.format(pattern)) {
                        Ok(()) => out,
                        Err(_) => value.to_string(),
                    }
                }
                other => other.to_string(),
            },
        }
    }
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Int(v) => Some(Decimal::from(*v)),
        Value::Decimal(v) => Some(*v),
        Value::Float(v) => Decimal::from_f64(*v),
        _ => None,
    }
}

fn round(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

/// Inserts `,` separators into the integer part of a plain decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

type RenderFn<R> = Rc<dyn Fn(&R) -> String>;

/// Derives a cell's display string.
pub enum Formatter<R> {
    /// A named format over the raw field value.
    Format(CellFormat),
    /// A caller-supplied function over the whole row.
    Custom(RenderFn<R>),
}

impl<R> Clone for Formatter<R> {
    fn clone(&self) -> Self {
        match self {
            Formatter::Format(format) => Formatter::Format(format.clone()),
            Formatter::Custom(f) => Formatter::Custom(Rc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Formatter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Format(format) => f.debug_tuple("Format").field(format).finish(),
            Formatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Column configuration.
///
/// Columns define the structure of the table: the field key cells read
/// from, header label, alignment, whether the column is sortable, and an
/// optional formatter for the display string.
///
/// # Examples
///
/// ```
/// use datatable_lib::{Alignment, CellFormat, Column, Record};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("number", "Invoice").sortable(),
///     Column::new("amount", "Amount")
///         .sortable()
///         .align(Alignment::Right)
///         .format(CellFormat::Currency { symbol: "$".into(), decimals: 2 }),
///     Column::new("customer", "Customer")
///         .render(|row: &Record| format!("{:?}", row.get("customer"))),
/// ];
/// ```
#[derive(Debug)]
pub struct Column<R> {
    /// Field key the column reads from (and sorts by).
    pub key: String,
    /// Header label.
    pub label: String,
    /// Whether this column is sortable.
    pub sortable: bool,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Display formatter; `None` shows the raw field coerced to string.
    pub render: Option<Formatter<R>>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            align: self.align,
            render: self.render.clone(),
        }
    }
}

impl<R> Column<R> {
    /// Create a new column reading field `key`, headed by `label`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            align: Alignment::Left,
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Format the raw field value with a named format.
    pub fn format(mut self, format: CellFormat) -> Self {
        self.render = Some(Formatter::Format(format));
        self
    }

    /// Derive the display string from the whole row.
    pub fn render(mut self, f: impl Fn(&R) -> String + 'static) -> Self {
        self.render = Some(Formatter::Custom(Rc::new(f)));
        self
    }
}

impl<R: Row> Column<R> {
    /// Raw value of this column's field; missing fields are null.
    pub fn value(&self, row: &R) -> Value {
        row.field(&self.key).unwrap_or_default()
    }

    /// Display string of this column's cell for `row`.
    pub fn display(&self, row: &R) -> String {
        match &self.render {
            None => self.value(row).to_string(),
            Some(Formatter::Format(format)) => format.apply(&self.value(row)),
            Some(Formatter::Custom(f)) => f(row),
        }
    }
}
