//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// A display-primitive value held by a record field.
///
/// List pages only ever show strings, numbers, booleans and dates, so this
/// is the complete set of cell values a [`Record`](super::Record) can carry.
///
/// # Type Mapping
///
/// | JSON / backend type | Rust Variant |
/// |---------------------|--------------|
/// | null, missing | `Null` |
/// | boolean | `Bool` |
/// | 32-bit integer | `Int` |
/// | integer | `Long` |
/// | floating point | `Float` |
/// | money, exact decimal | `Decimal` |
/// | string, date-like string | `String` |
/// | timestamp | `DateTime` |
///
/// # Example
///
/// ```
/// use tabula_lib::model::Value;
///
/// let name = Value::from("Ada");
/// let amount = Value::from(125i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// assert!(amount.is_numeric());
/// assert_eq!(empty.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for the number-typed variants.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_)
        )
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Case-insensitive text used to order non-numeric values.
    ///
    /// Null maps to the empty string so it ranks below every other value.
    /// Timestamps use a fixed-width RFC 3339 form, which keeps lexical and
    /// chronological order identical.
    pub fn sort_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Nanos, true),
            other => other.to_string().to_lowercase(),
        }
    }

    /// Compares two number-typed values numerically.
    ///
    /// Returns `None` when either side is not numeric. Integers compare
    /// exactly, decimals compare exactly when both sides convert, anything
    /// else falls back to the total order on `f64`.
    pub fn cmp_numeric(&self, other: &Value) -> Option<Ordering> {
        if !self.is_numeric() || !other.is_numeric() {
            return None;
        }
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return Some(a.cmp(&b));
        }
        if let (Some(a), Some(b)) = (self.as_decimal(), other.as_decimal()) {
            return Some(a.cmp(&b));
        }
        let a = self.as_f64()?;
        let b = other.as_f64()?;
        Some(a.total_cmp(&b))
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Long(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::try_from(*n).ok(),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => n.to_f64(),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Untagged derive would read "12.50" as a decimal; go through JSON instead.
        serde_json::Value::deserialize(deserializer).map(Value::from)
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
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Long(i64::from(v))
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

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Long(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            nested => Value::String(nested.to_string()),
        }
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

    use super::*;

    #[test]
    fn numeric_comparison_crosses_variants() {
        let cmp = Value::Int(9).cmp_numeric(&Value::Long(10));
        assert_eq!(cmp, Some(Ordering::Less));

        let price = Value::Decimal(Decimal::from_str("10.50").unwrap());
        assert_eq!(price.cmp_numeric(&Value::Float(10.25)), Some(Ordering::Greater));
        assert_eq!(price.cmp_numeric(&Value::Long(11)), Some(Ordering::Less));
    }

    #[test]
    fn non_numeric_has_no_numeric_order() {
        assert_eq!(Value::from("9").cmp_numeric(&Value::Long(10)), None);
        assert_eq!(Value::Null.cmp_numeric(&Value::Long(10)), None);
    }

    #[test]
    fn nan_falls_back_to_total_order() {
        let cmp = Value::Float(f64::NAN).cmp_numeric(&Value::Float(1.0));
        assert_eq!(cmp, Some(Ordering::Greater));
    }

    #[test]
    fn sort_text_is_lowercase_and_null_is_empty() {
        assert_eq!(Value::from("Smith").sort_text(), "smith");
        assert_eq!(Value::Bool(true).sort_text(), "true");
        assert_eq!(Value::Null.sort_text(), "");
    }

    #[test]
    fn datetime_sort_text_is_fixed_width() {
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let late = early + chrono::Duration::milliseconds(1);
        let a = Value::DateTime(early).sort_text();
        let b = Value::DateTime(late).sort_text();
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn display_formats_cells() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(Value::DateTime(ts).to_string(), "2024-05-06 07:08:09");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Long(-3).to_string(), "-3");
    }

    #[test]
    fn json_conversion() {
        let json: serde_json::Value =
            serde_json::from_str(r#"[1, 2.5, "x", null, true, {"a": 1}]"#).unwrap();
        let serde_json::Value::Array(items) = json else {
            panic!("expected array");
        };
        let values: Vec<Value> = items.into_iter().map(Value::from).collect();
        assert_eq!(values[0], Value::Long(1));
        assert_eq!(values[1], Value::Float(2.5));
        assert_eq!(values[2], Value::from("x"));
        assert_eq!(values[3], Value::Null);
        assert_eq!(values[4], Value::Bool(true));
        assert_eq!(values[5], Value::from(r#"{"a":1}"#));
    }

    #[test]
    fn deserialize_keeps_numeric_strings_as_strings() {
        let value: Value = serde_json::from_str(r#""12.50""#).unwrap();
        assert_eq!(value, Value::from("12.50"));
    }
}
