//! Dynamic list-page record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use super::TableRow;
use super::Value;
use crate::error::FieldError;
use crate::error::LoadError;

/// Field used for row identity when no explicit key is set.
pub const DEFAULT_KEY_FIELD: &str = "name";

/// A dynamic record as returned by a list endpoint.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field. Typed getter methods provide checked access.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Record;
///
/// let record = Record::new()
///     .set("name", "Ada")
///     .set("amount", 1_250i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Ada"));
/// assert_eq!(record.get_long("amount").unwrap(), Some(1_250));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    /// Explicit identity, overriding the `name` field.
    #[serde(skip)]
    pub(crate) key: Option<String>,

    /// The field values.
    #[serde(flatten)]
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit identity key (builder pattern).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Builds a record from a JSON object.
    ///
    /// The value of `key_field`, when it is a non-empty string or a number,
    /// becomes the record's identity.
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>, key_field: &str) -> Self {
        let key = match object.get(key_field) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let fields = object
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        Self { key, fields }
    }

    /// Returns the identity of this record, if it has one.
    ///
    /// An explicit key wins; otherwise a non-null `name` field is used.
    pub fn key(&self) -> Option<String> {
        if let Some(key) = &self.key {
            return Some(key.clone());
        }
        match self.fields.get(DEFAULT_KEY_FIELD) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.to_string()),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, or `Value::Null` when the field is absent.
    pub fn value(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the field names in alphabetical order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value, widening `Int` to `i64`.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(i64::from(*n))),
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a Decimal field value.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Decimal(d)) => Ok(Some(*d)),
            Some(other) => Err(FieldError::type_mismatch(field, "decimal", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(field, "datetime", other.type_name())),
        }
    }
}

impl TableRow for Record {
    fn key(&self) -> Option<String> {
        Record::key(self)
    }
}

/// Parses a JSON array of objects into records.
///
/// # Example
///
/// ```
/// use tabula_lib::model::records_from_json;
///
/// let records = records_from_json(r#"[{"name": "a", "amount": 5}]"#, "name").unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].key().as_deref(), Some("a"));
/// ```
pub fn records_from_json(text: &str, key_field: &str) -> Result<Vec<Record>, LoadError> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(items) = parsed else {
        return Err(LoadError::not_an_array(&parsed));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(object) => Ok(Record::from_json(object, key_field)),
            _ => Err(LoadError::NotAnObject { index }),
        })
        .collect()
}
