//! LoadError for building records from JSON

/// Error type for turning a fetched JSON payload into records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but is not an array of records.
    #[error("expected a JSON array of records, got {actual}")]
    NotAnArray { actual: &'static str },

    /// An element of the array is not an object.
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

impl LoadError {
    /// Creates a new not-an-array error from the offending JSON value.
    pub fn not_an_array(value: &serde_json::Value) -> Self {
        let actual = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::NotAnArray { actual }
    }
}
