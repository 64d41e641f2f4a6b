//! Query keys for cached record sets.

use std::fmt;

use crate::view::Direction;

/// Identifies one list query: the resource plus its field selection and
/// ordering parameters.
///
/// # Example
///
/// ```
/// use tabula_lib::cache::QueryKey;
/// use tabula_lib::view::Direction;
///
/// let key = QueryKey::new("payments")
///     .select(&["name", "amount"])
///     .order_by("date", Direction::Descending);
///
/// assert_eq!(key.to_string(), "payments?fields=name,amount&order_by=date desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    fields: Vec<String>,
    order: Vec<(String, Direction)>,
}

impl QueryKey {
    /// Key for a whole resource listing.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            fields: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Adds selected fields.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.fields.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Adds an ordering parameter; later calls are secondary keys.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order.push((field.into(), direction));
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn order(&self) -> &[(String, Direction)] {
        &self.order
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource)?;
        let mut params = Vec::new();
        if !self.fields.is_empty() {
            params.push(format!("fields={}", self.fields.join(",")));
        }
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(field, direction)| {
                    let dir = match direction {
                        Direction::Ascending => "asc",
                        Direction::Descending => "desc",
                    };
                    format!("{} {}", field, dir)
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(format!("order_by={}", order));
        }
        if !params.is_empty() {
            write!(f, "?{}", params.join("&"))?;
        }
        Ok(())
    }
}
