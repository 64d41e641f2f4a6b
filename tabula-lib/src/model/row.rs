//! TableRow trait and row identity.

use std::fmt;

/// Trait for items that can be displayed as rows of a [`TableView`].
///
/// Pages with a fixed record shape implement this on their own struct so
/// their columns are checked against that shape at compile time. The
/// dynamic [`Record`](super::Record) implements it as well.
///
/// # Examples
///
/// ```
/// use tabula_lib::model::TableRow;
///
/// #[derive(Clone)]
/// struct Payment {
///     reference: String,
///     amount: i64,
/// }
///
/// impl TableRow for Payment {
///     fn key(&self) -> Option<String> {
///         Some(self.reference.clone())
///     }
/// }
/// ```
///
/// [`TableView`]: crate::view::TableView
pub trait TableRow {
    /// Unique identity of this row, stable across re-sorts.
    ///
    /// Returning `None` makes the view fall back to the row's position.
    fn key(&self) -> Option<String> {
        None
    }
}

/// Identity of a rendered row.
///
/// `Index` is the positional fallback for rows without a key. It refers to
/// the row's position in the record set as supplied, so it survives
/// re-sorting within one record set but not a wholesale replacement of the
/// records. Anything that must track a row across fetches (for example a
/// pending per-row mutation) needs a real key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Key(String),
    Index(usize),
}

impl RowKey {
    /// Identity of `row`, stored at `index` of the supplied record set.
    pub fn of<R: TableRow>(row: &R, index: usize) -> Self {
        match row.key() {
            Some(key) => RowKey::Key(key),
            None => RowKey::Index(index),
        }
    }

    /// Returns `true` when this is the positional fallback.
    pub fn is_positional(&self) -> bool {
        matches!(self, RowKey::Index(_))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Key(key) => f.write_str(key),
            RowKey::Index(index) => write!(f, "#{index}"),
        }
    }
}
