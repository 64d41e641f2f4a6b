//! Column model.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::model::Record;
use crate::model::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
type Renderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Column configuration.
///
/// A column names one field of the row (`id`), how its header reads, and
/// how its cells are shown. The accessor yields the raw value: it is the
/// sort key and the fallback display. A `render` function, when present,
/// only changes what the cell shows; ordering still uses the raw value, so
/// a `"$1,234.00"` cell sorts by the number behind it.
///
/// # Examples
///
/// ```
/// use tabula_lib::model::Record;
/// use tabula_lib::view::{Alignment, Column};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::field("name", "Name"),
///     Column::field("amount", "Amount")
///         .align(Alignment::Right)
///         .render(|r: &Record| format!("${:.2}", r.get_float("amount").ok().flatten().unwrap_or(0.0))),
///     Column::field("notes", "Notes").unsortable(),
/// ];
/// assert!(columns[0].is_sortable());
/// assert!(!columns[2].is_sortable());
/// ```
pub struct Column<R> {
    id: String,
    label: String,
    align: Alignment,
    width: Option<u16>,
    sortable: bool,
    accessor: Accessor<R>,
    render: Option<Renderer<R>>,
}

impl<R> Column<R> {
    /// Create a column over a typed row.
    ///
    /// `accessor` extracts the raw value identified by `id`.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            align: Alignment::Left,
            width: None,
            sortable: true,
            accessor: Arc::new(accessor),
            render: None,
        }
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set a fixed display width (in terminal columns).
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set whether header activation sorts by this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Disable sorting on this column.
    pub fn unsortable(self) -> Self {
        self.sortable(false)
    }

    /// Set a custom cell renderer.
    ///
    /// Must produce a value for every row the view can hold.
    pub fn render(mut self, render: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    pub fn fixed_width(&self) -> Option<u16> {
        self.width
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Raw value of this column for `row`; the sort input.
    pub fn raw(&self, row: &R) -> Value {
        (self.accessor)(row)
    }

    /// Cell text for `row`: the renderer's output when set, else the raw value.
    pub fn display(&self, row: &R) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.raw(row).to_string(),
        }
    }
}

impl Column<Record> {
    /// Create a column reading the field `id` of a dynamic record.
    ///
    /// A record without that field yields `Value::Null`.
    pub fn field(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        let field = id.clone();
        Self::new(id, label, move |record: &Record| record.value(&field))
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            align: self.align,
            width: self.width,
            sortable: self.sortable,
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Find the column with the given id.
///
/// With duplicate ids the first column in display order wins.
pub fn find_column<'a, R>(columns: &'a [Column<R>], id: &str) -> Option<&'a Column<R>> {
    columns.iter().find(|c| c.id == id)
}

/// Ids used by more than one column, in first-seen order.
pub fn duplicate_ids<R>(columns: &[Column<R>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) && !duplicates.contains(&column.id) {
            duplicates.push(column.id.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Member {
        name: String,
        dues: i64,
    }

    fn columns() -> Vec<Column<Member>> {
        vec![
            Column::new("name", "Name", |m: &Member| Value::from(m.name.clone())),
            Column::new("dues", "Dues", |m: &Member| Value::from(m.dues))
                .align(Alignment::Right)
                .render(|m: &Member| format!("${}.00", m.dues)),
        ]
    }

    #[test]
    fn display_prefers_render_and_raw_is_untouched() {
        let member = Member {
            name: "Ada".into(),
            dues: 40,
        };
        let cols = columns();
        assert_eq!(cols[0].display(&member), "Ada");
        assert_eq!(cols[1].display(&member), "$40.00");
        assert_eq!(cols[1].raw(&member), Value::Long(40));
    }

    #[test]
    fn record_field_column_reads_by_name() {
        let column = Column::field("amount", "Amount");
        let record = Record::new().set("amount", 12i64);
        assert_eq!(column.raw(&record), Value::Long(12));
        assert_eq!(column.raw(&Record::new()), Value::Null);
        assert_eq!(column.display(&Record::new()), "");
    }

    #[test]
    fn defaults() {
        let column = Column::field("x", "X");
        assert!(column.is_sortable());
        assert_eq!(column.alignment(), Alignment::Left);
        assert_eq!(column.fixed_width(), None);
    }

    #[test]
    fn first_duplicate_wins_and_is_reported() {
        let cols: Vec<Column<Record>> = vec![
            Column::field("a", "First"),
            Column::field("b", "B"),
            Column::field("a", "Second"),
            Column::field("a", "Third"),
        ];
        assert_eq!(find_column(&cols, "a").map(Column::label), Some("First"));
        assert_eq!(duplicate_ids(&cols), vec!["a".to_string()]);
        assert!(find_column(&cols, "zzz").is_none());
    }
}
