//! Sort engine: stable single-key ordering over a full record set.

use std::cmp::Ordering;

use log::warn;
use serde::Deserialize;
use serde::Serialize;

use super::column::Column;
use super::column::find_column;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9), missing values first.
    #[default]
    Ascending,
    /// Descending order (Z-A, 9-0), missing values last.
    Descending,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Direction::Ascending
    }
}

/// The single active sort key of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Id of the sorted column.
    pub by: String,
    pub direction: Direction,
}

impl SortState {
    pub fn new(by: impl Into<String>, direction: Direction) -> Self {
        Self {
            by: by.into(),
            direction,
        }
    }

    /// Ascending sort on a column.
    pub fn asc(by: impl Into<String>) -> Self {
        Self::new(by, Direction::Ascending)
    }

    /// Descending sort on a column.
    pub fn desc(by: impl Into<String>) -> Self {
        Self::new(by, Direction::Descending)
    }

    /// Same column, opposite direction.
    pub fn toggled(&self) -> Self {
        Self::new(self.by.clone(), self.direction.toggled())
    }
}

/// Ascending comparison of two raw cell values taken on their own.
///
/// Two numbers compare numerically. Anything else compares by its
/// case-insensitive text, where a missing value is the empty string and
/// therefore ranks lowest. A sort pass does not use this pairwise rule; it
/// picks one mode for the whole column, see [`sorted_indices`].
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let Some(ordering) = a.cmp_numeric(b) {
        return ordering;
    }
    a.sort_text().cmp(&b.sort_text())
}

/// How one sort pass orders its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortMode {
    /// Every non-null key is a number.
    Numeric,
    /// At least one key is text, a flag or a timestamp.
    Text,
}

impl SortMode {
    fn of<'a>(keys: impl IntoIterator<Item = &'a Value>) -> Self {
        let all_numeric = keys
            .into_iter()
            .filter(|v| !v.is_null())
            .all(Value::is_numeric);
        if all_numeric {
            SortMode::Numeric
        } else {
            SortMode::Text
        }
    }
}

/// Ascending order of two keys within a pass running in `mode`.
///
/// Null ranks lowest in both modes.
fn compare_keys(mode: SortMode, a: &(Value, String), b: &(Value, String)) -> Ordering {
    match mode {
        SortMode::Text => a.1.cmp(&b.1),
        SortMode::Numeric => match (a.0.is_null(), b.0.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.0.cmp_numeric(&b.0).unwrap_or(Ordering::Equal),
        },
    }
}

/// Returns `true` when `sort` names a sortable column.
pub fn is_valid_sort<R>(columns: &[Column<R>], sort: &SortState) -> bool {
    find_column(columns, &sort.by).is_some_and(Column::is_sortable)
}

/// Positions of `records` in sorted order.
///
/// The sort is stable: equal keys keep their input order in both
/// directions, so reversing the direction moves tie groups as blocks. When
/// `sort` names no sortable column the input order is returned.
///
/// The comparison mode is chosen once for the column: numeric when every
/// non-null value is a number, otherwise case-insensitive text for every
/// value. A column mixing `10` and `"5"` therefore sorts as text.
pub fn sorted_indices<R>(records: &[R], columns: &[Column<R>], sort: &SortState) -> Vec<usize> {
    sort_positions(records, (0..records.len()).collect(), columns, sort)
}

/// Sorts a subset of positions into `records`, as [`sorted_indices`] does.
pub(crate) fn sort_positions<R>(
    records: &[R],
    mut positions: Vec<usize>,
    columns: &[Column<R>],
    sort: &SortState,
) -> Vec<usize> {
    let Some(column) = find_column(columns, &sort.by) else {
        warn!("Sort column '{}' does not exist, keeping input order", sort.by);
        return positions;
    };
    if !column.is_sortable() {
        warn!("Column '{}' is not sortable, keeping input order", sort.by);
        return positions;
    }

    // Text keys are lower-cased once per row, not per comparison.
    let mut keyed: Vec<(usize, (Value, String))> = positions
        .drain(..)
        .map(|i| {
            let value = column.raw(&records[i]);
            let text = value.sort_text();
            (i, (value, text))
        })
        .collect();
    let mode = SortMode::of(keyed.iter().map(|(_, (value, _))| value));
    keyed.sort_by(|(_, a), (_, b)| {
        let ordering = compare_keys(mode, a, b);
        match sort.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Sorted view of `records`, borrowing from the input.
///
/// The input slice is left untouched.
pub fn sort_records<'a, R>(
    records: &'a [R],
    columns: &[Column<R>],
    sort: &SortState,
) -> Vec<&'a R> {
    sorted_indices(records, columns, sort)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}
