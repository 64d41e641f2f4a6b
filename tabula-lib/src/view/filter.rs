//! Row filtering over rendered cell text.

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;
use serde::Deserialize;
use serde::Serialize;

use super::column::Column;

/// How a filter query is matched against a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Case-insensitive substring of any cell.
    #[default]
    Contains,
    /// Fuzzy match against the whole row text.
    Fuzzy,
}

/// A text filter applied before sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    query: String,
    mode: FilterMode,
}

impl Filter {
    pub fn new(query: impl Into<String>, mode: FilterMode) -> Self {
        Self {
            query: query.into(),
            mode,
        }
    }

    pub fn contains(query: impl Into<String>) -> Self {
        Self::new(query, FilterMode::Contains)
    }

    pub fn fuzzy(query: impl Into<String>) -> Self {
        Self::new(query, FilterMode::Fuzzy)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Returns `true` when the filter lets every row through.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// Positions of the records matching `filter`, in input order.
///
/// Cells are matched on their displayed text. An empty query matches
/// everything.
pub fn filter_indices<R>(records: &[R], columns: &[Column<R>], filter: &Filter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    match filter.mode {
        FilterMode::Contains => {
            let needle = filter.query.to_lowercase();
            records
                .iter()
                .enumerate()
                .filter(|(_, record)| {
                    columns
                        .iter()
                        .any(|c| c.display(record).to_lowercase().contains(&needle))
                })
                .map(|(index, _)| index)
                .collect()
        }
        FilterMode::Fuzzy => {
            let mut matcher = Matcher::new(Config::DEFAULT);
            let pattern = Pattern::new(
                &filter.query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            );
            let mut buf = Vec::new();
            records
                .iter()
                .enumerate()
                .filter(|(_, record)| {
                    let row_text = columns
                        .iter()
                        .map(|c| c.display(record))
                        .collect::<Vec<_>>()
                        .join(" ");
                    let haystack = Utf32Str::new(&row_text, &mut buf);
                    pattern.score(haystack, &mut matcher).is_some()
                })
                .map(|(index, _)| index)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn data() -> (Vec<Record>, Vec<Column<Record>>) {
        let records = vec![
            Record::new().set("name", "Apple Tithe").set("amount", 10i64),
            Record::new().set("name", "Banana Fund").set("amount", 25i64),
            Record::new().set("name", "Apricot Gift").set("amount", 125i64),
        ];
        let columns = vec![
            Column::field("name", "Name"),
            Column::field("amount", "Amount"),
        ];
        (records, columns)
    }

    #[test]
    fn empty_query_matches_all() {
        let (records, columns) = data();
        let all = filter_indices(&records, &columns, &Filter::contains("  "));
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn contains_is_case_insensitive_over_any_cell() {
        let (records, columns) = data();
        let hits = filter_indices(&records, &columns, &Filter::contains("FUND"));
        assert_eq!(hits, vec![1]);
        let hits = filter_indices(&records, &columns, &Filter::contains("25"));
        assert_eq!(hits, vec![1, 2]);
    }

    #[test]
    fn fuzzy_keeps_input_order() {
        let (records, columns) = data();
        let hits = filter_indices(&records, &columns, &Filter::fuzzy("ap"));
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn no_matches() {
        let (records, columns) = data();
        assert!(filter_indices(&records, &columns, &Filter::fuzzy("xyz")).is_empty());
    }
}
