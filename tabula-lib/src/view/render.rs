//! Render model of a table page, and a plain-text layout of it.

use unicode_width::UnicodeWidthStr;

use super::column::Alignment;
use super::sort::Direction;
use super::table::TableView;
use crate::model::RowKey;
use crate::model::TableRow;

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub align: Alignment,
    pub width: Option<u16>,
    pub sortable: bool,
    /// Direction when this is the sorted column.
    pub sort: Option<Direction>,
}

impl HeaderCell {
    /// Header text with the sort indicator.
    ///
    /// The indicator goes on the side away from the alignment edge so the
    /// label does not shift when sorting changes.
    pub fn text(&self) -> String {
        let Some(direction) = self.sort else {
            return self.label.clone();
        };
        let indicator = if direction.is_ascending() { "▲" } else { "▼" };
        match self.align {
            Alignment::Left => format!("{} {}", self.label, indicator),
            Alignment::Right => format!("{} {}", indicator, self.label),
            Alignment::Center => {
                let label_width = self.label.width();
                let width = self.width.map_or(label_width, usize::from);
                let left = width.saturating_sub(label_width) / 2;
                let right = width.saturating_sub(label_width) - left;
                if left >= right {
                    format!("{} {}", indicator, self.label)
                } else {
                    format!("{} {}", self.label, indicator)
                }
            }
        }
    }
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub key: RowKey,
    pub cells: Vec<String>,
}

/// Page controls state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFooter {
    pub page_index: usize,
    pub page_count: usize,
    /// Records across all pages after filtering.
    pub total: usize,
    /// One-based position of the first row shown; 0 when empty.
    pub first: usize,
    /// One-based position of the last row shown; 0 when empty.
    pub last: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageFooter {
    /// Page controls are hidden when there is at most one page.
    pub fn controls_visible(&self) -> bool {
        self.page_count > 1
    }

    /// `"41-45 of 45"`, or `"0 of 0"` for an empty view.
    pub fn summary(&self) -> String {
        if self.total == 0 || self.first == 0 {
            return format!("0 of {}", self.total);
        }
        format!("{}-{} of {}", self.first, self.last, self.total)
    }
}

/// Everything a host needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    pub footer: PageFooter,
}

impl RenderedTable {
    pub(crate) fn from_view<R: TableRow>(view: &TableView<R>) -> Self {
        let sort = view.sort_state();
        let headers = view
            .columns()
            .iter()
            .map(|column| HeaderCell {
                id: column.id().to_string(),
                label: column.label().to_string(),
                align: column.alignment(),
                width: column.fixed_width(),
                sortable: column.is_sortable(),
                sort: sort.filter(|s| s.by == column.id()).map(|s| s.direction),
            })
            .collect();

        let page = view.page();
        let rows = page
            .rows()
            .iter()
            .enumerate()
            .map(|(position, row)| RenderedRow {
                key: view
                    .row_key(position)
                    .unwrap_or(RowKey::Index(position)),
                cells: view.columns().iter().map(|c| c.display(row)).collect(),
            })
            .collect();

        let (first, last) = page.range().unwrap_or((0, 0));
        let footer = PageFooter {
            page_index: page.page_index(),
            page_count: page.page_count(),
            total: page.total(),
            first,
            last,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        };

        Self {
            headers,
            rows,
            footer,
        }
    }

    /// Returns `true` if the page shows no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lay the page out as aligned plain text.
    ///
    /// Columns with a fixed width are padded or cut to it; the others take
    /// the widest header or cell on the page.
    pub fn to_text(&self) -> String {
        let header_texts: Vec<String> = self.headers.iter().map(HeaderCell::text).collect();
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| match header.width {
                Some(width) => usize::from(width),
                None => self
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(header_texts[i].width()))
                    .max()
                    .unwrap_or(0),
            })
            .collect();

        let mut out = String::new();
        let header_line: Vec<String> = header_texts
            .iter()
            .zip(&self.headers)
            .zip(&widths)
            .map(|((text, header), &width)| align_cell(text, header.align, width))
            .collect();
        push_line(&mut out, &header_line.join("  "));

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_line(&mut out, &rule.join("  "));

        for row in &self.rows {
            let line: Vec<String> = row
                .cells
                .iter()
                .zip(&self.headers)
                .zip(&widths)
                .map(|((cell, header), &width)| align_cell(cell, header.align, width))
                .collect();
            push_line(&mut out, &line.join("  "));
        }

        if self.rows.is_empty() {
            push_line(&mut out, "(no records)");
        }
        if self.footer.controls_visible() {
            push_line(
                &mut out,
                &format!(
                    "{}  (page {}/{})",
                    self.footer.summary(),
                    self.footer.page_index + 1,
                    self.footer.page_count
                ),
            );
        } else {
            push_line(&mut out, &self.footer.summary());
        }
        out
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Pad or cut `text` to exactly `width` display columns.
fn align_cell(text: &str, align: Alignment, width: usize) -> String {
    let text = truncate(text, width);
    let pad = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(pad)),
        Alignment::Right => format!("{}{}", " ".repeat(pad), text),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
