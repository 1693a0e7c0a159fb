//! Render model produced by [`TableView::render`](super::TableView::render).
//!
//! The render model is plain data. Front ends (the CLI text renderer, or any
//! UI layer) turn it into pixels or characters.

use super::column::Cell;
use super::sort::Direction;

/// Message shown when the current page has no rows.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No records found.";

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether a click on this header sorts.
    pub sortable: bool,
    /// Direction if the table is sorted by this column.
    pub sorted: Option<Direction>,
}

impl HeaderCell {
    /// Header text followed by the sort indicator, if sorted.
    pub fn title(&self) -> String {
        match self.sorted {
            Some(direction) => format!("{} {}", self.label, direction.indicator()),
            None => self.label.clone(),
        }
    }
}

/// Render key of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Value of the identity field.
    Id(String),
    /// Position in the ordered rows. Not stable across re-sorts.
    Index(usize),
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Render key.
    pub key: RowKey,
    /// One cell per declared column.
    pub cells: Vec<Cell>,
    /// Whether clicking the row invokes the row handler.
    pub interactive: bool,
}

/// Table body: data rows, or the empty-state placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// The rows of the current page.
    Rows(Vec<RenderedRow>),
    /// A single full-width message row.
    Empty {
        /// Message text.
        message: String,
        /// Number of columns the message spans.
        colspan: usize,
    },
}

/// Paging metadata for pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Zero-based current page.
    pub index: usize,
    /// Total pages, at least one.
    pub total_pages: usize,
    /// Rows across all pages.
    pub total_items: usize,
    /// 1-based inclusive range of rows on the current page.
    pub range: Option<(usize, usize)>,
}

impl Pager {
    /// Returns `true` if there is more than one page.
    pub fn needs_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }

    /// Summary line, e.g. `Showing 11–20 of 23 · page 2 of 3`.
    pub fn summary(&self) -> String {
        match self.range {
            Some((start, end)) => format!(
                "Showing {}–{} of {} · page {} of {}",
                start,
                end,
                self.total_items,
                self.index + 1,
                self.total_pages
            ),
            None => format!(
                "Showing 0 of {} · page {} of {}",
                self.total_items,
                self.index + 1,
                self.total_pages
            ),
        }
    }
}

/// A fully rendered table page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// Column headers in declaration order.
    pub header: Vec<HeaderCell>,
    /// Body rows or the empty placeholder.
    pub body: Body,
    /// Paging metadata.
    pub pager: Pager,
}

impl RenderedTable {
    /// Returns the data rows, empty when the placeholder is shown.
    pub fn rows(&self) -> &[RenderedRow] {
        match &self.body {
            Body::Rows(rows) => rows,
            Body::Empty { .. } => &[],
        }
    }

    /// Returns `true` if the empty-state placeholder is shown.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, Body::Empty { .. })
    }
}

/// Where a click landed within a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere on the row outside interactive cell content.
    Row,
    /// On the content of the cell in the given column.
    Cell(usize),
}

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The row handler was invoked.
    Row,
    /// An interactive cell owned the click; the row handler was not invoked.
    Action(Cell),
    /// Nothing handles this click.
    Ignored,
}
