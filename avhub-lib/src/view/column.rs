//! Column descriptors and cell content.

use std::fmt;
use std::sync::Arc;

use crate::model::Record;
use crate::model::Value;

/// Shown in place of null, absent and empty values.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Presentation content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// Short label shown as a chip (statuses, severities).
    Badge(String),
    /// Hyperlink. Clicking it does not activate the row.
    Link {
        /// Visible text.
        label: String,
        /// Target URL.
        href: String,
    },
    /// No value.
    Placeholder,
}

impl Cell {
    /// Creates a text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a badge cell.
    pub fn badge(label: impl Into<String>) -> Self {
        Self::Badge(label.into())
    }

    /// Creates a link cell.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Returns `true` if this cell owns clicks made on it.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// Returns the visible text of this cell.
    pub fn label(&self) -> &str {
        match self {
            Self::Text(s) | Self::Badge(s) => s,
            Self::Link { label, .. } => label,
            Self::Placeholder => PLACEHOLDER,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Custom cell renderer: receives the whole row and the column's value.
pub type Renderer = Arc<dyn Fn(&Record, &Value) -> Cell + Send + Sync>;

/// Describes how one field of a row is extracted and presented.
///
/// Columns are sortable unless marked otherwise.
///
/// # Examples
///
/// ```
/// use avhub_lib::view::{Cell, Column};
///
/// let columns = vec![
///     Column::new("title", "Title"),
///     Column::new("status", "Status").render(|_, v| Cell::badge(v.to_string())),
///     Column::new("source_url", "Source")
///         .unsortable()
///         .render(|_, v| Cell::link("Link", v.to_string())),
/// ];
/// assert!(!columns[2].sortable);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Field name projected from each row.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    render: Option<Renderer>,
}

impl Column {
    /// Creates a sortable column showing the raw field value.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            render: None,
        }
    }

    /// Disables sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Sets a custom renderer. Its output is used verbatim.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record, &Value) -> Cell + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Returns `true` if a custom renderer is set.
    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    /// Produces the cell for `record`.
    pub fn cell(&self, record: &Record) -> Cell {
        let value = record.value(&self.key);
        match &self.render {
            Some(render) => render(record, value),
            None if value.is_empty() => Cell::Placeholder,
            None => Cell::Text(value.to_string()),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_and_placeholder() {
        let column = Column::new("city", "City");
        assert_eq!(column.cell(&Record::new().set("city", "Austin")), Cell::text("Austin"));
        assert_eq!(column.cell(&Record::new().set("city", "")), Cell::Placeholder);
        assert_eq!(column.cell(&Record::new()), Cell::Placeholder);
        assert_eq!(Cell::Placeholder.label(), "—");
    }

    #[test]
    fn test_renderer_sees_row_and_value() {
        let column = Column::new("city", "Location")
            .render(|row, v| Cell::text(format!("{}, {}", v, row.value("state"))));
        let record = Record::new().set("city", "Austin").set("state", "TX");
        assert_eq!(column.cell(&record), Cell::text("Austin, TX"));
    }

    #[test]
    fn test_renderer_output_is_not_replaced() {
        let column = Column::new("missing", "X").render(|_, _| Cell::text(""));
        assert_eq!(column.cell(&Record::new()), Cell::text(""));
    }
}
