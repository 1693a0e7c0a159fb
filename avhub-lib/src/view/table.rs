//! The tabular view engine.

use std::fmt;
use std::sync::Arc;

use super::column::Column;
use super::page::Page;
use super::page::PageState;
use super::page::compute_page;
use super::render::Body;
use super::render::ClickOutcome;
use super::render::ClickTarget;
use super::render::DEFAULT_EMPTY_MESSAGE;
use super::render::HeaderCell;
use super::render::Pager;
use super::render::RenderedRow;
use super::render::RenderedTable;
use super::render::RowKey;
use super::sort::SortState;
use super::sort::order_indices;
use crate::model::Record;

/// Callback invoked with the full record when a row is clicked.
pub type RowHandler = Arc<dyn Fn(&Record) + Send + Sync>;

/// Field used as the render key unless configured otherwise.
pub const DEFAULT_IDENTITY_FIELD: &str = "id";

/// Sorted, paginated view over a set of rows.
///
/// `TableView` owns sort and page state for one view. The rows are shared
/// with whoever fetched them and are never mutated. Every mutation recomputes
/// the display order synchronously.
///
/// - Replacing the rows or changing the sort returns to the first page.
/// - Page navigation is clamped to the existing pages.
/// - Missing fields and unknown columns render the placeholder.
///
/// # Example
///
/// ```
/// use avhub_lib::model::Record;
/// use avhub_lib::view::{Column, TableView};
///
/// let mut table = TableView::new(vec![Column::new("name", "Name")]).with_page_size(2);
/// table.set_rows(vec![
///     Record::new().set("name", "c"),
///     Record::new().set("name", "a"),
///     Record::new().set("name", "b"),
/// ]);
///
/// table.set_sort("name");
/// let names: Vec<_> = table.page_rows().iter().map(|r| r.value("name").to_string()).collect();
/// assert_eq!(names, ["a", "b"]);
/// assert_eq!(table.total_pages(), 2);
/// ```
#[derive(Clone)]
pub struct TableView {
    columns: Vec<Column>,
    rows: Arc<[Record]>,
    order: Vec<usize>,
    sort: SortState,
    page: PageState,
    identity_field: String,
    empty_message: String,
    on_row_click: Option<RowHandler>,
}

impl TableView {
    /// Creates an empty view with the given columns and default settings.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Arc::from(Vec::<Record>::new()),
            order: Vec::new(),
            sort: SortState::none(),
            page: PageState::default(),
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            on_row_click: None,
        }
    }

    /// Sets the page size. Zero is treated as one.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page = PageState::new(size);
        self
    }

    /// Sets the field used as row render key.
    pub fn with_identity_field(mut self, field: impl Into<String>) -> Self {
        self.identity_field = field.into();
        self
    }

    /// Sets the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Makes every row interactive, invoking `handler` on click.
    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Record) + Send + Sync + 'static,
    {
        self.on_row_click = Some(Arc::new(handler));
        self
    }

    // =========================================================================
    // Columns and rows
    // =========================================================================

    /// Returns the column descriptors.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the rows in input order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces the row set and returns to the first page.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[Record]>>) {
        self.rows = rows.into();
        self.page.reset();
        self.recompute();
    }

    /// Removes all rows.
    pub fn clear(&mut self) {
        self.set_rows(Vec::<Record>::new());
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Returns the sort state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Header click on `column_key`.
    ///
    /// Unknown and non-sortable columns are ignored. The same key flips the
    /// direction; a new key sorts ascending. Returns `true` if the sort
    /// changed, in which case the view is back on the first page.
    pub fn set_sort(&mut self, column_key: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key == column_key && c.sortable);
        if !sortable {
            return false;
        }
        self.sort.toggle(column_key);
        self.page.reset();
        self.recompute();
        true
    }

    /// Header click by column position.
    pub fn click_header(&mut self, column_index: usize) -> bool {
        match self.columns.get(column_index) {
            Some(column) => {
                let key = column.key.clone();
                self.set_sort(&key)
            }
            None => false,
        }
    }

    /// Returns to input order and the first page.
    pub fn clear_sort(&mut self) {
        self.sort = SortState::none();
        self.page.reset();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.order = order_indices(&self.rows, &self.sort);
    }

    /// Returns all rows in display order.
    pub fn ordered_rows(&self) -> Vec<&Record> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Returns the page state.
    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Returns the number of pages, at least one.
    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.rows.len())
    }

    /// Moves to page `n`, clamped to the existing pages. Returns the new index.
    pub fn set_page(&mut self, n: usize) -> usize {
        self.page.set_index(n, self.rows.len())
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let current = self.page.index();
        self.set_page(current + 1) != current
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        let current = self.page.index();
        current > 0 && self.set_page(current - 1) != current
    }

    fn current_page(&self) -> Page<'_, usize> {
        compute_page(&self.order, self.page)
    }

    /// Returns the rows of the current page in display order.
    pub fn page_rows(&self) -> Vec<&Record> {
        self.current_page()
            .items()
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Returns paging metadata for the current page.
    pub fn pager(&self) -> Pager {
        let page = self.current_page();
        Pager {
            index: page.index(),
            total_pages: page.total_pages(),
            total_items: page.total_items(),
            range: page.display_range(),
        }
    }

    // =========================================================================
    // Rendering and interaction
    // =========================================================================

    /// Renders the current page.
    pub fn render(&self) -> RenderedTable {
        let header = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                label: c.label.clone(),
                sortable: c.sortable,
                sorted: self.sort.direction_for(&c.key),
            })
            .collect();

        let page = self.current_page();
        let offset = page.index() * page.size();
        let body = if page.is_empty() {
            Body::Empty {
                message: self.empty_message.clone(),
                colspan: self.columns.len().max(1),
            }
        } else {
            let interactive = self.on_row_click.is_some();
            let rows = page
                .items()
                .iter()
                .enumerate()
                .map(|(position, &i)| {
                    let record = &self.rows[i];
                    RenderedRow {
                        key: record
                            .key(&self.identity_field)
                            .map(RowKey::Id)
                            .unwrap_or(RowKey::Index(offset + position)),
                        cells: self.columns.iter().map(|c| c.cell(record)).collect(),
                        interactive,
                    }
                })
                .collect();
            Body::Rows(rows)
        };

        RenderedTable {
            header,
            body,
            pager: self.pager(),
        }
    }

    /// Dispatches a click on row `row` of the current page.
    ///
    /// Interactive cell content owns its click before the row does: a click on
    /// a link cell returns [`ClickOutcome::Action`] and the row handler is not
    /// invoked.
    pub fn click(&self, row: usize, target: ClickTarget) -> ClickOutcome {
        let page = self.current_page();
        let Some(&i) = page.items().get(row) else {
            return ClickOutcome::Ignored;
        };
        let record = &self.rows[i];

        if let ClickTarget::Cell(column) = target
            && let Some(column) = self.columns.get(column)
        {
            let cell = column.cell(record);
            if cell.is_interactive() {
                return ClickOutcome::Action(cell);
            }
        }

        match &self.on_row_click {
            Some(handler) => {
                handler(record);
                ClickOutcome::Row
            }
            None => ClickOutcome::Ignored,
        }
    }
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("identity_field", &self.identity_field)
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Cell;

    fn numbered(n: usize) -> Vec<Record> {
        (0..n).map(|i| Record::new().set("n", i as i64)).collect()
    }

    #[test]
    fn test_next_and_prev_page() {
        let mut table = TableView::new(vec![Column::new("n", "N")]);
        table.set_rows(numbered(15));
        assert!(!table.prev_page());
        assert!(table.next_page());
        assert!(!table.next_page());
        assert_eq!(table.page_state().index(), 1);
        assert!(table.prev_page());
        assert_eq!(table.page_state().index(), 0);
    }

    #[test]
    fn test_positional_keys_without_identity() {
        let mut table = TableView::new(vec![Column::new("n", "N")]).with_page_size(5);
        table.set_rows(numbered(7));
        table.set_page(1);
        let rendered = table.render();
        let keys: Vec<_> = rendered.rows().iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, vec![RowKey::Index(5), RowKey::Index(6)]);
    }

    #[test]
    fn test_identity_keys() {
        let mut table = TableView::new(vec![Column::new("n", "N")]);
        table.set_rows(vec![Record::new().set("id", 42i64)]);
        assert_eq!(table.render().rows()[0].key, RowKey::Id("42".into()));
    }

    #[test]
    fn test_unknown_column_renders_placeholder() {
        let mut table = TableView::new(vec![Column::new("nope", "Nope")]);
        table.set_rows(numbered(1));
        assert_eq!(table.render().rows()[0].cells, vec![Cell::Placeholder]);
    }

    #[test]
    fn test_click_header_by_index() {
        let mut table = TableView::new(vec![Column::new("n", "N")]);
        assert!(table.click_header(0));
        assert_eq!(table.sort(), &SortState::asc("n"));
        assert!(!table.click_header(3));
    }

    #[test]
    fn test_clear_sort_restores_input_order() {
        let mut table = TableView::new(vec![Column::new("n", "N")]);
        table.set_rows(numbered(3));
        table.set_sort("n");
        table.set_sort("n");
        table.clear_sort();
        let values: Vec<_> = table.ordered_rows().iter().map(|r| r.value("n").to_string()).collect();
        assert_eq!(values, ["0", "1", "2"]);
    }
}
