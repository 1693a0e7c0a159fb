//! Page state and page slicing.

/// Rows per page when a view does not configure its own size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Returns the number of pages needed for `len` items.
///
/// Never less than one: an empty table is still "page 1 of 1".
pub fn total_pages(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1)).max(1)
}

/// The active page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    index: usize,
    size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// Creates a state on the first page. A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        Self {
            index: 0,
            size: size.max(1),
        }
    }

    /// Sets the zero-based page index without clamping.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Returns the zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of pages for `len` items at this size.
    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.size)
    }

    /// Moves to `index`, clamped into the valid range for `len` items.
    ///
    /// Returns the resulting index.
    pub fn set_index(&mut self, index: usize, len: usize) -> usize {
        self.index = index.min(self.total_pages(len) - 1);
        self.index
    }

    /// Returns to the first page.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// One page of an ordered sequence plus its paging metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
    index: usize,
    size: usize,
    total_pages: usize,
    total_items: usize,
    start: usize,
}

impl<'a, T> Page<'a, T> {
    /// Returns the items on this page.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Returns the zero-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of pages (at least one).
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the number of items across all pages.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }

    /// Returns the 1-based inclusive item range shown on this page, as in
    /// "Showing 11-20 of 23". `None` for an empty page.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.start + 1, self.start + self.items.len()))
        }
    }
}

/// Slices `ordered` into the page described by `page`.
///
/// An index past the last page yields an empty slice; callers clamp before
/// calling.
pub fn compute_page<T>(ordered: &[T], page: PageState) -> Page<'_, T> {
    let len = ordered.len();
    let start = page.index.saturating_mul(page.size).min(len);
    let end = start.saturating_add(page.size).min(len);
    Page {
        items: &ordered[start..end],
        index: page.index,
        size: page.size,
        total_pages: total_pages(len, page.size),
        total_items: len,
        start,
    }
}
