//! Client-side pagination for filtered contract lists.
//!
//! Pages are 1-based. Out-of-range pages yield empty slices rather than
//! errors; callers keep the page index in range by resetting it whenever
//! the underlying list changes.

pub mod window;

pub use window::{PageControl, PageWindow, MAX_PAGE_BUTTONS};

/// Rows per page in the chain tables.
pub const ITEMS_PER_PAGE: usize = 20;

/// Slices a list into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    items_per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl Pager {
    /// Create a pager. A page size of zero is treated as one.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Number of pages needed for `len` items; 0 when there are none.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.items_per_page)
    }

    /// The items on `current_page`. Page 0 and pages past the end are empty.
    pub fn page<'a, T>(&self, items: &'a [T], current_page: usize) -> &'a [T] {
        if current_page == 0 {
            return &[];
        }
        let len = items.len();
        let start = (current_page - 1)
            .saturating_mul(self.items_per_page)
            .min(len);
        let end = start.saturating_add(self.items_per_page).min(len);
        &items[start..end]
    }

    /// Navigation window for `current_page` out of `total_pages`.
    pub fn window(&self, current_page: usize, total_pages: usize) -> PageWindow {
        PageWindow::new(current_page, total_pages)
    }
}

/// 1-based page index, reset to the first page on any upstream change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    pager: Pager,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(Pager::default())
    }
}

impl PageState {
    pub fn new(pager: Pager) -> Self {
        Self {
            current_page: 1,
            pager,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    /// Go back to page 1. Returns whether the page changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.current_page != 1;
        self.current_page = 1;
        changed
    }

    /// Move to `page`, clamped to `[1, max(total_pages, 1)]`.
    pub fn set(&mut self, page: usize, total_pages: usize) -> usize {
        self.current_page = page.clamp(1, total_pages.max(1));
        self.current_page
    }

    pub fn next(&mut self, total_pages: usize) -> usize {
        self.set(self.current_page.saturating_add(1), total_pages)
    }

    pub fn previous(&mut self, total_pages: usize) -> usize {
        self.set(self.current_page.saturating_sub(1), total_pages)
    }
}
