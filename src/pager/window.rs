//! Page-number window for navigation controls.
//!
//! Shows up to `MAX_PAGE_BUTTONS` contiguous pages centred on the current
//! page, shifted to stay inside `[1, total_pages]`, with shortcuts to the
//! first and last page when they fall outside the window.

use std::ops::RangeInclusive;

/// Maximum number of page-number buttons in the window.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// One element of the rendered page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    end: usize,
    current_page: usize,
    total_pages: usize,
}

impl PageWindow {
    /// Compute the window. `current_page` is clamped into range first.
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        if total_pages == 0 {
            return Self {
                start: 1,
                end: 0,
                current_page: 1,
                total_pages: 0,
            };
        }

        let current = current_page.clamp(1, total_pages);
        let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
        let end = (start + MAX_PAGE_BUTTONS - 1).min(total_pages);

        // Clipped at the high end: slide left to keep a full window
        if end + 1 - start < MAX_PAGE_BUTTONS {
            start = (end + 1).saturating_sub(MAX_PAGE_BUTTONS).max(1);
        }

        Self {
            start,
            end,
            current_page: current,
            total_pages,
        }
    }

    /// Page numbers rendered as buttons. Empty when there are no pages.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Whether a shortcut to page 1 is shown before the window.
    pub fn shows_first(&self) -> bool {
        !self.is_empty() && self.start > 1
    }

    /// Whether pages are hidden between the first-page shortcut and the window.
    pub fn leading_ellipsis(&self) -> bool {
        !self.is_empty() && self.start > 2
    }

    /// Whether a shortcut to the last page is shown after the window.
    pub fn shows_last(&self) -> bool {
        !self.is_empty() && self.end < self.total_pages
    }

    /// Whether pages are hidden between the window and the last-page shortcut.
    pub fn trailing_ellipsis(&self) -> bool {
        !self.is_empty() && self.end + 1 < self.total_pages
    }

    /// Flatten into the ordered list of controls to render.
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(MAX_PAGE_BUTTONS + 4);

        if self.shows_first() {
            controls.push(PageControl::Page(1));
            if self.leading_ellipsis() {
                controls.push(PageControl::Ellipsis);
            }
        }

        controls.extend(self.pages().map(PageControl::Page));

        if self.shows_last() {
            if self.trailing_ellipsis() {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page(self.total_pages));
        }

        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::PageControl::{Ellipsis, Page};

    fn pages(window: &PageWindow) -> Vec<usize> {
        window.pages().collect()
    }

    #[test]
    fn test_window_at_start() {
        let window = PageWindow::new(1, 10);
        assert_eq!(pages(&window), vec![1, 2, 3, 4, 5]);
        assert!(!window.shows_first());
        assert!(!window.leading_ellipsis());
        assert!(window.trailing_ellipsis());
        assert_eq!(
            window.controls(),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_at_end() {
        let window = PageWindow::new(10, 10);
        assert_eq!(pages(&window), vec![6, 7, 8, 9, 10]);
        assert!(window.shows_first());
        assert!(window.leading_ellipsis());
        assert!(!window.shows_last());
        assert_eq!(
            window.controls(),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_centred() {
        let window = PageWindow::new(5, 10);
        assert_eq!(pages(&window), vec![3, 4, 5, 6, 7]);
        assert!(window.leading_ellipsis());
        assert!(window.trailing_ellipsis());
    }

    #[test]
    fn test_window_adjacent_shortcuts() {
        // Window 2..=6 of 7: shortcuts touch the window, no ellipsis
        let window = PageWindow::new(4, 7);
        assert_eq!(pages(&window), vec![2, 3, 4, 5, 6]);
        assert_eq!(
            window.controls(),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_window_fewer_pages_than_buttons() {
        let window = PageWindow::new(3, 3);
        assert_eq!(pages(&window), vec![1, 2, 3]);
        assert_eq!(window.controls(), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_window_no_pages() {
        let window = PageWindow::new(1, 0);
        assert!(window.is_empty());
        assert_eq!(pages(&window), Vec::<usize>::new());
        assert!(window.controls().is_empty());
    }

    #[test]
    fn test_window_clamps_current_page() {
        let window = PageWindow::new(42, 8);
        assert_eq!(window.current_page(), 8);
        assert_eq!(pages(&window), vec![4, 5, 6, 7, 8]);
    }
}
