//! Page math for paginated tables.
//!
//! Pages are 1-based. Every requested page is clamped into
//! `[1, max(1, total_pages)]`; nothing here returns an error.

use std::ops::Range;

use log::trace;

/// Default number of page buttons shown around the current page.
pub const DEFAULT_WINDOW: usize = 5;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `count` rows. Zero rows need zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(requested: isize, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    if requested < 1 {
        1
    } else {
        (requested as usize).min(last)
    }
}

/// Index range of `page` within a list of `count` rows.
///
/// Pages past the end yield an empty range at `count`.
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// Page numbers to show as buttons.
///
/// At most `width` pages, centered on `current` and clamped to
/// `[1, total_pages]`. Near either end the window shifts instead of
/// shrinking, so page 1 of 20 shows `1..=5` and page 20 shows `16..=20`.
/// With fewer than `width` pages, every page is shown.
pub fn page_window(total_pages: usize, current: usize, width: usize) -> Vec<usize> {
    let total = total_pages.max(1);
    let width = width.max(1).min(total);
    let current = current.clamp(1, total);

    let half = width / 2;
    let mut start = current.saturating_sub(half).max(1);
    if start + width - 1 > total {
        start = total + 1 - width;
    }
    (start..start + width).collect()
}

/// Page size and current page of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Starts at page 1. A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to `requested`, clamped against `total_pages`.
    /// Returns the page actually applied.
    pub fn go_to(&mut self, requested: isize, total_pages: usize) -> usize {
        let page = clamp_page(requested, total_pages);
        if page as isize != requested {
            trace!("page {} clamped to {} of {}", requested, page, total_pages);
        }
        self.current_page = page;
        page
    }

    /// Re-clamps the current page after the row count changed.
    pub fn reclamp(&mut self, total_pages: usize) -> usize {
        self.go_to(self.current_page as isize, total_pages)
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Index range of the current page within `count` rows.
    pub fn bounds(&self, count: usize) -> Range<usize> {
        page_bounds(self.current_page, self.page_size, count)
    }
}
