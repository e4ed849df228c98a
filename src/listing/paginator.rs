//! Page state for browsing search results.

use std::ops::Range;

/// Default postings per page.
pub const DEFAULT_PER_PAGE: usize = 5;

/// 1-based page cursor over a result list.
///
/// Movement never leaves `1..=total_pages`; with no results the cursor
/// stays on page 1 and every slice is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    per_page: usize,
    current_page: usize,
}

impl Paginator {
    /// Start on page 1. A zero `per_page` is treated as 1.
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            total_items,
            per_page: per_page.max(1),
            current_page: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[allow(dead_code)] // Accessor for interactive front ends
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Advance one page. Returns false at the last page.
    #[allow(dead_code)] // Interactive paging; the CLI jumps with go_to
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false at page 1.
    #[allow(dead_code)] // Interactive paging; the CLI jumps with go_to
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page` if it exists.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    /// New result set: back to page 1.
    #[allow(dead_code)] // Interactive paging; the CLI builds a fresh pager per command
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 1;
    }

    /// Index range of the current page, clamped to the list.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    /// The current page of `items`.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}
