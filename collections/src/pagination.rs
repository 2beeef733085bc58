//! Client-side pagination

use std::num::NonZeroUsize;

/// Records per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// One entry of the page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    /// 1-based page number
    pub page: usize,
    /// Whether this is the current page
    pub current: bool,
}

/// Page position over a source list
///
/// `start` always equals `(current_page - 1) * page_size`. The page itself is
/// computed by [`Pagination::paginate`], which also repairs a stale page
/// number after the source shrank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    start: usize,
    page_size: NonZeroUsize,
    current_page: usize,
}

impl Pagination {
    /// First page with the given page size
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            start: 0,
            page_size,
            current_page: 1,
        }
    }

    /// Offset of the first record on the current page
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Records per page
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// 1-based current page
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    const fn sync_start(&mut self) {
        self.start = (self.current_page - 1).saturating_mul(self.page_size.get());
    }

    fn window<T: Clone>(&self, source: &[T]) -> Vec<T> {
        source
            .iter()
            .skip(self.start)
            .take(self.page_size.get())
            .cloned()
            .collect()
    }

    /// Take the current page out of `source`
    ///
    /// When the page is empty and we are past page 1, resets to page 1 and
    /// returns the first page instead.
    pub fn paginate<T: Clone>(&mut self, source: &[T]) -> Vec<T> {
        let page = self.window(source);
        if page.is_empty() && self.current_page > 1 {
            tracing::debug!(
                stale_page = self.current_page,
                source_len = source.len(),
                "Page out of range, resetting to first page"
            );
            self.go_to_first_page();
            return self.window(source);
        }
        page
    }

    /// Change the page size, keeping the current page number
    pub const fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.sync_start();
    }

    /// Jump to page `page` (pages below 1 are treated as 1)
    ///
    /// There is no upper clamp here. [`Pagination::paginate`] resets a page
    /// past the end.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.max(1);
        self.sync_start();
    }

    /// Step back one page, stopping at page 1
    pub fn go_to_prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Step forward one page
    pub fn go_to_next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    /// Jump to page 1
    pub const fn go_to_first_page(&mut self) {
        self.current_page = 1;
        self.start = 0;
    }

    /// Jump to the last page of a source with `len` records
    pub fn go_to_last_page(&mut self, len: usize) {
        self.go_to_page(self.total_pages(len));
    }

    /// Pages needed for `len` records
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size.get())
    }

    /// Page selector entries for `len` records
    #[must_use]
    pub fn pages(&self, len: usize) -> Vec<PageLink> {
        (1..=self.total_pages(len))
            .map(|page| PageLink {
                page,
                current: page == self.current_page,
            })
            .collect()
    }

    /// Previous page number, or `None` on page 1
    #[must_use]
    pub const fn prev_page(&self) -> Option<usize> {
        if self.current_page > 1 {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// Next page number, or `None` on the last page
    #[must_use]
    pub const fn next_page(&self, len: usize) -> Option<usize> {
        if self.current_page < self.total_pages(len) {
            Some(self.current_page + 1)
        } else {
            None
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination transitions shared by every listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationAction {
    /// Change the page size
    SetPageSize(NonZeroUsize),
    /// Jump to a page
    GoToPage(usize),
    /// One page back
    PrevPage,
    /// One page forward
    NextPage,
    /// First page
    FirstPage,
    /// Last page
    LastPage,
}
