//! Page window computation for paginated listings.

use serde::Serialize;

/// Pages shown on each side of the current page in the rendered window.
const WINDOW_RADIUS: u64 = 2;

/// Pagination inputs for a single render, owned by the caller.
///
/// A `PageState` is constructed fresh per request from caller data and holds
/// nothing between renders. `current_page` is taken as supplied, including
/// stale or out-of-range values; derivations clamp for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: u64,
    total_items: u64,
    items_per_page: u64,
}

impl PageState {
    /// Creates pagination state for one render.
    ///
    /// `items_per_page` must be at least 1; a zero value is a caller bug and
    /// trips an assertion in debug builds.
    pub fn new(current_page: u64, total_items: u64, items_per_page: u64) -> Self {
        debug_assert!(items_per_page >= 1, "items_per_page must be at least 1");
        Self {
            current_page,
            total_items,
            items_per_page,
        }
    }

    /// The page number as supplied by the caller, unmodified.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    /// Total number of pages, never less than 1 even for an empty listing.
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    /// The current page clamped into `[1, total_pages]`, for display.
    pub fn display_page(&self) -> u64 {
        self.current_page.clamp(1, self.total_pages())
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Computes the renderable description of the pagination control.
    ///
    /// The window is a contiguous run of page numbers centered on the display
    /// page and clamped into `[1, total_pages]`; the display page is always a
    /// member. Gap flags mark truncation at either end. Read-only; never
    /// panics for an out-of-range `current_page`.
    pub fn view(&self) -> PaginationView {
        let total_pages = self.total_pages();
        let display = self.display_page();

        let start = display.saturating_sub(WINDOW_RADIUS).max(1);
        let end = (display + WINDOW_RADIUS).min(total_pages);

        PaginationView {
            current_page: self.current_page,
            display_page: display,
            total_pages,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
            pages: (start..=end).collect(),
            leading_gap: start > 1,
            trailing_gap: end < total_pages,
        }
    }
}

/// Read-only description of a pagination control for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    /// The page number the caller supplied, unmodified.
    pub current_page: u64,
    /// The page marked as selected, clamped into `[1, total_pages]`.
    pub display_page: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// Contiguous window of page numbers to render.
    pub pages: Vec<u64>,
    /// Pages exist before the window.
    pub leading_gap: bool,
    /// Pages exist after the window.
    pub trailing_gap: bool,
}
