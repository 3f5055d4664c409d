//! Paginated View
//!
//! Owns the full record sequence and the pagination state, and derives the
//! visible window and pager controls from them. The view does no I/O.
//!
//! Replacing the record sequence keeps the current page as it is, even if
//! the new sequence is shorter. The window for a page that no longer exists
//! is simply empty.

use crate::domain::market::MarketRecord;
use crate::domain::pagination::{
    self, LayoutDirection, NavigationAction, PageSize, PaginationControls, PaginationState,
};

/// A record sequence windowed into pages.
///
/// # Example
///
/// ```rust
/// use market_board::domain::market::MarketRecord;
/// use market_board::domain::pagination::{NavigationAction, PageSize};
/// use market_board::domain::view::PaginatedView;
///
/// let records = (0..23)
///     .map(|i| MarketRecord::new(format!("coin-{i}"), format!("Coin {i}"), "c"))
///     .collect();
///
/// let mut view = PaginatedView::new(PageSize::default());
/// view.replace_records(records);
///
/// assert!(view.navigate(NavigationAction::Last));
/// assert_eq!(view.state().page(), 2);
/// assert_eq!(view.visible_window().len(), 3);
/// assert!(!view.navigate(NavigationAction::Next));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaginatedView {
    records: Vec<MarketRecord>,
    state: PaginationState,
}

impl PaginatedView {
    /// Create an empty view on the first page.
    #[must_use]
    pub const fn new(page_size: PageSize) -> Self {
        Self {
            records: Vec::new(),
            state: PaginationState::new(page_size),
        }
    }

    /// Current pagination state.
    #[must_use]
    pub const fn state(&self) -> PaginationState {
        self.state
    }

    /// Number of records in the full sequence.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// Records on the current page.
    #[must_use]
    pub fn visible_window(&self) -> &[MarketRecord] {
        pagination::visible_window(&self.records, self.state.page(), self.state.page_size())
    }

    /// Number of pages, at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        pagination::page_count(self.records.len(), self.state.page_size())
    }

    /// Replace the whole sequence. The page is left untouched.
    pub fn replace_records(&mut self, records: Vec<MarketRecord>) {
        self.records = records;
    }

    /// Move to `page` without clamping.
    pub const fn set_page(&mut self, page: usize) -> PaginationState {
        self.state.set_page(page)
    }

    /// Change rows per page and return to the first page.
    pub const fn set_page_size(&mut self, page_size: PageSize) -> PaginationState {
        self.state.set_page_size(page_size)
    }

    /// Run a pager action if it is enabled.
    ///
    /// Returns `false` and leaves the state alone when the button would be
    /// disabled.
    pub fn navigate(&mut self, action: NavigationAction) -> bool {
        let total = self.records.len();
        if !action.is_enabled(&self.state, total) {
            return false;
        }
        let target = action.target_page(&self.state, total);
        self.state.set_page(target);
        true
    }

    /// Footer controls for the current state.
    #[must_use]
    pub fn controls(&self, direction: LayoutDirection) -> PaginationControls {
        PaginationControls::new(&self.state, self.records.len(), direction)
    }
}
