//! Pagination Types
//!
//! Windowing arithmetic over a flat, ordered sequence.
//!
//! # Design
//!
//! - `PageSize` is either a fixed positive row count or `All`. Raw integers
//!   only appear at the boundary (`PageSize::from_raw`), where any value
//!   `<= 0` means `All`.
//! - `PaginationState` holds the current page and page size. It never looks
//!   at the data; callers pass the record count where it matters.
//! - Navigation actions compute a target page and an enabled flag from
//!   `(page, page_size, total_count)` only.
//!
//! Pages are never clamped against the record count: a page past the end
//! produces an empty window rather than an error.

use std::fmt;
use std::num::NonZeroUsize;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Rows per page used when nothing else is configured.
pub const DEFAULT_ROWS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(rows) => rows,
    None => unreachable!(),
};

// =============================================================================
// Page Size
// =============================================================================

/// Number of rows shown per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    /// A fixed number of rows.
    Fixed(NonZeroUsize),
    /// Every record on a single page.
    All,
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Fixed(DEFAULT_ROWS_PER_PAGE)
    }
}

impl PageSize {
    /// Page sizes offered in the rows-per-page selector.
    pub const OPTIONS: [Self; 4] = [
        Self::fixed_const(10),
        Self::fixed_const(25),
        Self::fixed_const(50),
        Self::All,
    ];

    const fn fixed_const(rows: usize) -> Self {
        match NonZeroUsize::new(rows) {
            Some(rows) => Self::Fixed(rows),
            None => Self::All,
        }
    }

    /// Convert a raw row count. Zero and negative values (conventionally
    /// `-1`) select `All`.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::All, Self::Fixed)
    }

    /// Fixed row count, `None` for `All`.
    #[must_use]
    pub const fn rows(self) -> Option<usize> {
        match self {
            Self::Fixed(rows) => Some(rows.get()),
            Self::All => None,
        }
    }

    /// Whether this is the show-everything size.
    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(rows) => write!(f, "{rows}"),
            Self::All => f.write_str("All"),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(rows) => {
                serializer.serialize_u64(u64::try_from(rows.get()).unwrap_or(u64::MAX))
            }
            Self::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PageSizeVisitor)
    }
}

/// Accepts a row count (`<= 0` means all) or the string `"all"`.
struct PageSizeVisitor;

impl Visitor<'_> for PageSizeVisitor {
    type Value = PageSize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a row count or \"all\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PageSize::from_raw(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PageSize::from_raw(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        trimmed
            .parse::<i64>()
            .map(PageSize::from_raw)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

// =============================================================================
// Window Arithmetic
// =============================================================================

/// The slice of `records` shown on `page`.
///
/// `All` returns the whole sequence. A page that starts at or past the end
/// returns an empty slice.
#[must_use]
pub fn visible_window<T>(records: &[T], page: usize, page_size: PageSize) -> &[T] {
    let Some(rows) = page_size.rows() else {
        return records;
    };

    let start = page.saturating_mul(rows);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(rows).min(records.len());
    &records[start..end]
}

/// Number of pages needed for `total_count` records, never less than one.
#[must_use]
pub fn page_count(total_count: usize, page_size: PageSize) -> usize {
    page_size
        .rows()
        .map_or(1, |rows| total_count.div_ceil(rows).max(1))
}

/// Index of the final page as the Last action computes it.
#[must_use]
pub fn last_page(total_count: usize, page_size: PageSize) -> usize {
    page_size
        .rows()
        .map_or(0, |rows| total_count.div_ceil(rows).saturating_sub(1))
}

// =============================================================================
// Pagination State
// =============================================================================

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationState {
    page: usize,
    page_size: PageSize,
}

impl PaginationState {
    /// Start on the first page with the given size.
    #[must_use]
    pub const fn new(page_size: PageSize) -> Self {
        Self { page: 0, page_size }
    }

    /// Zero-based current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Replace the page. No clamping against the record count is done here.
    /// Under `All` the page stays at 0.
    pub const fn set_page(&mut self, page: usize) -> Self {
        self.page = if self.page_size.is_all() { 0 } else { page };
        *self
    }

    /// Replace the page size and go back to the first page.
    pub const fn set_page_size(&mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self.page = 0;
        *self
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// One of the four pager buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationAction {
    /// Jump to the first page.
    First,
    /// Go back one page.
    Previous,
    /// Go forward one page.
    Next,
    /// Jump to the last page.
    Last,
}

impl NavigationAction {
    /// Actions in left-to-right layout order.
    pub const ALL: [Self; 4] = [Self::First, Self::Previous, Self::Next, Self::Last];

    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Last => "last",
        }
    }

    /// Page this action would move to.
    #[must_use]
    pub fn target_page(self, state: &PaginationState, total_count: usize) -> usize {
        match self {
            Self::First => 0,
            Self::Previous => state.page().saturating_sub(1),
            Self::Next => state.page().saturating_add(1),
            Self::Last => last_page(total_count, state.page_size()),
        }
    }

    /// Whether the button is clickable.
    #[must_use]
    pub fn is_enabled(self, state: &PaginationState, total_count: usize) -> bool {
        match self {
            Self::First | Self::Previous => state.page() > 0,
            Self::Next | Self::Last => {
                state.page().saturating_add(1) < page_count(total_count, state.page_size())
            }
        }
    }
}

/// Reading direction of the pager layout.
///
/// Only the order the buttons are laid out in depends on this; targets and
/// enabled flags do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left; the button row is mirrored.
    Rtl,
}

impl LayoutDirection {
    /// Parse direction from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "rtl" => Self::Rtl,
            _ => Self::Ltr,
        }
    }

    /// Get the direction name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Navigation actions in on-screen order.
    #[must_use]
    pub fn ordered_actions(self) -> [NavigationAction; 4] {
        let mut actions = NavigationAction::ALL;
        if self == Self::Rtl {
            actions.reverse();
        }
        actions
    }
}

// =============================================================================
// Controls
// =============================================================================

/// State of a single pager button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionControl {
    /// The action.
    pub action: NavigationAction,
    /// Whether it can be clicked.
    pub enabled: bool,
    /// Page it moves to when clicked.
    pub target_page: usize,
}

/// Everything the pager footer needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationControls {
    /// Zero-based current page.
    pub page: usize,
    /// Rows per page.
    pub page_size: PageSize,
    /// Total number of pages, at least one.
    pub page_count: usize,
    /// Number of records in the full sequence.
    pub total_count: usize,
    /// Displayed-rows label, e.g. `11–20 of 23`.
    pub range_label: String,
    /// Selectable page sizes.
    pub page_size_options: Vec<PageSize>,
    /// Pager buttons in layout order.
    pub actions: Vec<ActionControl>,
    /// Layout direction the actions are ordered for.
    pub direction: LayoutDirection,
}

impl PaginationControls {
    /// Build the footer state for `state` over `total_count` records.
    #[must_use]
    pub fn new(state: &PaginationState, total_count: usize, direction: LayoutDirection) -> Self {
        let actions = direction
            .ordered_actions()
            .into_iter()
            .map(|action| ActionControl {
                action,
                enabled: action.is_enabled(state, total_count),
                target_page: action.target_page(state, total_count),
            })
            .collect();

        Self {
            page: state.page(),
            page_size: state.page_size(),
            page_count: page_count(total_count, state.page_size()),
            total_count,
            range_label: range_label(state, total_count),
            page_size_options: PageSize::OPTIONS.to_vec(),
            actions,
            direction,
        }
    }

    /// Control for `action`, regardless of layout order.
    #[must_use]
    pub fn action(&self, action: NavigationAction) -> Option<&ActionControl> {
        self.actions.iter().find(|c| c.action == action)
    }
}

/// `"{from}–{to} of {total}"` for the rows currently shown.
///
/// Mirrors the table footer: `from` is 0 for an empty sequence, and a page
/// past the end yields `from > to`.
#[must_use]
pub fn range_label(state: &PaginationState, total_count: usize) -> String {
    let (from, to) = match state.page_size().rows() {
        _ if total_count == 0 => (0, 0),
        None => (1, total_count),
        Some(rows) => {
            let start = state.page().saturating_mul(rows);
            (
                start.saturating_add(1),
                start.saturating_add(rows).min(total_count),
            )
        }
    };
    format!("{from}\u{2013}{to} of {total_count}")
}
