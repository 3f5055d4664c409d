//! Market Board Service
//!
//! Owns one [`PaginatedView`] together with the status of the one-shot
//! market fetch. Every UI action takes the board lock for a single state
//! update and renders the snapshot under the same lock, so actions are
//! applied strictly one after another.
//!
//! The fetch runs at most once per board. A failed fetch leaves the record
//! sequence as it was and is not retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::application::dto::{BoardSnapshotDto, LoadStatusDto, MarketRowDto};
use crate::application::ports::{MarketDataError, MarketDataPort, MarketsQuery};
use crate::domain::market::MarketRecord;
use crate::domain::pagination::{LayoutDirection, NavigationAction, PageSize};
use crate::domain::view::PaginatedView;

/// Board construction settings.
#[derive(Debug, Clone, Default)]
pub struct BoardSettings {
    /// Request parameters for the market fetch.
    pub query: MarketsQuery,
    /// Page size the board starts with.
    pub default_page_size: PageSize,
    /// Pager layout direction.
    pub direction: LayoutDirection,
}

/// Progress of the one-shot market fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Fetch not started yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Records replaced by a successful fetch.
    Loaded {
        /// Number of records received.
        count: usize,
        /// When the records arrived.
        loaded_at: DateTime<Utc>,
    },
    /// Fetch failed; the previous records stay in place.
    Failed {
        /// Why the fetch failed.
        error: MarketDataError,
    },
}

impl LoadStatus {
    /// Get the status name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded { .. } => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}

impl From<&LoadStatus> for LoadStatusDto {
    fn from(status: &LoadStatus) -> Self {
        match status {
            LoadStatus::Idle => Self::Idle,
            LoadStatus::Loading => Self::Loading,
            LoadStatus::Loaded { count, loaded_at } => Self::Loaded {
                count: *count,
                loaded_at: *loaded_at,
            },
            LoadStatus::Failed { error } => Self::Failed {
                error: error.to_string(),
            },
        }
    }
}

/// Result of a pager action.
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    /// Whether the action was enabled and applied.
    pub applied: bool,
    /// Board after the action.
    pub snapshot: BoardSnapshotDto,
}

#[derive(Debug)]
struct BoardInner {
    view: PaginatedView,
    status: LoadStatus,
}

/// The paginated market board.
pub struct MarketBoard<P: MarketDataPort> {
    source: Arc<P>,
    query: MarketsQuery,
    direction: LayoutDirection,
    inner: Mutex<BoardInner>,
    load_started: AtomicBool,
}

impl<P: MarketDataPort> std::fmt::Debug for MarketBoard<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MarketBoard")
            .field("vs_currency", &self.query.vs_currency)
            .field("direction", &self.direction)
            .field("status", &inner.status.as_str())
            .field("records", &inner.view.total_count())
            .finish_non_exhaustive()
    }
}

impl<P: MarketDataPort> MarketBoard<P> {
    /// Create an empty board. Nothing is fetched until [`Self::load`].
    #[must_use]
    pub fn new(source: Arc<P>, settings: BoardSettings) -> Self {
        Self {
            source,
            query: settings.query,
            direction: settings.direction,
            inner: Mutex::new(BoardInner {
                view: PaginatedView::new(settings.default_page_size),
                status: LoadStatus::Idle,
            }),
            load_started: AtomicBool::new(false),
        }
    }

    /// Fetch the market list and replace the record sequence.
    ///
    /// Only the first call fetches; later calls return `false` immediately.
    /// The current page is kept when the records arrive.
    pub async fn load(&self) -> bool {
        if self.load_started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Market fetch already started, ignoring");
            return false;
        }

        self.inner.lock().status = LoadStatus::Loading;
        tracing::info!(vs_currency = %self.query.vs_currency, "Fetching market list");

        let result = self.source.fetch_markets(&self.query).await;
        self.apply_fetch(result);
        true
    }

    fn apply_fetch(&self, result: Result<Vec<MarketRecord>, MarketDataError>) {
        let mut inner = self.inner.lock();
        match result {
            Ok(records) => {
                let count = records.len();
                inner.view.replace_records(records);
                inner.status = LoadStatus::Loaded {
                    count,
                    loaded_at: Utc::now(),
                };
                tracing::info!(
                    count,
                    page = inner.view.state().page(),
                    page_count = inner.view.page_count(),
                    "Market list loaded"
                );
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    kept_records = inner.view.total_count(),
                    "Market list fetch failed"
                );
                inner.status = LoadStatus::Failed { error };
            }
        }
    }

    /// Current fetch status.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.inner.lock().status.clone()
    }

    /// Render the board.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshotDto {
        let inner = self.inner.lock();
        self.render(&inner)
    }

    /// Run a pager action; disabled actions leave the board unchanged.
    pub fn navigate(&self, action: NavigationAction) -> NavigationOutcome {
        let mut inner = self.inner.lock();
        let applied = inner.view.navigate(action);
        tracing::debug!(
            action = action.as_str(),
            applied,
            page = inner.view.state().page(),
            "Navigation"
        );
        NavigationOutcome {
            applied,
            snapshot: self.render(&inner),
        }
    }

    /// Move to `page` without clamping.
    pub fn set_page(&self, page: usize) -> BoardSnapshotDto {
        let mut inner = self.inner.lock();
        let state = inner.view.set_page(page);
        tracing::debug!(page = state.page(), "Page set");
        self.render(&inner)
    }

    /// Change rows per page; the board returns to the first page.
    pub fn set_page_size(&self, page_size: PageSize) -> BoardSnapshotDto {
        let mut inner = self.inner.lock();
        let state = inner.view.set_page_size(page_size);
        tracing::debug!(page_size = %state.page_size(), "Page size set");
        self.render(&inner)
    }

    fn render(&self, inner: &BoardInner) -> BoardSnapshotDto {
        BoardSnapshotDto {
            load: LoadStatusDto::from(&inner.status),
            rows: inner
                .view
                .visible_window()
                .iter()
                .map(MarketRowDto::from)
                .collect(),
            pagination: inner.view.controls(self.direction),
        }
    }
}

impl<P: MarketDataPort + 'static> MarketBoard<P> {
    /// Start the fetch in the background and return immediately.
    ///
    /// The handle resolves to whether this call performed the fetch.
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<bool> {
        let board = Arc::clone(self);
        tokio::spawn(async move { board.load().await })
    }
}
