#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::panic
    )
)]

//! Market Board - Paginated Crypto Market Table
//!
//! Fetches the CoinGecko market list once at startup and serves it as a
//! paginated table over a small JSON API. Each request runs a single pager
//! action and answers with the visible page, formatted row cells and the
//! footer controls.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Pure windowing and formatting logic
//!   - `market`: Market records and cell formatting
//!   - `pagination`: Page sizes, windows, navigation actions, footer controls
//!   - `view`: Record sequence plus pagination state
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Market data source interface
//!   - `services`: The board, owning one view and the one-shot fetch
//!   - `dto`: Serializable board snapshots
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `coingecko`: `/coins/markets` HTTP client
//!   - `http`: Axum router and server
//!   - `config`: Environment configuration
//!   - `metrics`, `telemetry`: Prometheus and OpenTelemetry
//!
//! # Data Flow
//!
//! ```text
//! CoinGecko ──(once)──► MarketBoard ◄── POST navigate / page / page-size
//!                          │
//!                          └──► snapshot ──► GET /api/v1/markets
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Windowing and formatting with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::market::{ChangeTrend, MarketRecord};
pub use domain::pagination::{
    LayoutDirection, NavigationAction, PageSize, PaginationControls, PaginationState,
};
pub use domain::view::PaginatedView;

// Application
pub use application::dto::{BoardSnapshotDto, LoadStatusDto, MarketRowDto};
pub use application::ports::{MarketDataError, MarketDataPort, MarketsQuery};
pub use application::services::{BoardSettings, LoadStatus, MarketBoard};

// Infrastructure config
pub use infrastructure::config::{BoardConfig, ConfigError};

// Adapters
pub use infrastructure::coingecko::CoinGeckoClient;
pub use infrastructure::http::{AppState, HttpServer, HttpServerError, create_router};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};
