//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API over the shared [`MarketBoard`]. Every handler runs
//! one board operation and answers with the resulting snapshot.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::dto::{BoardSnapshotDto, LoadStatusDto};
use crate::application::ports::MarketDataPort;
use crate::application::services::{LoadStatus, MarketBoard};
use crate::infrastructure::metrics::{self, get_metrics_handle};

use super::request::{NavigateRequest, SetPageRequest, SetPageSizeRequest};
use super::response::{HealthResponse, HealthStatus, NavigateResponse};

/// Application state shared across handlers.
pub struct AppState<P: MarketDataPort> {
    /// The board served by this API.
    pub board: Arc<MarketBoard<P>>,
    /// Application version.
    pub version: String,
    /// When the service started.
    pub started_at: Instant,
}

impl<P: MarketDataPort> AppState<P> {
    /// Create state for `board`, starting the uptime clock now.
    #[must_use]
    pub fn new(board: Arc<MarketBoard<P>>, version: impl Into<String>) -> Self {
        Self {
            board,
            version: version.into(),
            started_at: Instant::now(),
        }
    }
}

impl<P: MarketDataPort> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
            version: self.version.clone(),
            started_at: self.started_at,
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<P: MarketDataPort + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/markets", get(get_markets))
        .route("/api/v1/markets/navigate", post(navigate))
        .route("/api/v1/markets/page", post(set_page))
        .route("/api/v1/markets/page-size", post(set_page_size))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<P: MarketDataPort>(State(state): State<AppState<P>>) -> impl IntoResponse {
    let status = state.board.status();
    let health = match status {
        LoadStatus::Failed { .. } => HealthStatus::Degraded,
        _ => HealthStatus::Healthy,
    };

    Json(HealthResponse {
        status: health,
        version: state.version.clone(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        load: LoadStatusDto::from(&status),
    })
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

/// Current board snapshot.
async fn get_markets<P: MarketDataPort>(
    State(state): State<AppState<P>>,
) -> Json<BoardSnapshotDto> {
    Json(state.board.snapshot())
}

/// Run a pager action. A disabled action is not an error.
async fn navigate<P: MarketDataPort>(
    State(state): State<AppState<P>>,
    Json(request): Json<NavigateRequest>,
) -> Json<NavigateResponse> {
    let outcome = state.board.navigate(request.action);
    metrics::record_navigation(request.action, outcome.applied);

    Json(NavigateResponse {
        applied: outcome.applied,
        snapshot: outcome.snapshot,
    })
}

async fn set_page<P: MarketDataPort>(
    State(state): State<AppState<P>>,
    Json(request): Json<SetPageRequest>,
) -> Json<BoardSnapshotDto> {
    Json(state.board.set_page(request.page))
}

async fn set_page_size<P: MarketDataPort>(
    State(state): State<AppState<P>>,
    Json(request): Json<SetPageSizeRequest>,
) -> Json<BoardSnapshotDto> {
    Json(state.board.set_page_size(request.page_size))
}
