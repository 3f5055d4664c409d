//! Prometheus Metrics Module
//!
//! Exposes board metrics in Prometheus format.
//!
//! # Metrics
//!
//! - `market_board_fetch_total{outcome}`: market list fetches by result
//! - `market_board_fetch_duration_seconds`: market list fetch latency
//! - `market_board_records_loaded`: records held after the last successful fetch
//! - `market_board_navigation_total{action, applied}`: pager actions
//!
//! Metrics are exposed at `/metrics` on the HTTP port. Recording before
//! [`init_metrics`] is a no-op.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::application::ports::MarketDataError;
use crate::domain::pagination::NavigationAction;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Later calls return the handle installed by the first one.
///
/// # Errors
///
/// Returns an error if the global recorder cannot be installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "market_board_fetch_total",
        "Total market list fetches by outcome"
    );
    describe_histogram!(
        "market_board_fetch_duration_seconds",
        "Time to fetch and decode the market list"
    );
    describe_gauge!(
        "market_board_records_loaded",
        "Records received by the last successful fetch"
    );
    describe_counter!(
        "market_board_navigation_total",
        "Total pager actions by action and whether they were applied"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Metric labels for fetch results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records received.
    Success,
    /// Connection or read failure.
    ConnectionError,
    /// Provider rate limit hit.
    RateLimited,
    /// Non-success status.
    ApiError,
    /// Body was not a market list.
    InvalidPayload,
}

impl FetchOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ConnectionError => "connection_error",
            Self::RateLimited => "rate_limited",
            Self::ApiError => "api_error",
            Self::InvalidPayload => "invalid_payload",
        }
    }
}

impl From<&MarketDataError> for FetchOutcome {
    fn from(error: &MarketDataError) -> Self {
        match error {
            MarketDataError::Connection { .. } => Self::ConnectionError,
            MarketDataError::RateLimited { .. } => Self::RateLimited,
            MarketDataError::Api { .. } => Self::ApiError,
            MarketDataError::InvalidPayload { .. } => Self::InvalidPayload,
        }
    }
}

/// Record a finished market list fetch.
pub fn record_fetch(outcome: FetchOutcome, duration: Duration) {
    counter!(
        "market_board_fetch_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
    histogram!("market_board_fetch_duration_seconds").record(duration.as_secs_f64());
}

/// Update the number of loaded records.
#[allow(clippy::cast_precision_loss)]
pub fn set_records_loaded(count: usize) {
    gauge!("market_board_records_loaded").set(count as f64);
}

/// Record a pager action.
pub fn record_navigation(action: NavigationAction, applied: bool) {
    counter!(
        "market_board_navigation_total",
        "action" => action.as_str(),
        "applied" => if applied { "true" } else { "false" }
    )
    .increment(1);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_outcome_as_str() {
        assert_eq!(FetchOutcome::Success.as_str(), "success");
        assert_eq!(FetchOutcome::ConnectionError.as_str(), "connection_error");
        assert_eq!(FetchOutcome::RateLimited.as_str(), "rate_limited");
        assert_eq!(FetchOutcome::ApiError.as_str(), "api_error");
        assert_eq!(FetchOutcome::InvalidPayload.as_str(), "invalid_payload");
    }

    #[test]
    fn fetch_outcome_from_error() {
        let outcome = FetchOutcome::from(&MarketDataError::RateLimited {
            retry_after_secs: None,
        });
        assert_eq!(outcome, FetchOutcome::RateLimited);

        let outcome = FetchOutcome::from(&MarketDataError::Api {
            status: 503,
            message: String::new(),
        });
        assert_eq!(outcome, FetchOutcome::ApiError);
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        record_fetch(FetchOutcome::Success, Duration::from_millis(5));
        set_records_loaded(100);
        record_navigation(NavigationAction::Next, true);
    }
}
