//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer.

/// CoinGecko market list adapter.
pub mod coingecko;

/// Configuration loaded from the environment.
pub mod config;

/// HTTP API serving the board.
pub mod http;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// OpenTelemetry tracing integration.
pub mod telemetry;
