//! Market Board Binary
//!
//! Starts the paginated market board API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin market-board
//! ```
//!
//! # Environment Variables
//!
//! - `COINGECKO_BASE_URL`: API root (default: <https://api.coingecko.com/api/v3>)
//! - `COINGECKO_API_KEY`: Demo API key (optional)
//! - `MARKET_BOARD_VS_CURRENCY`: Quote currency (default: usd)
//! - `MARKET_BOARD_DEFAULT_PAGE_SIZE`: Rows per page, 0 or less for all (default: 10)
//! - `MARKET_BOARD_DIRECTION`: ltr | rtl (default: ltr)
//! - `MARKET_BOARD_HTTP_PORT`: HTTP port (default: 8080)
//! - `MARKET_BOARD_REQUEST_TIMEOUT_SECS`: Fetch timeout (default: 10)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: market-board)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use market_board::infrastructure::telemetry;
use market_board::{
    AppState, BoardConfig, CoinGeckoClient, HttpServer, MarketBoard, create_router, init_metrics,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    // Initialize telemetry (OpenTelemetry + tracing)
    let telemetry_guard = telemetry::init()?;

    tracing::info!(
        otel_export = telemetry_guard.is_exporting(),
        "Starting Market Board"
    );

    // Initialize Prometheus metrics
    let _metrics_handle = init_metrics()?;

    let config = BoardConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();

    let source = Arc::new(CoinGeckoClient::new(&config.market_data)?);
    let board = Arc::new(MarketBoard::new(source, config.board_settings()));

    // Fire-and-forget; the API serves an empty board until the list arrives
    let _load = board.spawn_load();

    let router = create_router(AppState::new(
        Arc::clone(&board),
        env!("CARGO_PKG_VERSION"),
    ));
    let http_server = HttpServer::new(config.server.http_port, router, shutdown_token.clone());
    let server_handle = tokio::spawn(http_server.run());

    tracing::info!("Market board ready");

    tokio::spawn(await_shutdown(shutdown_token));
    server_handle.await??;

    tracing::info!("Market board stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &BoardConfig) {
    tracing::info!(
        base_url = %config.market_data.base_url,
        vs_currency = %config.market_data.vs_currency,
        api_key = config.market_data.api_key.is_some(),
        default_page_size = %config.default_page_size,
        direction = config.direction.as_str(),
        http_port = config.server.http_port,
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
