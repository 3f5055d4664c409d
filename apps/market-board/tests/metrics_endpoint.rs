//! Metrics Endpoint Integration Tests
//!
//! Installs the global Prometheus recorder, so these tests live in their own
//! binary away from the uninitialized `/metrics` case.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use market_board::infrastructure::config::MarketDataSettings;
use market_board::{
    AppState, BoardSettings, CoinGeckoClient, MarketBoard, create_router, init_metrics,
};

#[tokio::test]
async fn metrics_expose_fetch_and_navigation_counters() {
    init_metrics().unwrap();

    let coingecko = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([
                {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1}
            ])),
        )
        .expect(1)
        .mount(&coingecko)
        .await;

    let settings = MarketDataSettings {
        base_url: coingecko.uri(),
        request_timeout: Duration::from_secs(5),
        ..MarketDataSettings::default()
    };
    let source = Arc::new(CoinGeckoClient::new(&settings).unwrap());
    let board = Arc::new(MarketBoard::new(source, BoardSettings::default()));
    assert!(board.load().await);

    let router = create_router(AppState::new(board, "test-0.0.1"));

    // One record on one page: Next is disabled
    let navigate = Request::builder()
        .method("POST")
        .uri("/api/v1/markets/navigate")
        .header("content-type", "application/json")
        .body(Body::from(json!({"action": "next"}).to_string()))
        .unwrap();
    let response = router.clone().oneshot(navigate).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(
        text.lines().any(|line| line.starts_with("market_board_fetch_total")
            && line.contains(r#"outcome="success""#)),
        "missing fetch counter:\n{text}"
    );
    assert!(
        text.lines()
            .any(|line| line.starts_with("market_board_navigation_total")
                && line.contains(r#"action="next""#)
                && line.contains(r#"applied="false""#)),
        "missing navigation counter:\n{text}"
    );
    assert!(text.contains("market_board_records_loaded 1"));
}
