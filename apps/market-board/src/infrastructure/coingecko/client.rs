//! CoinGecko HTTP client.
//!
//! One request per fetch, no retry. The outcome and latency of every fetch
//! are recorded as metrics.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::api_types::decode_markets;
use crate::application::ports::{MarketDataError, MarketDataPort, MarketsQuery};
use crate::domain::market::MarketRecord;
use crate::infrastructure::config::MarketDataSettings;
use crate::infrastructure::metrics::{self, FetchOutcome};

/// Header carrying the demo API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Market data adapter for the CoinGecko REST API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Create a new client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &MarketDataSettings) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| MarketDataError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.as_ref().map(|k| k.expose().to_string()),
        })
    }

    /// URL of the market list endpoint.
    #[must_use]
    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    async fn request_markets(
        &self,
        query: &MarketsQuery,
    ) -> Result<Vec<MarketRecord>, MarketDataError> {
        let mut request = self.client.get(self.markets_url()).query(&[
            ("vs_currency", query.vs_currency.as_str()),
            ("price_change_percentage", "24h"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MarketDataError::Connection {
                message: e.to_string(),
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Err(MarketDataError::RateLimited { retry_after_secs });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::Connection {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(MarketDataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        decode_markets(&body)
    }
}

#[async_trait]
impl MarketDataPort for CoinGeckoClient {
    #[tracing::instrument(skip(self, query), fields(vs_currency = %query.vs_currency))]
    async fn fetch_markets(
        &self,
        query: &MarketsQuery,
    ) -> Result<Vec<MarketRecord>, MarketDataError> {
        let started = Instant::now();
        let result = self.request_markets(query).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(records) => {
                metrics::record_fetch(FetchOutcome::Success, elapsed);
                metrics::set_records_loaded(records.len());
                tracing::debug!(
                    count = records.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "CoinGecko market list received"
                );
            }
            Err(error) => {
                metrics::record_fetch(FetchOutcome::from(error), elapsed);
                tracing::warn!(
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "CoinGecko market list request failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ApiKey;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: &MockServer, api_key: Option<&str>) -> MarketDataSettings {
        MarketDataSettings {
            base_url: format!("{}/api/v3/", server.uri()),
            api_key: api_key.map(|k| ApiKey::new(k.to_string())),
            vs_currency: "usd".to_string(),
            request_timeout: Duration::from_secs(2),
        }
    }

    fn usd() -> MarketsQuery {
        MarketsQuery::default()
    }

    #[tokio::test]
    async fn fetches_and_decodes_markets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/coins/markets"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("price_change_percentage", "24h"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"id": "bitcoin", "market_cap_rank": 1, "name": "Bitcoin", "symbol": "btc",
                     "current_price": 43250.12, "market_cap": 850123456789,
                     "market_cap_change_percentage_24h": -2.47},
                    {"id": "ethereum", "market_cap_rank": 2, "name": "Ethereum", "symbol": "eth"}
                ]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(&settings(&server, None)).unwrap();
        let records = client.fetch_markets(&usd()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "bitcoin");
        assert_eq!(records[1].rank(), Some(2));
        assert_eq!(records[1].current_price(), None);
    }

    #[tokio::test]
    async fn sends_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/coins/markets"))
            .and(header(API_KEY_HEADER, "cg-demo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(&settings(&server, Some("cg-demo"))).unwrap();
        assert!(client.fetch_markets(&usd()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn passes_quote_currency() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("vs_currency", "eur"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(&settings(&server, None)).unwrap();
        let query = MarketsQuery {
            vs_currency: "eur".to_string(),
        };
        assert!(client.fetch_markets(&query).await.is_ok());
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(&settings(&server, None)).unwrap();
        let err = client.fetch_markets(&usd()).await.unwrap_err();

        assert_eq!(
            err,
            MarketDataError::RateLimited {
                retry_after_secs: Some(30)
            }
        );
    }

    #[tokio::test]
    async fn server_error_is_api_error_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(&settings(&server, None)).unwrap();
        let err = client.fetch_markets(&usd()).await.unwrap_err();

        assert_eq!(
            err,
            MarketDataError::Api {
                status: 503,
                message: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn non_array_body_is_invalid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"status": {"error_code": 1}}"#),
            )
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(&settings(&server, None)).unwrap();
        let err = client.fetch_markets(&usd()).await.unwrap_err();

        assert!(matches!(err, MarketDataError::InvalidPayload { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_connection_error() {
        let settings = MarketDataSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_secs(2),
            ..MarketDataSettings::default()
        };

        let client = CoinGeckoClient::new(&settings).unwrap();
        let err = client.fetch_markets(&usd()).await.unwrap_err();

        assert!(matches!(err, MarketDataError::Connection { .. }));
    }

    #[tokio::test]
    async fn slow_provider_times_out_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/coins/markets"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let settings = MarketDataSettings {
            request_timeout: Duration::from_millis(100),
            ..settings(&server, None)
        };
        let client = CoinGeckoClient::new(&settings).unwrap();
        let err = client.fetch_markets(&usd()).await.unwrap_err();

        assert!(matches!(err, MarketDataError::Connection { .. }));
    }

    #[test]
    fn markets_url_trims_trailing_slash() {
        let settings = MarketDataSettings {
            base_url: "https://api.example.test/v3/".to_string(),
            ..MarketDataSettings::default()
        };
        let client = CoinGeckoClient::new(&settings).unwrap();
        assert_eq!(client.markets_url(), "https://api.example.test/v3/coins/markets");
    }
}
