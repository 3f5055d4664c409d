//! Market Data Port (Driven Port)
//!
//! Interface for fetching the coin market list from an external provider.

use async_trait::async_trait;

use crate::domain::market::MarketRecord;

/// Parameters for a market list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketsQuery {
    /// Quote currency prices and caps are expressed in (e.g., "usd").
    pub vs_currency: String,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
        }
    }
}

/// Market data error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// Request could not be sent or the response not read.
    #[error("Market data connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Provider rejected the request for exceeding its rate limit.
    #[error("Rate limited by market data provider")]
    RateLimited {
        /// Seconds to wait before retrying, if the provider said.
        retry_after_secs: Option<u64>,
    },

    /// Provider answered with a non-success status.
    #[error("Market data API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// Response body was not a list of market entries.
    #[error("Invalid market data payload: {message}")]
    InvalidPayload {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market records.
///
/// Implementations return records in provider order. Entries with missing or
/// malformed fields are kept; only a response that is not a list at all is
/// an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the full market list once.
    async fn fetch_markets(
        &self,
        query: &MarketsQuery,
    ) -> Result<Vec<MarketRecord>, MarketDataError>;
}
