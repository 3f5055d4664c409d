//! Market Board Configuration Settings
//!
//! Configuration types for the board service, loaded from environment variables.

use std::time::Duration;

use crate::application::ports::MarketsQuery;
use crate::application::services::BoardSettings;
use crate::domain::pagination::{LayoutDirection, PageSize};

/// Public CoinGecko API root.
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API key, sent as `x-cg-demo-api-key`.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key.
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// Get the raw key.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Market data provider settings.
#[derive(Debug, Clone)]
pub struct MarketDataSettings {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Optional API key.
    pub api_key: Option<ApiKey>,
    /// Quote currency.
    pub vs_currency: String,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            api_key: None,
            vs_currency: "usd".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Server port settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// HTTP API port.
    pub http_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { http_port: 8080 }
    }
}

/// Complete board configuration.
#[derive(Debug, Clone, Default)]
pub struct BoardConfig {
    /// Market data provider settings.
    pub market_data: MarketDataSettings,
    /// Rows per page the board starts with.
    pub default_page_size: PageSize,
    /// Pager layout direction.
    pub direction: LayoutDirection,
    /// Server port settings.
    pub server: ServerSettings,
}

impl BoardConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or currency is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or currency is set but empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MarketDataSettings::default();

        let base_url = non_empty(&lookup, "COINGECKO_BASE_URL")?
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyValue("COINGECKO_BASE_URL".to_string()));
        }

        let api_key = lookup("COINGECKO_API_KEY")
            .filter(|key| !key.is_empty())
            .map(ApiKey::new);

        let vs_currency = non_empty(&lookup, "MARKET_BOARD_VS_CURRENCY")?
            .map_or(defaults.vs_currency, |c| c.to_lowercase());

        let request_timeout = parse_duration_secs(
            &lookup,
            "MARKET_BOARD_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout,
        );

        let default_page_size = lookup("MARKET_BOARD_DEFAULT_PAGE_SIZE")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map_or_else(PageSize::default, PageSize::from_raw);

        let direction = lookup("MARKET_BOARD_DIRECTION")
            .map(|s| LayoutDirection::from_str_case_insensitive(&s))
            .unwrap_or_default();

        let server = ServerSettings {
            http_port: parse_u16(
                &lookup,
                "MARKET_BOARD_HTTP_PORT",
                ServerSettings::default().http_port,
            ),
        };

        Ok(Self {
            market_data: MarketDataSettings {
                base_url,
                api_key,
                vs_currency,
                request_timeout,
            },
            default_page_size,
            direction,
            server,
        })
    }

    /// Settings for the board service.
    #[must_use]
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            query: MarketsQuery {
                vs_currency: self.market_data.vs_currency.clone(),
            },
            default_page_size: self.default_page_size,
            direction: self.direction,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn non_empty<F>(lookup: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(key.to_string())),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_u16<F>(lookup: &F, key: &str, default: u16) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_duration_secs<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map_or(default, Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::num::NonZeroUsize;

    fn config_from(vars: &[(&str, &str)]) -> Result<BoardConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BoardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.market_data.base_url, DEFAULT_COINGECKO_BASE_URL);
        assert!(config.market_data.api_key.is_none());
        assert_eq!(config.market_data.vs_currency, "usd");
        assert_eq!(config.market_data.request_timeout, Duration::from_secs(10));
        assert_eq!(config.default_page_size, PageSize::default());
        assert_eq!(config.direction, LayoutDirection::Ltr);
        assert_eq!(config.server.http_port, 8080);
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("COINGECKO_BASE_URL", "http://localhost:9999/api/"),
            ("COINGECKO_API_KEY", "cg-key"),
            ("MARKET_BOARD_VS_CURRENCY", "EUR"),
            ("MARKET_BOARD_REQUEST_TIMEOUT_SECS", "3"),
            ("MARKET_BOARD_DEFAULT_PAGE_SIZE", "25"),
            ("MARKET_BOARD_DIRECTION", "RTL"),
            ("MARKET_BOARD_HTTP_PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.market_data.base_url, "http://localhost:9999/api");
        assert_eq!(
            config.market_data.api_key.as_ref().map(ApiKey::expose),
            Some("cg-key")
        );
        assert_eq!(config.market_data.vs_currency, "eur");
        assert_eq!(config.market_data.request_timeout, Duration::from_secs(3));
        assert_eq!(
            config.default_page_size,
            PageSize::Fixed(NonZeroUsize::new(25).unwrap())
        );
        assert_eq!(config.direction, LayoutDirection::Rtl);
        assert_eq!(config.server.http_port, 9000);
    }

    #[test]
    fn non_positive_page_size_means_all() {
        let config = config_from(&[("MARKET_BOARD_DEFAULT_PAGE_SIZE", "-1")]).unwrap();
        assert_eq!(config.default_page_size, PageSize::All);

        let config = config_from(&[("MARKET_BOARD_DEFAULT_PAGE_SIZE", "0")]).unwrap();
        assert_eq!(config.default_page_size, PageSize::All);
    }

    #[test]
    fn unparseable_values_fall_back() {
        let config = config_from(&[
            ("MARKET_BOARD_DEFAULT_PAGE_SIZE", "lots"),
            ("MARKET_BOARD_HTTP_PORT", "99999"),
            ("MARKET_BOARD_REQUEST_TIMEOUT_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.default_page_size, PageSize::default());
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.market_data.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn empty_required_values_rejected() {
        let err = config_from(&[("COINGECKO_BASE_URL", "  ")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "environment variable COINGECKO_BASE_URL cannot be empty"
        );

        let err = config_from(&[("MARKET_BOARD_VS_CURRENCY", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(key) if key == "MARKET_BOARD_VS_CURRENCY"));
    }

    #[test]
    fn empty_api_key_is_none() {
        let config = config_from(&[("COINGECKO_API_KEY", "")]).unwrap();
        assert!(config.market_data.api_key.is_none());
    }

    #[test]
    fn api_key_redacted_debug() {
        let config = config_from(&[("COINGECKO_API_KEY", "secret-key-123")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn board_settings_carry_config() {
        let config = config_from(&[
            ("MARKET_BOARD_VS_CURRENCY", "gbp"),
            ("MARKET_BOARD_DEFAULT_PAGE_SIZE", "50"),
            ("MARKET_BOARD_DIRECTION", "rtl"),
        ])
        .unwrap();

        let settings = config.board_settings();
        assert_eq!(settings.query.vs_currency, "gbp");
        assert_eq!(settings.default_page_size.rows(), Some(50));
        assert_eq!(settings.direction, LayoutDirection::Rtl);
    }
}
