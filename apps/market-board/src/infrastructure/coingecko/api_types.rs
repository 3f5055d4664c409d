//! CoinGecko API response types.
//!
//! `/coins/markets` entries are decoded leniently: every field is optional
//! and numbers may arrive as JSON numbers or numeric strings. Anything else
//! becomes an absent value.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::MarketDataError;
use crate::domain::market::MarketRecord;

/// One entry of the `/coins/markets` array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoinMarketEntry {
    /// Provider identifier.
    pub id: Value,
    /// Market cap rank.
    pub market_cap_rank: Value,
    /// Coin name.
    pub name: Value,
    /// Ticker symbol.
    pub symbol: Value,
    /// Image URL.
    pub image: Value,
    /// Price in the quote currency.
    pub current_price: Value,
    /// Market cap change over 24 hours, in percent.
    pub market_cap_change_percentage_24h: Value,
    /// Market cap in the quote currency.
    pub market_cap: Value,
}

impl From<CoinMarketEntry> for MarketRecord {
    fn from(entry: CoinMarketEntry) -> Self {
        Self::new(text(&entry.id), text(&entry.name), text(&entry.symbol))
            .with_rank(rank(&entry.market_cap_rank))
            .with_image_url(text(&entry.image))
            .with_current_price(decimal(&entry.current_price))
            .with_market_cap_change_percent_24h(decimal(&entry.market_cap_change_percentage_24h))
            .with_market_cap(decimal(&entry.market_cap))
    }
}

/// Decode a `/coins/markets` response body.
///
/// Elements that are not objects are skipped.
///
/// # Errors
///
/// Returns [`MarketDataError::InvalidPayload`] if the body is not a JSON array.
pub fn decode_markets(body: &str) -> Result<Vec<MarketRecord>, MarketDataError> {
    let value: Value = serde_json::from_str(body).map_err(|e| MarketDataError::InvalidPayload {
        message: e.to_string(),
    })?;

    let Value::Array(entries) = value else {
        return Err(MarketDataError::InvalidPayload {
            message: format!("expected a JSON array, got {}", kind(&value)),
        });
    };

    let total = entries.len();
    let records: Vec<MarketRecord> = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value::<CoinMarketEntry>(entry).ok())
        .map(MarketRecord::from)
        .collect();

    if records.len() < total {
        tracing::warn!(
            skipped = total - records.len(),
            total,
            "Skipped market entries that are not objects"
        );
    }

    Ok(records)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn decimal(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

fn rank(value: &Value) -> Option<u32> {
    let rank = decimal(value)?;
    if rank.is_sign_negative() || !rank.fract().is_zero() {
        return None;
    }
    u32::try_from(rank.mantissa() / 10_i128.pow(rank.scale())).ok()
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
