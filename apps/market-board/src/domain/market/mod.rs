//! Market Record Types
//!
//! A `MarketRecord` is one row of the coin market list as delivered by the
//! data source. Records are immutable once built; the board never edits or
//! removes a single record, it only replaces the whole sequence.
//!
//! Numeric fields are optional. The inbound payload is not validated, so a
//! missing or malformed number is carried as `None` and surfaces as `NaN`
//! when formatted (see [`format`]).

pub mod format;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use format::{
    ChangeTrend, format_change_percent, format_market_cap, format_price, format_rank,
    format_symbol,
};

/// A single coin market entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRecord {
    id: String,
    rank: Option<u32>,
    name: String,
    symbol: String,
    image_url: String,
    current_price: Option<Decimal>,
    market_cap_change_percent_24h: Option<Decimal>,
    market_cap: Option<Decimal>,
}

impl MarketRecord {
    /// Create a record with identity fields set and all numbers absent.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rank: None,
            name: name.into(),
            symbol: symbol.into(),
            image_url: String::new(),
            current_price: None,
            market_cap_change_percent_24h: None,
            market_cap: None,
        }
    }

    /// Set the market cap rank.
    #[must_use]
    pub const fn with_rank(mut self, rank: Option<u32>) -> Self {
        self.rank = rank;
        self
    }

    /// Set the coin image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Set the current price.
    #[must_use]
    pub const fn with_current_price(mut self, price: Option<Decimal>) -> Self {
        self.current_price = price;
        self
    }

    /// Set the 24h market cap change, in percent.
    #[must_use]
    pub const fn with_market_cap_change_percent_24h(mut self, percent: Option<Decimal>) -> Self {
        self.market_cap_change_percent_24h = percent;
        self
    }

    /// Set the market cap.
    #[must_use]
    pub const fn with_market_cap(mut self, market_cap: Option<Decimal>) -> Self {
        self.market_cap = market_cap;
        self
    }

    /// Provider identifier, unique within a sequence.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Market cap rank.
    #[must_use]
    pub const fn rank(&self) -> Option<u32> {
        self.rank
    }

    /// Coin name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol as delivered (usually lower case).
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Coin image URL.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Current price in the quote currency.
    #[must_use]
    pub const fn current_price(&self) -> Option<Decimal> {
        self.current_price
    }

    /// Market cap change over 24h, in percent.
    #[must_use]
    pub const fn market_cap_change_percent_24h(&self) -> Option<Decimal> {
        self.market_cap_change_percent_24h
    }

    /// Market cap in the quote currency.
    #[must_use]
    pub const fn market_cap(&self) -> Option<Decimal> {
        self.market_cap
    }

    /// Direction of the 24h market cap change.
    #[must_use]
    pub fn change_trend(&self) -> ChangeTrend {
        ChangeTrend::from_percent(self.market_cap_change_percent_24h)
    }
}
