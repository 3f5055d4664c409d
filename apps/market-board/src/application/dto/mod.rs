//! Data Transfer Objects
//!
//! Serializable views of the board handed to the HTTP layer. Rows carry
//! display-ready strings; formatting happens here, not in the handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::market::{
    ChangeTrend, MarketRecord, format_change_percent, format_market_cap, format_price,
    format_rank, format_symbol,
};
use crate::domain::pagination::PaginationControls;

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRowDto {
    /// Provider identifier (row key).
    pub id: String,
    /// Rank column (`#`).
    pub rank: String,
    /// Coin name.
    pub name: String,
    /// Upper-cased ticker symbol.
    pub symbol: String,
    /// Coin image URL.
    pub image_url: String,
    /// Price column, e.g. `43250.12$`.
    pub price: String,
    /// Change column, e.g. `-2.5%`.
    pub change: String,
    /// Whether the change cell is shown as gain or loss.
    pub change_trend: ChangeTrend,
    /// Market cap column, e.g. `850.12B`.
    pub market_cap: String,
}

impl From<&MarketRecord> for MarketRowDto {
    fn from(record: &MarketRecord) -> Self {
        Self {
            id: record.id().to_string(),
            rank: format_rank(record.rank()),
            name: record.name().to_string(),
            symbol: format_symbol(record.symbol()),
            image_url: record.image_url().to_string(),
            price: format_price(record.current_price()),
            change: format_change_percent(record.market_cap_change_percent_24h()),
            change_trend: record.change_trend(),
            market_cap: format_market_cap(record.market_cap()),
        }
    }
}

/// Progress of the one-shot market fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadStatusDto {
    /// Fetch not started yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Records replaced by a successful fetch.
    Loaded {
        /// Number of records received.
        count: usize,
        /// When the records arrived.
        loaded_at: DateTime<Utc>,
    },
    /// Fetch failed; the previous records stay visible.
    Failed {
        /// Failure reason.
        error: String,
    },
}

/// Everything needed to render the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshotDto {
    /// Fetch progress.
    pub load: LoadStatusDto,
    /// Rows of the visible window.
    pub rows: Vec<MarketRowDto>,
    /// Pager footer.
    pub pagination: PaginationControls,
}
