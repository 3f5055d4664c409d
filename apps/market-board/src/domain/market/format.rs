//! Table cell formatting.
//!
//! Fixed-point rendering of the numeric columns. An absent value renders as
//! `NaN` followed by the column suffix; formatting never fails.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Placeholder for a missing or non-numeric value.
const NAN: &str = "NaN";

/// Market caps are shown in billions.
const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Direction of a percentage change, used to color the change cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTrend {
    /// Change is zero or positive.
    Up,
    /// Change is negative or unknown.
    Down,
}

impl ChangeTrend {
    /// Classify a percentage. An absent value compares false against zero,
    /// so it lands on `Down`.
    #[must_use]
    pub fn from_percent(percent: Option<Decimal>) -> Self {
        match percent {
            Some(p) if p >= Decimal::ZERO => Self::Up,
            _ => Self::Down,
        }
    }
}

/// Market cap rank; empty when unranked.
#[must_use]
pub fn format_rank(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_default()
}

/// Ticker symbol in upper case.
#[must_use]
pub fn format_symbol(symbol: &str) -> String {
    symbol.to_uppercase()
}

/// Price with trailing `$`, e.g. `43250.12$`.
#[must_use]
pub fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(p) => format!("{}$", p.normalize()),
        None => format!("{NAN}$"),
    }
}

/// Percent rounded to one decimal with trailing `%`, e.g. `-2.5%`.
#[must_use]
pub fn format_change_percent(percent: Option<Decimal>) -> String {
    match percent {
        Some(p) => format!("{}%", to_fixed(p, 1)),
        None => format!("{NAN}%"),
    }
}

/// Market cap in billions rounded to two decimals with trailing `B`.
#[must_use]
pub fn format_market_cap(market_cap: Option<Decimal>) -> String {
    match market_cap.and_then(|cap| cap.checked_div(BILLION)) {
        Some(billions) => format!("{}B", to_fixed(billions, 2)),
        None => format!("{NAN}B"),
    }
}

/// Round half away from zero and pad to exactly `dp` decimals.
fn to_fixed(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}
