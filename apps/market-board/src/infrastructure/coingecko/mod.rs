//! CoinGecko Adapter
//!
//! Implements [`MarketDataPort`](crate::application::ports::MarketDataPort)
//! against the `/coins/markets` endpoint.

mod api_types;
mod client;

pub use api_types::{CoinMarketEntry, decode_markets};
pub use client::CoinGeckoClient;
