//! Port Interfaces
//!
//! Defines the interfaces (ports) for external systems following
//! the Hexagonal Architecture pattern.
//!
//! ## Driven Ports (Outbound)
//!
//! - `MarketDataPort`: One-shot fetch of the coin market list

mod market_data_port;

pub use market_data_port::{MarketDataError, MarketDataPort, MarketsQuery};

#[cfg(test)]
pub use market_data_port::MockMarketDataPort;
