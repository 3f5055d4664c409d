//! Application Services
//!
//! Services that orchestrate domain logic and coordinate between ports.
//!
//! - `MarketBoard`: Owns the paginated view and the one-shot market fetch

mod market_board;

pub use market_board::{BoardSettings, LoadStatus, MarketBoard, NavigationOutcome};
