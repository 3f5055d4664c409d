//! Configuration Module
//!
//! Configuration loading for the market board service.

mod settings;

pub use settings::{ApiKey, BoardConfig, ConfigError, MarketDataSettings, ServerSettings};
