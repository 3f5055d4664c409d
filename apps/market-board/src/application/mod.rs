//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the board service and the port interfaces that
//! define how the domain interacts with external systems.

/// Data transfer objects for the HTTP boundary.
pub mod dto;

/// Port interfaces for external systems (market data provider).
pub mod ports;

/// Application services (the market board).
pub mod services;
