//! Domain Layer - Market records and pagination logic.
//!
//! This layer contains the core types for windowing a market record
//! sequence into pages, with no I/O. All types here are pure Rust with
//! serialization support.

/// Market records and cell formatting.
pub mod market;

/// Page size, pagination state and navigation arithmetic.
pub mod pagination;

/// The paginated view over an in-memory record sequence.
pub mod view;
