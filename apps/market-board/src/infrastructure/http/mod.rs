//! HTTP/REST API adapter.
//!
//! Inbound adapter serving the board snapshot and the pager actions.

mod controller;
mod request;
mod response;
mod server;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
pub use server::{HttpServer, HttpServerError};
