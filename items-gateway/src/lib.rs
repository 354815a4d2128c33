//! HTTP API gateway for the items service.
//!
//! Exposes create, fetch-by-id and list-recent endpoints over an injected
//! [`items_store::ItemStore`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod response;
pub mod routes;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use routes::{create_router, AppState};
