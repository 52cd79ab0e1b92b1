//! HTTP and WebSocket server for the curio marketplace.
//!
//! Thin transport around the bidding core:
//! - REST API for browsing items and submitting offers
//! - WebSocket endpoint pushing `PRICE_UPDATE` events to subscribers
//! - TOML configuration, CLI entry point, structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod ws;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use routes::{create_router, run_server, AppState};
