//! Error types for curio-market.

use curio_core::ItemId;
use thiserror::Error;

/// Market error types.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Item not found: {id}")]
    ItemNotFound { id: ItemId },

    #[error("Item already exists: {id}")]
    AlreadyExists { id: ItemId },
}

/// Result type alias for market operations.
pub type Result<T> = std::result::Result<T, MarketError>;
