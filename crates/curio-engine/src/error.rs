//! Error types for curio-engine.

use curio_core::ItemId;
use thiserror::Error;

/// Validation failures for an offer submission.
///
/// A too-low offer is not an error; it comes back as
/// [`OfferOutcome::Rejected`](crate::OfferOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("Item not found: {id}")]
    ItemNotFound { id: ItemId },

    #[error("Invalid offer: {0}")]
    InvalidOffer(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, BidError>;
