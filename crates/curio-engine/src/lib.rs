//! Real-time bidding engine.
//!
//! Validates incoming offers against the item's current price,
//! mutates item state under a per-item critical section, records
//! every attempt in the offer ledger, and fans accepted prices out to
//! live subscribers.

pub mod engine;
pub mod error;

pub use engine::{BiddingEngine, OfferOutcome};
pub use error::{BidError, Result};
