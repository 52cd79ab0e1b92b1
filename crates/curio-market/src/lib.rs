//! Item store and offer ledger for the curio marketplace.
//!
//! Two independent pieces of shared state:
//! - `ItemStore`: canonical mapping from item id to item state, the
//!   single source of truth for "current price"
//! - `OfferLedger`: append-only record of every offer ever submitted,
//!   kept separate so rejected bids are auditable without touching price

pub mod error;
pub mod ledger;
pub mod store;

pub use error::{MarketError, Result};
pub use ledger::OfferLedger;
pub use store::ItemStore;
