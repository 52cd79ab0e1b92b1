//! Offer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Price;
use crate::item::ItemId;

/// One bid attempt against an item, accepted or not.
///
/// Offers are immutable once created. Rejected bids are recorded too,
/// so the ledger is a full audit trail rather than a price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub item_id: ItemId,
    pub bidder: String,
    pub amount: Price,
    pub accepted: bool,
    pub placed_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(item_id: ItemId, bidder: impl Into<String>, amount: Price, accepted: bool) -> Self {
        Self {
            item_id,
            bidder: bidder.into(),
            amount,
            accepted,
            placed_at: Utc::now(),
        }
    }
}
