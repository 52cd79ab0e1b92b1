//! Append-only offer ledger.

use curio_core::{ItemId, Offer};
use parking_lot::RwLock;

/// Full audit trail of submitted offers, in append order.
///
/// Appending never fails; a full ledger is not a modeled failure
/// mode. Reads return copies so callers never hold the lock.
#[derive(Default)]
pub struct OfferLedger {
    offers: RwLock<Vec<Offer>>,
}

impl OfferLedger {
    pub fn new() -> Self {
        Self {
            offers: RwLock::new(Vec::new()),
        }
    }

    /// Record one offer.
    pub fn append(&self, offer: Offer) {
        self.offers.write().push(offer);
    }

    /// All offers in insertion order.
    pub fn all(&self) -> Vec<Offer> {
        self.offers.read().clone()
    }

    /// Offers for one item, in insertion order.
    pub fn for_item(&self, id: &ItemId) -> Vec<Offer> {
        self.offers
            .read()
            .iter()
            .filter(|o| &o.item_id == id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.offers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.read().is_empty()
    }
}
