//! Offer validation, acceptance, and broadcast orchestration.

use std::sync::Arc;

use curio_core::{ItemId, Offer, Price};
use curio_live::{BroadcastHub, LiveEvent};
use curio_market::{ItemStore, OfferLedger};
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{BidError, Result};

/// Outcome of a validated offer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferOutcome {
    /// The offer beat the current price; `new_price` is now live.
    Accepted { new_price: Price },
    /// The offer did not beat the current price. The bid is still
    /// recorded in the ledger.
    Rejected { current_price: Price },
}

/// Orchestrates one offer submission end to end.
///
/// The read-decide-write sequence runs under a per-item gate, so two
/// concurrent offers on the same item can never both read the old
/// price. Offers on different items proceed fully in parallel.
pub struct BiddingEngine {
    store: Arc<ItemStore>,
    ledger: Arc<OfferLedger>,
    hub: Arc<BroadcastHub>,
    gates: DashMap<ItemId, Arc<Mutex<()>>>,
}

impl BiddingEngine {
    pub fn new(store: Arc<ItemStore>, ledger: Arc<OfferLedger>, hub: Arc<BroadcastHub>) -> Self {
        Self {
            store,
            ledger,
            hub,
            gates: DashMap::new(),
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn ledger(&self) -> &OfferLedger {
        &self.ledger
    }

    /// Submit one offer.
    ///
    /// Validation, first failure wins:
    /// 1. the item must exist
    /// 2. the bidder must be non-empty
    /// 3. the amount must parse as a positive decimal
    ///
    /// A validated offer is always appended to the ledger, accepted
    /// or not. On accept the price is updated and exactly one
    /// `PRICE_UPDATE` is published.
    pub fn submit(&self, item_id: &ItemId, bidder: &str, raw_amount: &str) -> Result<OfferOutcome> {
        if !self.store.contains(item_id) {
            return Err(BidError::ItemNotFound {
                id: item_id.clone(),
            });
        }

        let bidder = bidder.trim();
        if bidder.is_empty() {
            return Err(BidError::InvalidOffer("missing bidder".to_string()));
        }

        let amount = Price::parse_positive(raw_amount)
            .map_err(|_| BidError::InvalidOffer("amount must be numeric and > 0".to_string()))?;

        let gate = self.gate(item_id);
        let _guard = gate.lock();

        // Items are never deleted, so this re-read cannot miss
        let current = self
            .store
            .get(item_id)
            .ok_or_else(|| BidError::ItemNotFound {
                id: item_id.clone(),
            })?
            .price;

        if amount <= current {
            self.ledger
                .append(Offer::new(item_id.clone(), bidder, amount, false));
            debug!(item = %item_id, %bidder, %amount, %current, "Offer rejected");
            return Ok(OfferOutcome::Rejected {
                current_price: current,
            });
        }

        self.ledger
            .append(Offer::new(item_id.clone(), bidder, amount, true));
        self.store
            .set_price(item_id, amount)
            .map_err(|_| BidError::ItemNotFound {
                id: item_id.clone(),
            })?;
        self.hub
            .publish(&LiveEvent::price_update(item_id.clone(), amount));

        info!(item = %item_id, %bidder, old = %current, new = %amount, "Offer accepted");
        Ok(OfferOutcome::Accepted { new_price: amount })
    }

    fn gate(&self, item_id: &ItemId) -> Arc<Mutex<()>> {
        self.gates
            .entry(item_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
