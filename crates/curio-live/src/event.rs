//! Wire events pushed to live subscribers.

use curio_core::{ItemId, Price};
use serde::Serialize;

/// Message delivered to every subscribed connection.
///
/// The `type` / `itemId` / `newPrice` field names are the stable wire
/// contract; `newPrice` is a plain JSON number.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum LiveEvent {
    #[serde(rename = "PRICE_UPDATE")]
    PriceUpdate {
        #[serde(rename = "itemId")]
        item_id: ItemId,
        #[serde(rename = "newPrice")]
        new_price: f64,
    },
}

impl LiveEvent {
    /// Build a price update for an accepted offer.
    pub fn price_update(item_id: ItemId, new_price: Price) -> Self {
        Self::PriceUpdate {
            item_id,
            new_price: new_price.to_f64(),
        }
    }
}
