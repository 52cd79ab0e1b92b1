//! Core domain types for the curio marketplace.
//!
//! This crate provides fundamental types used throughout the system:
//! - `ItemId`: Unique identifier for collectible items
//! - `Price`: Precision-safe monetary type
//! - `Item`: A collectible with its current asking price
//! - `Offer`: An immutable record of one bid attempt

pub mod decimal;
pub mod error;
pub mod item;
pub mod offer;

pub use decimal::Price;
pub use error::{CoreError, Result};
pub use item::{Item, ItemId};
pub use offer::Offer;
