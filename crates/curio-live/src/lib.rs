//! Live subscriber registry and price-update fan-out.
//!
//! The transport layer (WebSocket handling in `curio-server`) hands
//! each open connection to the [`ConnectionRegistry`] as an id plus a
//! send handle. [`BroadcastHub`] serializes a price update once and
//! delivers it to every registered connection, pruning any connection
//! whose send fails. Delivery problems never reach the caller of
//! `publish`.

pub mod event;
pub mod handler;
pub mod hub;
pub mod registry;

pub use event::LiveEvent;
pub use handler::{LiveHandler, RegistryHandler};
pub use hub::BroadcastHub;
pub use registry::{ConnectionId, ConnectionRegistry, ConnectionSender};
