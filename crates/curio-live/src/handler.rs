//! Connection lifecycle handler.
//!
//! The transport layer drives these callbacks explicitly: `on_open`
//! after a successful handshake, `on_close` when the peer goes away,
//! `on_message` for inbound frames. Implementations must tolerate
//! duplicate open/close calls for the same id.

use std::sync::Arc;

use tracing::{debug, info};

use crate::registry::{ConnectionId, ConnectionRegistry, ConnectionSender};

/// Callbacks invoked by the transport for connection lifecycle events.
pub trait LiveHandler: Send + Sync {
    /// A connection finished its handshake and can receive messages.
    fn on_open(&self, id: ConnectionId, sender: ConnectionSender);

    /// A connection closed or failed fatally.
    fn on_close(&self, id: &ConnectionId);

    /// An inbound text frame arrived.
    fn on_message(&self, id: &ConnectionId, text: &str);
}

/// Standard handler: membership tracking over a [`ConnectionRegistry`].
///
/// Subscribers are broadcast-only in the current protocol, so inbound
/// messages are logged and dropped.
pub struct RegistryHandler {
    registry: Arc<ConnectionRegistry>,
}

impl RegistryHandler {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

impl LiveHandler for RegistryHandler {
    fn on_open(&self, id: ConnectionId, sender: ConnectionSender) {
        self.registry.add(id, sender);
        info!(connection = %id, subscribers = self.registry.len(), "Subscriber connected");
    }

    fn on_close(&self, id: &ConnectionId) {
        self.registry.remove(id);
        info!(connection = %id, subscribers = self.registry.len(), "Subscriber disconnected");
    }

    fn on_message(&self, id: &ConnectionId, text: &str) {
        debug!(connection = %id, len = text.len(), "Ignoring inbound message");
    }
}
