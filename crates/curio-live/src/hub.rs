//! Price-update fan-out.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::event::LiveEvent;
use crate::registry::ConnectionRegistry;

/// Delivers events to every registered connection.
///
/// The event is serialized once and each delivery is attempted
/// independently. A failed send marks that connection dead and prunes
/// it from the registry; the remaining connections still receive the
/// event. `publish` cannot fail from the caller's perspective.
pub struct BroadcastHub {
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastHub {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Fan one event out to all current subscribers.
    pub fn publish(&self, event: &LiveEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                // Events are plain data; this should be unreachable
                warn!(error = %e, "Failed to serialize live event");
                return;
            }
        };

        let snapshot = self.registry.snapshot();
        let total = snapshot.len();
        let mut delivered = 0usize;

        for (id, sender) in snapshot {
            match sender.send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    // Receiver gone: connection is dead, prune it
                    warn!(connection = %id, "Send failed, pruning connection");
                    self.registry.remove(&id);
                }
            }
        }

        debug!(delivered, total, "Broadcast complete");
    }
}
