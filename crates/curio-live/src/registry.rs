//! Set of currently-open live subscriber connections.

use std::fmt;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Opaque handle identifying one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Send half of a connection's outbound message queue.
///
/// `send` is non-blocking; it fails only when the receiving side of
/// the connection has gone away, which is the prune signal.
pub type ConnectionSender = mpsc::UnboundedSender<String>;

/// Concurrent set of open connections.
///
/// Membership has no ordering semantics. Add and remove are
/// idempotent: re-adding an id replaces its sender, removing an
/// absent id is a no-op. `snapshot` returns a point-in-time copy so
/// broadcast iteration is never corrupted by concurrent changes.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionSender>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a connection. Called by the transport on open.
    pub fn add(&self, id: ConnectionId, sender: ConnectionSender) {
        self.connections.insert(id, sender);
    }

    /// Deregister a connection. Called on close or after a failed send.
    pub fn remove(&self, id: &ConnectionId) {
        self.connections.remove(id);
    }

    /// Point-in-time copy of the current membership.
    ///
    /// A connection added concurrently is simply absent from the
    /// copy; a concurrent remove does not affect iteration.
    pub fn snapshot(&self) -> Vec<(ConnectionId, ConnectionSender)> {
        self.connections
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> (ConnectionId, ConnectionSender, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConnectionId::generate(), tx, rx)
    }

    #[test]
    fn test_add_remove() {
        let registry = ConnectionRegistry::new();
        let (id, tx, _rx) = connection();

        registry.add(id, tx);
        assert_eq!(registry.len(), 1);

        registry.remove(&id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (id, tx, _rx) = connection();

        registry.add(id, tx);
        registry.remove(&id);
        // Second remove of the same id is a no-op, not an error
        registry.remove(&id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_double_add_replaces() {
        let registry = ConnectionRegistry::new();
        let (id, tx_a, _rx_a) = connection();
        let (_, tx_b, mut rx_b) = connection();

        registry.add(id, tx_a);
        registry.add(id, tx_b);
        assert_eq!(registry.len(), 1);

        for (_, sender) in registry.snapshot() {
            sender.send("hello".to_string()).unwrap();
        }
        assert_eq!(rx_b.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let registry = ConnectionRegistry::new();
        let (id_a, tx_a, _rx_a) = connection();
        let (id_b, tx_b, _rx_b) = connection();
        registry.add(id_a, tx_a);
        registry.add(id_b, tx_b);

        let snapshot = registry.snapshot();
        registry.remove(&id_a);

        // The copy still holds both; the registry holds one
        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.len(), 1);
    }
}
