/// Broadcast hub
///
/// Tracks every live subscriber connection and fans events out to all of
/// them. Thread-safe shared state behind `Arc<RwLock<..>>`; cloning the
/// hub clones a handle onto the same registry.
use super::BroadcastMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    RwLock,
};
use uuid::Uuid;

/// Unique identifier for a subscriber connection
///
/// Each connection gets its own ID when it registers, so a disconnect
/// removes exactly that connection and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Default, Clone)]
pub struct BroadcastHub {
    connections: Arc<RwLock<HashMap<ConnectionId, UnboundedSender<BroadcastMessage>>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber connection
    ///
    /// Returns the connection ID (used for cleanup) and the receiving end
    /// of the connection's message channel.
    pub async fn subscribe(&self) -> (ConnectionId, UnboundedReceiver<BroadcastMessage>) {
        let (tx, rx) = unbounded_channel();
        let connection_id = ConnectionId::new();

        let mut connections = self.connections.write().await;
        connections.insert(connection_id, tx);

        (connection_id, rx)
    }

    /// Remove a subscriber connection
    pub async fn unsubscribe(&self, connection_id: ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(&connection_id);
    }

    /// Send a message to every connected subscriber
    ///
    /// Best effort: send errors (connection already closed) are ignored.
    pub async fn broadcast(&self, message: BroadcastMessage) {
        let connections = self.connections.read().await;

        for sender in connections.values() {
            let _ = sender.send(message.clone());
        }
    }

    /// Number of currently connected subscribers
    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let hub = BroadcastHub::new();
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn subscribe_registers_connection() {
        let hub = BroadcastHub::new();
        let (_id, _rx) = hub.subscribe().await;
        assert_eq!(hub.connection_count().await, 1);
    }

    #[tokio::test]
    async fn broadcast_reaches_all_subscribers() {
        let hub = BroadcastHub::new();
        let mut receivers = vec![];

        for _ in 0..3 {
            let (_id, rx) = hub.subscribe().await;
            receivers.push(rx);
        }

        let message = BroadcastMessage::event("alice added a new post: Hello");
        hub.broadcast(message.clone()).await;

        for mut rx in receivers {
            let received = rx.recv().await;
            assert_eq!(received, Some(message.clone()));
        }
    }

    #[tokio::test]
    async fn unsubscribe_removes_exactly_one_connection() {
        let hub = BroadcastHub::new();
        let (id_a, _rx_a) = hub.subscribe().await;
        let (_id_b, mut rx_b) = hub.subscribe().await;

        hub.unsubscribe(id_a).await;
        assert_eq!(hub.connection_count().await, 1);

        hub.broadcast(BroadcastMessage::event("still delivered")).await;
        assert!(rx_b.recv().await.is_some());
    }

    #[tokio::test]
    async fn broadcast_survives_dropped_receiver() {
        let hub = BroadcastHub::new();
        let (_id_a, rx_a) = hub.subscribe().await;
        let (_id_b, mut rx_b) = hub.subscribe().await;

        // One subscriber went away without unsubscribing
        drop(rx_a);

        hub.broadcast(BroadcastMessage::event("best effort")).await;
        assert!(rx_b.recv().await.is_some());
    }

    #[tokio::test]
    async fn no_subscribers_is_not_an_error() {
        let hub = BroadcastHub::new();
        hub.broadcast(BroadcastMessage::event("into the void")).await;
    }
}
