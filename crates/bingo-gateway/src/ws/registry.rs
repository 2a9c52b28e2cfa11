use bingo_core::config::OUTBOUND_CAPACITY;
use bingo_protocol::frames::Envelope;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Live WS connections: conn_id -> outbound queue of serialized frames.
///
/// Sends never await. A full or closed queue drops the frame for that client.
pub struct ConnectionRegistry {
    clients: DashMap<String, mpsc::Sender<String>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Register a connection and queue `greeting` as its first frame.
    ///
    /// The greeting is built while the map entry is held, so a concurrent
    /// `broadcast` either runs entirely before it (and the greeting already
    /// reflects its effect) or reaches this client after the greeting.
    pub fn register(
        &self,
        conn_id: &str,
        greeting: impl FnOnce() -> Envelope,
    ) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let slot = self.clients.entry(conn_id.to_string());
        let _ = tx.try_send(greeting().to_json());
        slot.insert(tx);
        rx
    }

    pub fn unregister(&self, conn_id: &str) {
        self.clients.remove(conn_id);
    }

    /// Queue a frame for one connection. Returns false if it was not delivered.
    pub fn send_to(&self, conn_id: &str, frame: &Envelope) -> bool {
        let Some(tx) = self.clients.get(conn_id) else {
            debug!(conn_id, event = %frame.event, "send to unknown connection");
            return false;
        };
        if tx.try_send(frame.to_json()).is_err() {
            warn!(conn_id, event = %frame.event, "failed to send event to client");
            return false;
        }
        true
    }

    /// Queue a frame for every connection. Returns how many accepted it.
    pub fn broadcast(&self, frame: &Envelope) -> usize {
        let payload = frame.to_json();
        let mut delivered = 0;
        for entry in self.clients.iter() {
            if entry.value().try_send(payload.clone()).is_ok() {
                delivered += 1;
            } else {
                warn!(
                    conn_id = %entry.key(),
                    event = %frame.event,
                    "failed to send event to client"
                );
            }
        }
        debug!(event = %frame.event, recipients = delivered, "broadcast event to all");
        delivered
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
