//! Keyed broadcast hub

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::broadcast;

/// Buffer per key when none is configured
pub const DEFAULT_TOPIC_CAPACITY: usize = 256;

/// One frame as subscribers receive it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeEvent {
    pub key: String,
    pub message: serde_json::Value,
}

/// Lazily created `broadcast` channel per key
///
/// Cloning is cheap; clones share the same topics.
#[derive(Clone)]
pub struct EventHub {
    topics: Arc<DashMap<String, broadcast::Sender<Arc<RealtimeEvent>>>>,
    capacity: usize,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Arc::new(DashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Receiver for `key`, creating the topic on first use
    pub fn subscribe(&self, key: &str) -> broadcast::Receiver<Arc<RealtimeEvent>> {
        if let Some(sender) = self.topics.get(key) {
            return sender.subscribe();
        }
        self.topics
            .entry(key.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Send `payload` to everyone subscribed to `key`.
    ///
    /// Returns how many receivers got it. A topic nobody listens to any more is
    /// dropped so the map does not grow with every channel ever visited.
    pub fn publish<T: Serialize>(&self, key: &str, payload: &T) -> usize {
        let message = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize realtime payload");
                return 0;
            }
        };

        let Some(sender) = self.topics.get(key).map(|s| s.clone()) else {
            tracing::trace!(key, "No subscribers for realtime key");
            return 0;
        };

        let event = Arc::new(RealtimeEvent {
            key: key.to_string(),
            message,
        });
        match sender.send(event) {
            Ok(delivered) => {
                tracing::debug!(key, delivered, "Realtime event published");
                delivered
            }
            Err(_) => {
                self.topics.remove_if(key, |_, s| s.receiver_count() == 0);
                0
            }
        }
    }

    /// Drop each of `keys` that nobody subscribes to any more.
    ///
    /// Subscribers call this once their receivers are gone, so topics that
    /// were watched but never published to do not linger.
    pub fn release<K: AsRef<str>>(&self, keys: &[K]) {
        for key in keys {
            self.topics
                .remove_if(key.as_ref(), |_, s| s.receiver_count() == 0);
        }
    }

    /// Number of live topics
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn subscriber_count(&self, key: &str) -> usize {
        self.topics.get(key).map_or(0, |s| s.receiver_count())
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC_CAPACITY)
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("topics", &self.topics.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
