//! In-process realtime fan-out
//!
//! Services publish on string keys such as `chat:{channel_id}:messages`;
//! websocket subscribers receive whatever is published on the keys they hold.

mod hub;

pub use hub::{EventHub, RealtimeEvent, DEFAULT_TOPIC_CAPACITY};
