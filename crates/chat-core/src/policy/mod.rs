//! Role rules shared by the services and the client view models
//!
//! Both the API (to reject requests) and the view models (to hide actions)
//! ask the same questions, so the answers live here once.

mod channel;
mod message;

pub use channel::ChannelPolicy;
pub use message::MessagePolicy;
