//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chat-core.

mod channel;
mod error;
mod member;
mod message;
mod profile;
mod server;

pub use channel::PgChannelRepository;
pub use member::PgMemberRepository;
pub use message::PgMessageRepository;
pub use profile::PgProfileRepository;
pub use server::PgServerRepository;
