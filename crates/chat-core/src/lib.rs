//! # chat-core
//!
//! Domain layer for the chat server: profiles, servers, channels, members and
//! messages, the role rules that govern them, repository traits and domain events.
//! Nothing in here knows about Postgres or HTTP.

pub mod entities;
pub mod error;
pub mod events;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_invite_code, Channel, ChannelType, Member, MemberRole, MemberWithProfile, Message,
    MessageWithMember, Profile, Server, DELETED_MESSAGE_CONTENT, GENERAL_CHANNEL_NAME,
};
pub use error::DomainError;
pub use events::{DomainEvent, MessageEventKind};
pub use policy::{ChannelPolicy, MessagePolicy};
pub use traits::{
    ChannelRepository, LeaveOutcome, MemberRepository, MessagePage, MessageQuery,
    MessageRepository, ProfileRepository, RepoResult, ServerRepository, MESSAGE_BATCH,
};
pub use value_objects::{FileKind, Permissions, Snowflake, SnowflakeGenerator, SnowflakeParseError};
