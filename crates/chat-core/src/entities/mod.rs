//! Domain entities

mod channel;
mod member;
mod message;
mod profile;
mod server;

pub use channel::{Channel, ChannelType, GENERAL_CHANNEL_NAME};
pub use member::{Member, MemberRole, MemberWithProfile};
pub use message::{Message, MessageWithMember, DELETED_MESSAGE_CONTENT};
pub use profile::Profile;
pub use server::{generate_invite_code, Server};
