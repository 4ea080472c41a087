//! Database models - SQLx row structs for the PostgreSQL tables

mod channel;
mod member;
mod message;
mod profile;
mod server;

pub use channel::ChannelModel;
pub use member::{MemberModel, MemberWithProfileModel};
pub use message::{MessageModel, MessageWithMemberModel};
pub use profile::ProfileModel;
pub use server::ServerModel;
