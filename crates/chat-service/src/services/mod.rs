//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the length of one
//! request and enforces membership and role rules before touching storage.

pub mod channel;
pub mod context;
pub mod error;
pub mod invite;
pub mod member;
pub mod message;
pub mod permission;
pub mod profile;
pub mod server;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_SOCKET_URL};
pub use error::{ServiceError, ServiceResult};
pub use invite::{InviteAcceptance, InviteRedirect, InviteService};
pub use member::MemberService;
pub use message::{MessageService, MAX_MESSAGE_LENGTH};
pub use permission::PermissionService;
pub use profile::ProfileService;
pub use server::ServerService;
pub use upload::{
    FileRoute, IncomingFile, UploadService, UploadStore, UploadedFile, MAX_UPLOAD_BYTES,
};
