//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ChannelRepository, LeaveOutcome, MemberRepository, MessagePage, MessageQuery,
    MessageRepository, ProfileRepository, RepoResult, ServerRepository, MESSAGE_BATCH,
};
