//! Repository traits (ports) - the data access the domain needs
//!
//! The domain layer defines what it needs, and `chat-db` provides the
//! Postgres implementation.

use async_trait::async_trait;

use crate::entities::{
    Channel, Member, MemberRole, MemberWithProfile, Message, MessageWithMember, Profile, Server,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Find by identity-provider subject
    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Profile>>;

    /// Insert, or return the row already stored for the same `user_id`
    async fn create_or_get(&self, profile: &Profile) -> RepoResult<Profile>;
}

// ============================================================================
// Server Repository
// ============================================================================

/// Result of the conditional leave mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Membership removed; carries the server as it is after the change
    Left(Server),
    ServerNotFound,
    /// The owner is never removed by a leave
    IsOwner,
    NotMember,
}

#[async_trait]
pub trait ServerRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Server>>;

    async fn find_by_invite_code(&self, invite_code: &str) -> RepoResult<Option<Server>>;

    /// Servers the profile is a member of, oldest first
    async fn find_by_member_profile(&self, profile_id: Snowflake) -> RepoResult<Vec<Server>>;

    /// Insert the server with its first channel and owner membership atomically
    async fn create(&self, server: &Server, general: &Channel, owner: &Member) -> RepoResult<()>;

    /// Persist name, image and invite code
    async fn update(&self, server: &Server) -> RepoResult<()>;

    /// Delete the server and everything that belongs to it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Remove the profile's membership unless it owns the server
    async fn leave(&self, server_id: Snowflake, profile_id: Snowflake) -> RepoResult<LeaveOutcome>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>>;

    async fn find_by_server_and_profile(
        &self,
        server_id: Snowflake,
        profile_id: Snowflake,
    ) -> RepoResult<Option<Member>>;

    /// Members with their profiles, admins first then by join time
    async fn find_by_server(&self, server_id: Snowflake) -> RepoResult<Vec<MemberWithProfile>>;

    /// Insert unless the profile is already in the server.
    /// Returns the stored member and whether it was inserted now.
    async fn add_if_absent(&self, member: &Member) -> RepoResult<(Member, bool)>;

    async fn update_role(&self, id: Snowflake, role: MemberRole) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Channels of a server in creation order
    async fn find_by_server(&self, server_id: Snowflake) -> RepoResult<Vec<Channel>>;

    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    async fn update(&self, channel: &Channel) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Messages per page of channel history
pub const MESSAGE_BATCH: usize = 10;

/// Cursor pagination over a channel, newest first
#[derive(Debug, Clone, Copy)]
pub struct MessageQuery {
    /// Id of the last message of the previous page; that row is skipped
    pub cursor: Option<Snowflake>,
    pub limit: usize,
}

impl MessageQuery {
    pub fn first_page() -> Self {
        Self { cursor: None, limit: MESSAGE_BATCH }
    }

    pub fn after(cursor: Option<Snowflake>) -> Self {
        Self { cursor, limit: MESSAGE_BATCH }
    }
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self::first_page()
    }
}

/// One page of channel history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePage {
    pub items: Vec<MessageWithMember>,
    /// Cursor for the following page; only set when this page is full
    pub next_cursor: Option<Snowflake>,
}

impl MessagePage {
    pub fn new(items: Vec<MessageWithMember>, limit: usize) -> Self {
        let next_cursor = if items.len() == limit {
            items.last().map(|m| m.message.id)
        } else {
            None
        };
        Self { items, next_cursor }
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Message with its author member and profile
    async fn find_with_member(&self, id: Snowflake) -> RepoResult<Option<MessageWithMember>>;

    /// One page of a channel's history, newest first, deleted messages included
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<MessageWithMember>>;

    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Persist content, file, deleted flag and `updated_at`
    async fn update(&self, message: &Message) -> RepoResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Member;

    fn item(id: i64) -> MessageWithMember {
        let member = Member::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3), MemberRole::Guest);
        let profile = Profile::new(Snowflake::new(2), "u", "n", "", "e");
        MessageWithMember {
            message: Message::new(Snowflake::new(id), "x", None, member.id, Snowflake::new(9)),
            author: MemberWithProfile { member, profile },
        }
    }

    #[test]
    fn test_full_page_has_cursor() {
        let items: Vec<_> = (0..MESSAGE_BATCH as i64).rev().map(item).collect();
        let page = MessagePage::new(items, MESSAGE_BATCH);
        assert_eq!(page.next_cursor, Some(Snowflake::new(0)));
    }

    #[test]
    fn test_short_page_has_no_cursor() {
        let page = MessagePage::new(vec![item(3), item(2)], MESSAGE_BATCH);
        assert_eq!(page.next_cursor, None);
        assert_eq!(MessagePage::new(Vec::new(), MESSAGE_BATCH).next_cursor, None);
    }

    #[test]
    fn test_default_query() {
        let q = MessageQuery::default();
        assert_eq!(q.limit, 10);
        assert!(q.cursor.is_none());
    }
}
