//! In-memory repositories for service tests

use std::sync::Arc;

use async_trait::async_trait;
use chat_common::{IdentityClaims, JwtService};
use chat_core::traits::{
    ChannelRepository, LeaveOutcome, MemberRepository, MessageQuery, MessageRepository,
    ProfileRepository, RepoResult, ServerRepository,
};
use chat_core::{
    Channel, Member, MemberRole, MemberWithProfile, Message, MessageWithMember, Profile, Server,
    Snowflake, SnowflakeGenerator,
};
use parking_lot::Mutex;
use sqlx::postgres::PgPoolOptions;

use super::context::{ServiceContext, ServiceContextBuilder};
use super::upload::UploadStore;
use crate::realtime::EventHub;

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    servers: Vec<Server>,
    members: Vec<Member>,
    channels: Vec<Channel>,
    messages: Vec<Message>,
}

/// Every repository trait over one shared set of tables
#[derive(Clone, Default)]
pub(crate) struct MemoryStore(Arc<Mutex<Tables>>);

impl MemoryStore {
    fn with_profile(t: &Tables, member: &Member) -> Option<MemberWithProfile> {
        let profile = t.profiles.iter().find(|p| p.id == member.profile_id)?;
        Some(MemberWithProfile {
            member: member.clone(),
            profile: profile.clone(),
        })
    }

    fn with_author(t: &Tables, message: &Message) -> Option<MessageWithMember> {
        let member = t.members.iter().find(|m| m.id == message.member_id)?;
        Some(MessageWithMember {
            message: message.clone(),
            author: Self::with_profile(t, member)?,
        })
    }

    pub(crate) fn member_count(&self, server_id: Snowflake) -> usize {
        self.0.lock().members.iter().filter(|m| m.server_id == server_id).count()
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>> {
        Ok(self.0.lock().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Profile>> {
        Ok(self.0.lock().profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn create_or_get(&self, profile: &Profile) -> RepoResult<Profile> {
        let mut t = self.0.lock();
        if let Some(existing) = t.profiles.iter().find(|p| p.user_id == profile.user_id) {
            return Ok(existing.clone());
        }
        t.profiles.push(profile.clone());
        Ok(profile.clone())
    }
}

#[async_trait]
impl ServerRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Server>> {
        Ok(self.0.lock().servers.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_invite_code(&self, invite_code: &str) -> RepoResult<Option<Server>> {
        Ok(self.0.lock().servers.iter().find(|s| s.invite_code == invite_code).cloned())
    }

    async fn find_by_member_profile(&self, profile_id: Snowflake) -> RepoResult<Vec<Server>> {
        let t = self.0.lock();
        Ok(t.servers
            .iter()
            .filter(|s| {
                t.members
                    .iter()
                    .any(|m| m.server_id == s.id && m.profile_id == profile_id)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, server: &Server, general: &Channel, owner: &Member) -> RepoResult<()> {
        let mut t = self.0.lock();
        t.servers.push(server.clone());
        t.channels.push(general.clone());
        t.members.push(owner.clone());
        Ok(())
    }

    async fn update(&self, server: &Server) -> RepoResult<()> {
        let mut t = self.0.lock();
        let Some(row) = t.servers.iter_mut().find(|s| s.id == server.id) else {
            return Err(chat_core::DomainError::ServerNotFound(server.id));
        };
        *row = server.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut t = self.0.lock();
        let channels: Vec<_> = t.channels.iter().filter(|c| c.server_id == id).map(|c| c.id).collect();
        t.messages.retain(|m| !channels.contains(&m.channel_id));
        t.channels.retain(|c| c.server_id != id);
        t.members.retain(|m| m.server_id != id);
        t.servers.retain(|s| s.id != id);
        Ok(())
    }

    async fn leave(&self, server_id: Snowflake, profile_id: Snowflake) -> RepoResult<LeaveOutcome> {
        let mut t = self.0.lock();
        let Some(server) = t.servers.iter().find(|s| s.id == server_id).cloned() else {
            return Ok(LeaveOutcome::ServerNotFound);
        };
        if server.is_owned_by(profile_id) {
            return Ok(LeaveOutcome::IsOwner);
        }
        let before = t.members.len();
        t.members
            .retain(|m| !(m.server_id == server_id && m.profile_id == profile_id));
        if t.members.len() == before {
            return Ok(LeaveOutcome::NotMember);
        }
        Ok(LeaveOutcome::Left(server))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        Ok(self.0.lock().members.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_server_and_profile(
        &self,
        server_id: Snowflake,
        profile_id: Snowflake,
    ) -> RepoResult<Option<Member>> {
        Ok(self
            .0
            .lock()
            .members
            .iter()
            .find(|m| m.server_id == server_id && m.profile_id == profile_id)
            .cloned())
    }

    async fn find_by_server(&self, server_id: Snowflake) -> RepoResult<Vec<MemberWithProfile>> {
        let t = self.0.lock();
        let mut members: Vec<_> = t
            .members
            .iter()
            .filter(|m| m.server_id == server_id)
            .filter_map(|m| Self::with_profile(&t, m))
            .collect();
        members.sort_by_key(|m| (m.member.role.rank(), m.member.created_at, m.member.id));
        Ok(members)
    }

    async fn add_if_absent(&self, member: &Member) -> RepoResult<(Member, bool)> {
        let mut t = self.0.lock();
        if let Some(existing) = t
            .members
            .iter()
            .find(|m| m.server_id == member.server_id && m.profile_id == member.profile_id)
        {
            return Ok((existing.clone(), false));
        }
        t.members.push(member.clone());
        Ok((member.clone(), true))
    }

    async fn update_role(&self, id: Snowflake, role: MemberRole) -> RepoResult<()> {
        if let Some(m) = self.0.lock().members.iter_mut().find(|m| m.id == id) {
            m.set_role(role);
        }
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.0.lock().members.retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl ChannelRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self.0.lock().channels.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_server(&self, server_id: Snowflake) -> RepoResult<Vec<Channel>> {
        Ok(self
            .0
            .lock()
            .channels
            .iter()
            .filter(|c| c.server_id == server_id)
            .cloned()
            .collect())
    }

    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        self.0.lock().channels.push(channel.clone());
        Ok(())
    }

    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        if let Some(row) = self.0.lock().channels.iter_mut().find(|c| c.id == channel.id) {
            *row = channel.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut t = self.0.lock();
        t.messages.retain(|m| m.channel_id != id);
        t.channels.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.0.lock().messages.iter().find(|m| m.id == id).cloned())
    }

    async fn find_with_member(&self, id: Snowflake) -> RepoResult<Option<MessageWithMember>> {
        let t = self.0.lock();
        Ok(t.messages
            .iter()
            .find(|m| m.id == id)
            .and_then(|m| Self::with_author(&t, m)))
    }

    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<MessageWithMember>> {
        let t = self.0.lock();
        let mut rows: Vec<_> = t.messages.iter().filter(|m| m.channel_id == channel_id).collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let start = match query.cursor {
            None => 0,
            Some(cursor) => match rows.iter().position(|m| m.id == cursor) {
                Some(i) => i + 1,
                None => return Ok(Vec::new()),
            },
        };
        Ok(rows
            .into_iter()
            .skip(start)
            .take(query.limit)
            .filter_map(|m| Self::with_author(&t, m))
            .collect())
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.0.lock().messages.push(message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> RepoResult<()> {
        if let Some(row) = self.0.lock().messages.iter_mut().find(|m| m.id == message.id) {
            *row = message.clone();
        }
        Ok(())
    }
}

/// A context over a fresh [`MemoryStore`]. Must run inside a tokio runtime.
pub(crate) fn memory_context() -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::default();
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool");
    let ctx = ServiceContextBuilder::new()
        .pool(pool)
        .profile_repo(Arc::new(store.clone()))
        .server_repo(Arc::new(store.clone()))
        .member_repo(Arc::new(store.clone()))
        .channel_repo(Arc::new(store.clone()))
        .message_repo(Arc::new(store.clone()))
        .jwt_service(Arc::new(JwtService::new("memory-secret", None)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
        .event_hub(EventHub::new(16))
        .upload_store(UploadStore::new(
            std::env::temp_dir().join("chat-service-unit-uploads"),
            "/uploads",
        ))
        .build()
        .expect("context");
    (ctx, store)
}

/// Claims for a provider user called `name`
pub(crate) fn claims(name: &str) -> IdentityClaims {
    IdentityClaims::new(format!("user_{name}"), chrono::Duration::minutes(5))
        .with_name(name)
        .with_email(format!("{name}@example.com"))
}
