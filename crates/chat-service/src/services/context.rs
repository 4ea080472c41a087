//! Service context - dependency container for services
//!
//! Holds the repositories, id generator, realtime hub and upload store that
//! every service borrows.

use std::sync::Arc;

use chat_common::auth::JwtService;
use chat_core::traits::{
    ChannelRepository, MemberRepository, MessageRepository, ProfileRepository, ServerRepository,
};
use chat_core::{Snowflake, SnowflakeGenerator};
use chat_db::PgPool;

use super::error::{ServiceError, ServiceResult};
use super::upload::UploadStore;
use crate::realtime::EventHub;

/// Default path of the socket-backed message endpoints
pub const DEFAULT_SOCKET_URL: &str = "/api/socket/messages";

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (health checks)
    pool: PgPool,

    // Repositories
    profile_repo: Arc<dyn ProfileRepository>,
    server_repo: Arc<dyn ServerRepository>,
    member_repo: Arc<dyn MemberRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    message_repo: Arc<dyn MessageRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    event_hub: EventHub,
    upload_store: UploadStore,
    socket_url: String,
}

impl ServiceContext {
    // === Database Pool ===

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    pub fn server_repo(&self) -> &dyn ServerRepository {
        self.server_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn event_hub(&self) -> &EventHub {
        &self.event_hub
    }

    pub fn upload_store(&self) -> &UploadStore {
        &self.upload_store
    }

    /// Base URL the chat client sends message edits and deletes to
    pub fn socket_url(&self) -> &str {
        &self.socket_url
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("event_hub", &self.event_hub)
            .field("upload_store", &self.upload_store)
            .field("socket_url", &self.socket_url)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    server_repo: Option<Arc<dyn ServerRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    event_hub: Option<EventHub>,
    upload_store: Option<UploadStore>,
    socket_url: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn server_repo(mut self, repo: Arc<dyn ServerRepository>) -> Self {
        self.server_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn event_hub(mut self, hub: EventHub) -> Self {
        self.event_hub = Some(hub);
        self
    }

    pub fn upload_store(mut self, store: UploadStore) -> Self {
        self.upload_store = Some(store);
        self
    }

    pub fn socket_url(mut self, url: impl Into<String>) -> Self {
        self.socket_url = Some(url.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// The hub, upload store and socket URL fall back to defaults; everything
    /// else is required.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            profile_repo: required(self.profile_repo, "profile_repo")?,
            server_repo: required(self.server_repo, "server_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            channel_repo: required(self.channel_repo, "channel_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            event_hub: self.event_hub.unwrap_or_default(),
            upload_store: self
                .upload_store
                .unwrap_or_else(|| UploadStore::new("./uploads", "/uploads")),
            socket_url: self
                .socket_url
                .unwrap_or_else(|| DEFAULT_SOCKET_URL.to_string()),
        })
    }
}
