//! Permission service
//!
//! Membership and role checks shared by the other services. A server the
//! caller is not a member of is reported as not found.

use chat_core::{Channel, DomainError, Member, Permissions, Server, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The server and the caller's membership in it
    #[instrument(skip(self))]
    pub async fn require_member(
        &self,
        server_id: Snowflake,
        profile_id: Snowflake,
    ) -> ServiceResult<(Server, Member)> {
        let server = self
            .ctx
            .server_repo()
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Server", server_id.to_string()))?;

        let member = self
            .ctx
            .member_repo()
            .find_by_server_and_profile(server_id, profile_id)
            .await?
            .ok_or_else(|| {
                debug!(%server_id, %profile_id, "Profile is not a member");
                ServiceError::not_found("Server", server_id.to_string())
            })?;

        Ok((server, member))
    }

    /// Like [`Self::require_member`], and the member's role grants `permission`
    #[instrument(skip(self))]
    pub async fn require_permission(
        &self,
        server_id: Snowflake,
        profile_id: Snowflake,
        permission: Permissions,
    ) -> ServiceResult<(Server, Member)> {
        let (server, member) = self.require_member(server_id, profile_id).await?;
        if !member.can(permission) {
            return Err(ServiceError::permission_denied(permission.names().join(", ")));
        }
        Ok((server, member))
    }

    /// The server, when `profile_id` owns it
    #[instrument(skip(self))]
    pub async fn require_owner(
        &self,
        server_id: Snowflake,
        profile_id: Snowflake,
    ) -> ServiceResult<Server> {
        let (server, _) = self.require_member(server_id, profile_id).await?;
        if !server.is_owned_by(profile_id) {
            return Err(DomainError::NotServerOwner.into());
        }
        Ok(server)
    }

    /// The channel, when it belongs to `server_id`
    #[instrument(skip(self))]
    pub async fn require_channel_in(
        &self,
        channel_id: Snowflake,
        server_id: Snowflake,
    ) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .filter(|c| c.server_id == server_id)
            .ok_or_else(|| DomainError::ChannelNotFound(channel_id).into())
    }

    /// The channel and the caller's membership in its server
    #[instrument(skip(self))]
    pub async fn require_channel_member(
        &self,
        channel_id: Snowflake,
        profile_id: Snowflake,
    ) -> ServiceResult<(Channel, Member)> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        let member = self
            .ctx
            .member_repo()
            .find_by_server_and_profile(channel.server_id, profile_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        Ok((channel, member))
    }
}
