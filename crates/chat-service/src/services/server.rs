//! Server service
//!
//! Server creation, management, membership listing and leaving.

use chat_core::{
    Channel, DomainError, DomainEvent, LeaveOutcome, Member, MemberRole, Profile, Server,
    Snowflake,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    ChannelResponse, CreateServerRequest, MemberResponse, ServerDetailResponse, ServerResponse,
    UpdateServerRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

pub struct ServerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ServerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a server with its `general` channel and the creator as admin
    #[instrument(skip(self, profile, request), fields(profile_id = %profile.id))]
    pub async fn create_server(
        &self,
        profile: &Profile,
        request: CreateServerRequest,
    ) -> ServiceResult<ServerResponse> {
        let server = Server::new(
            self.ctx.generate_id(),
            request.name.trim(),
            request.image_url,
            profile.id,
        );
        let general = Channel::general(self.ctx.generate_id(), profile.id, server.id);
        let owner = Member::new(self.ctx.generate_id(), profile.id, server.id, MemberRole::Admin);

        self.ctx.server_repo().create(&server, &general, &owner).await?;

        info!(server_id = %server.id, "Server created");
        Ok(ServerResponse::from(server))
    }

    /// Servers the caller belongs to
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn list_servers(&self, profile: &Profile) -> ServiceResult<Vec<ServerResponse>> {
        let servers = self.ctx.server_repo().find_by_member_profile(profile.id).await?;
        Ok(servers.into_iter().map(ServerResponse::from).collect())
    }

    /// Server with channels and members, for members only
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn get_server(
        &self,
        profile: &Profile,
        server_id: Snowflake,
    ) -> ServiceResult<ServerDetailResponse> {
        let (server, _) = PermissionService::new(self.ctx)
            .require_member(server_id, profile.id)
            .await?;
        self.detail(server).await
    }

    /// Rename or re-image a server (owner only)
    #[instrument(skip(self, profile, request), fields(profile_id = %profile.id))]
    pub async fn update_server(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        request: UpdateServerRequest,
    ) -> ServiceResult<ServerResponse> {
        let mut server = PermissionService::new(self.ctx)
            .require_owner(server_id, profile.id)
            .await?;
        server.rename(request.name.trim(), request.image_url);
        self.ctx.server_repo().update(&server).await?;

        self.publish(&DomainEvent::ServerUpdated { server_id });
        info!(%server_id, "Server updated");
        Ok(ServerResponse::from(server))
    }

    /// Delete a server and everything in it (owner only)
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn delete_server(
        &self,
        profile: &Profile,
        server_id: Snowflake,
    ) -> ServiceResult<ServerResponse> {
        let server = PermissionService::new(self.ctx)
            .require_owner(server_id, profile.id)
            .await?;
        self.ctx.server_repo().delete(server_id).await?;

        self.publish(&DomainEvent::ServerDeleted { server_id });
        info!(%server_id, "Server deleted");
        Ok(ServerResponse::from(server))
    }

    /// Issue a new invite code; old links stop working (owner only)
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn regenerate_invite_code(
        &self,
        profile: &Profile,
        server_id: Snowflake,
    ) -> ServiceResult<ServerResponse> {
        let mut server = PermissionService::new(self.ctx)
            .require_owner(server_id, profile.id)
            .await?;
        server.regenerate_invite_code();
        self.ctx.server_repo().update(&server).await?;

        info!(%server_id, "Invite code regenerated");
        Ok(ServerResponse::from(server))
    }

    /// Drop the caller's membership.
    ///
    /// Only applies when the server exists, the caller is a member, and the
    /// caller is not the owner; otherwise nothing changes.
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn leave_server(
        &self,
        profile: &Profile,
        server_id: Snowflake,
    ) -> ServiceResult<ServerResponse> {
        match self.ctx.server_repo().leave(server_id, profile.id).await? {
            LeaveOutcome::Left(server) => {
                self.publish(&DomainEvent::MemberLeft {
                    server_id,
                    profile_id: profile.id,
                });
                info!(%server_id, "Left server");
                Ok(ServerResponse::from(server))
            }
            LeaveOutcome::IsOwner => {
                warn!(%server_id, "Owner tried to leave their server");
                Err(DomainError::CannotLeaveOwnedServer.into())
            }
            LeaveOutcome::ServerNotFound | LeaveOutcome::NotMember => {
                Err(ServiceError::not_found("Server", server_id.to_string()))
            }
        }
    }

    /// Server with its channels and members
    pub(crate) async fn detail(&self, server: Server) -> ServiceResult<ServerDetailResponse> {
        let channels = self.ctx.channel_repo().find_by_server(server.id).await?;
        let members = self.ctx.member_repo().find_by_server(server.id).await?;
        Ok(ServerDetailResponse {
            server: ServerResponse::from(server),
            channels: channels.iter().map(ChannelResponse::from).collect(),
            members: members.iter().map(MemberResponse::from).collect(),
        })
    }

    fn publish(&self, event: &DomainEvent) {
        self.ctx.event_hub().publish(&event.topic(), event);
    }
}
