//! Member service
//!
//! Member listing, role changes and kicks. Only admins manage members.

use chat_core::{DomainError, DomainEvent, MemberRole, Permissions, Profile, Snowflake};
use tracing::{info, instrument};

use crate::dto::{MemberResponse, ServerDetailResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;
use super::server::ServerService;

pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Members with profiles, admins first
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn list_members(
        &self,
        profile: &Profile,
        server_id: Snowflake,
    ) -> ServiceResult<Vec<MemberResponse>> {
        PermissionService::new(self.ctx)
            .require_member(server_id, profile.id)
            .await?;
        let members = self.ctx.member_repo().find_by_server(server_id).await?;
        Ok(members.iter().map(MemberResponse::from).collect())
    }

    /// Change another member's role; returns the refreshed server
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn change_role(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        member_id: Snowflake,
        role: MemberRole,
    ) -> ServiceResult<ServerDetailResponse> {
        let (server, actor) = PermissionService::new(self.ctx)
            .require_permission(server_id, profile.id, Permissions::MANAGE_MEMBERS)
            .await?;

        let target = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .filter(|m| m.server_id == server_id)
            .ok_or(DomainError::MemberNotFound)?;

        if target.id == actor.id {
            return Err(DomainError::CannotChangeOwnRole.into());
        }
        if server.is_owned_by(target.profile_id) {
            return Err(ServiceError::permission_denied("MANAGE_SERVER"));
        }

        self.ctx.member_repo().update_role(member_id, role).await?;

        let event = DomainEvent::MemberRoleChanged {
            server_id,
            member_id,
            role,
        };
        self.ctx.event_hub().publish(&event.topic(), &event);
        info!(%member_id, %role, "Member role changed");

        ServerService::new(self.ctx).detail(server).await
    }

    /// Remove a member from the server; returns the refreshed server
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn kick_member(
        &self,
        profile: &Profile,
        server_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<ServerDetailResponse> {
        let (server, actor) = PermissionService::new(self.ctx)
            .require_permission(server_id, profile.id, Permissions::MANAGE_MEMBERS)
            .await?;

        let target = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .filter(|m| m.server_id == server_id)
            .ok_or(DomainError::MemberNotFound)?;

        if target.id == actor.id || server.is_owned_by(target.profile_id) {
            return Err(DomainError::CannotKickOwner.into());
        }

        self.ctx.member_repo().delete(member_id).await?;

        let event = DomainEvent::MemberKicked {
            server_id,
            member_id,
            profile_id: target.profile_id,
        };
        self.ctx.event_hub().publish(&event.topic(), &event);
        info!(%member_id, "Member kicked");

        ServerService::new(self.ctx).detail(server).await
    }
}
