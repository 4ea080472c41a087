//! Invite service
//!
//! Joining a server through its invite code, and where the invite page
//! sends the browser afterwards.

use chat_core::{DomainError, DomainEvent, Member, MemberRole, Profile, Server};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of accepting an invite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteAcceptance {
    pub server: Server,
    /// False when the caller was already a member
    pub joined: bool,
}

/// Where the invite page redirects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteRedirect {
    /// No profile: go sign in first
    SignIn,
    /// Missing or unknown code
    Home,
    /// Joined, or already a member
    Server(Server),
}

impl InviteRedirect {
    pub fn location(&self, sign_in_url: &str) -> String {
        match self {
            Self::SignIn => sign_in_url.to_string(),
            Self::Home => "/".to_string(),
            Self::Server(server) => server.path(),
        }
    }
}

pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join the server behind `invite_code` as a guest. Idempotent.
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn accept(&self, profile: &Profile, invite_code: &str) -> ServiceResult<InviteAcceptance> {
        let code = invite_code.trim();
        if code.is_empty() {
            return Err(ServiceError::missing("Invite code"));
        }

        let server = self
            .ctx
            .server_repo()
            .find_by_invite_code(code)
            .await?
            .ok_or_else(|| DomainError::InviteNotFound(code.to_string()))?;

        let candidate = Member::new(self.ctx.generate_id(), profile.id, server.id, MemberRole::Guest);
        let (member, joined) = self.ctx.member_repo().add_if_absent(&candidate).await?;

        if joined {
            let event = DomainEvent::MemberJoined {
                server_id: server.id,
                member_id: member.id,
                profile_id: profile.id,
            };
            self.ctx.event_hub().publish(&event.topic(), &event);
            info!(server_id = %server.id, member_id = %member.id, "Joined server by invite");
        } else {
            debug!(server_id = %server.id, "Already a member");
        }

        Ok(InviteAcceptance { server, joined })
    }

    /// Invite page flow: decide the redirect for an optional session and code
    #[instrument(skip(self, profile))]
    pub async fn resolve(
        &self,
        profile: Option<&Profile>,
        invite_code: Option<&str>,
    ) -> ServiceResult<InviteRedirect> {
        let Some(profile) = profile else {
            return Ok(InviteRedirect::SignIn);
        };
        let Some(code) = invite_code.filter(|c| !c.trim().is_empty()) else {
            return Ok(InviteRedirect::Home);
        };

        match self.accept(profile, code).await {
            Ok(acceptance) => Ok(InviteRedirect::Server(acceptance.server)),
            Err(ServiceError::Domain(DomainError::InviteNotFound(_))) => Ok(InviteRedirect::Home),
            Err(e) => Err(e),
        }
    }
}
