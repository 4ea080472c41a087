//! Profile service
//!
//! Maps identity-provider sessions to local profiles.

use chat_common::IdentityClaims;
use chat_core::Profile;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile of the signed-in user; a session without one is unauthenticated
    #[instrument(skip(self, claims), fields(sub = %claims.sub))]
    pub async fn current(&self, claims: &IdentityClaims) -> ServiceResult<Profile> {
        self.find(claims)
            .await?
            .ok_or_else(ServiceError::unauthenticated)
    }

    /// Like [`Self::current`] but absence is not an error
    pub async fn find(&self, claims: &IdentityClaims) -> ServiceResult<Option<Profile>> {
        Ok(self.ctx.profile_repo().find_by_user_id(&claims.sub).await?)
    }

    /// Profile of the signed-in user, created from the token claims on first sight
    #[instrument(skip(self, claims), fields(sub = %claims.sub))]
    pub async fn initial(&self, claims: &IdentityClaims) -> ServiceResult<Profile> {
        if let Some(profile) = self.find(claims).await? {
            return Ok(profile);
        }

        let candidate = Profile::new(
            self.ctx.generate_id(),
            claims.sub.clone(),
            claims.display_name(),
            claims.picture.clone().unwrap_or_default(),
            claims.email.clone().unwrap_or_default(),
        );
        let profile = self.ctx.profile_repo().create_or_get(&candidate).await?;
        if profile.id == candidate.id {
            info!(profile_id = %profile.id, "Profile created");
        }
        Ok(profile)
    }
}
