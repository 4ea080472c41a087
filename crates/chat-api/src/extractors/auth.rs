//! Authentication extractors
//!
//! The identity provider hands clients an HS256 bearer token. Browsers that
//! cannot set headers (websocket upgrades, invite links) may pass it as
//! `?access_token=` instead.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chat_common::IdentityClaims;
use chat_core::Profile;
use chat_service::services::ProfileService;
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

async fn bearer_token<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<String> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }
    Query::<TokenQuery>::from_request_parts(parts, state)
        .await
        .ok()
        .and_then(|Query(q)| q.access_token)
        .filter(|t| !t.is_empty())
}

/// Verified token claims; no token or a bad one is a 401
#[derive(Debug, Clone)]
pub struct Identity(pub IdentityClaims);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await.ok_or(ApiError::Unauthorized)?;
        let app_state = AppState::from_ref(state);
        let claims = app_state.jwt_service().verify(&token).map_err(|e| {
            tracing::warn!(error = %e, "Rejected identity token");
            ApiError::Unauthorized
        })?;
        Ok(Identity(claims))
    }
}

/// Profile of the caller; 401 without a token or without a profile
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Identity(claims) = Identity::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);
        let profile = ProfileService::new(app_state.service_context())
            .current(&claims)
            .await?;
        Ok(CurrentProfile(profile))
    }
}

/// Profile of the caller when there is one; never rejects for missing auth
#[derive(Debug, Clone)]
pub struct OptionalProfile(pub Option<Profile>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalProfile
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(Identity(claims)) = Identity::from_request_parts(parts, state).await else {
            return Ok(OptionalProfile(None));
        };
        let app_state = AppState::from_ref(state);
        let profile = ProfileService::new(app_state.service_context())
            .find(&claims)
            .await?;
        Ok(OptionalProfile(profile))
    }
}
