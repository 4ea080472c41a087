//! Route definitions
//!
//! JSON API under `/api`, the invite page under `/invite`, uploaded files
//! under the configured public URL, and health checks at the root.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use chat_service::services::MAX_UPLOAD_BYTES;
use tower_http::services::ServeDir;

use crate::handlers::{
    channels, health, invites, members, messages, profile, servers, socket, uploads,
};
use crate::state::AppState;

/// Request bodies on upload routes may exceed the route limit so the size
/// check can answer with its own error.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES * 2;

/// All application routes, without middleware
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/invite", get(invites::invite_page_without_code))
        .route("/invite/", get(invites::invite_page_without_code))
        .route("/invite/:invite_code", get(invites::invite_page))
        .merge(health_routes())
}

/// Static files written by the upload routes.
///
/// Only mounted when the public URL is a local path; an absolute URL means
/// something else serves the directory.
pub fn upload_files(upload_dir: &str, public_url: &str) -> Router<AppState> {
    let mount = public_url.trim_end_matches('/');
    if !mount.starts_with('/') || mount.len() < 2 {
        return Router::new();
    }
    Router::new().nest_service(mount, ServeDir::new(upload_dir))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(profile_routes())
        .merge(server_routes())
        .merge(member_routes())
        .merge(channel_routes())
        .merge(message_routes())
        .merge(upload_routes())
        .route("/invites/:invite_code/accept", post(invites::accept_invite))
}

fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(profile::get_profile).post(profile::initial_profile),
    )
}

fn server_routes() -> Router<AppState> {
    Router::new()
        .route("/servers", get(servers::list_servers).post(servers::create_server))
        .route(
            "/servers/:server_id",
            get(servers::get_server)
                .patch(servers::update_server)
                .delete(servers::delete_server),
        )
        .route("/servers/:server_id/invite-code", patch(servers::regenerate_invite_code))
        .route("/servers/:server_id/leave", patch(servers::leave_server))
        .route("/servers/:server_id/members", get(members::list_members))
        .route("/servers/:server_id/channels", get(channels::list_channels))
}

fn member_routes() -> Router<AppState> {
    Router::new().route(
        "/members/:member_id",
        patch(members::update_member_role).delete(members::kick_member),
    )
}

fn channel_routes() -> Router<AppState> {
    Router::new()
        .route("/channels", post(channels::create_channel))
        .route(
            "/channels/:channel_id",
            patch(channels::update_channel).delete(channels::delete_channel),
        )
        .route("/channels/:channel_id/view", get(channels::channel_view))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::list_messages))
        .route("/messages/view", get(messages::messages_view))
        .route("/socket/messages", post(messages::create_message))
        .route(
            "/socket/messages/:message_id",
            patch(messages::edit_message).delete(messages::delete_message),
        )
        .route("/socket/channels/:channel_id", get(socket::subscribe_channel))
        .route("/socket/servers/:server_id", get(socket::subscribe_server))
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploadthing/:route", post(uploads::upload))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
