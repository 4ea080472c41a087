//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use futures_util::StreamExt;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, location, TestServer,
};
use reqwest::StatusCode;
use tokio_tungstenite::tungstenite::Message as WsMessage;

/// Owner token, guest token, and a server the guest has joined
async fn server_with_guest(server: &TestServer) -> (String, String, Server) {
    let owner = server.sign_up("owner").await.unwrap();
    let guest = server.sign_up("guest").await.unwrap();

    let response = server
        .post_auth("/api/servers", &owner, &CreateServerBody::unique())
        .await
        .unwrap();
    let created: Server = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/invites/{}/accept", created.invite_code),
            &guest,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    (owner, guest, created)
}

async fn general_channel(server: &TestServer, token: &str, server_id: &str) -> Channel {
    let response = server
        .get_auth(&format!("/api/servers/{server_id}/channels"), token)
        .await
        .unwrap();
    let channels: Vec<Channel> = assert_json(response, StatusCode::OK).await.unwrap();
    channels.into_iter().find(|c| c.name == "general").unwrap()
}

async fn send_message(server: &TestServer, token: &str, server_id: &str, channel_id: &str, content: &str) -> Message {
    let response = server
        .post_auth(
            &format!("/api/socket/messages?server_id={server_id}&channel_id={channel_id}"),
            token,
            &MessageBody::text(content),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Next text frame, or `None` once the socket closes or `wait` runs out
async fn next_text<S>(socket: &mut S, wait: Duration) -> Option<String>
where
    S: futures_util::Stream<Item = Result<WsMessage, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    tokio::time::timeout(wait, async {
        loop {
            match socket.next().await {
                Some(Ok(WsMessage::Text(text))) => return Some(text),
                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => return None,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .ok()
    .flatten()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_initial_profile_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(&format!("ada{}", unique_suffix())).unwrap();

    let response = server.get_auth("/api/profile", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let first: Profile = assert_json(
        server.client.post(format!("{}/api/profile", server.base_url())).bearer_auth(&token).send().await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let second: Profile = assert_json(
        server.client.post(format!("{}/api/profile", server.base_url())).bearer_auth(&token).send().await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first.id, second.id);
    assert!(first.email.ends_with("@example.com"));

    let current: Profile = assert_json(server.get_auth("/api/profile", &token).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(current.user_id, first.user_id);
}

#[tokio::test]
async fn test_requests_without_identity_are_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/servers").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");

    let response = server.patch_empty("/api/servers/1/leave", None).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/api/servers", "not-a-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Server Tests
// ============================================================================

#[tokio::test]
async fn test_create_server_seeds_general_and_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.sign_up("owner").await.unwrap();
    let body = CreateServerBody::unique();

    let response = server.post_auth("/api/servers", &owner, &body).await.unwrap();
    let created: Server = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.name, body.name);
    assert!(!created.invite_code.is_empty());

    let response = server.get_auth(&format!("/api/servers/{}", created.id), &owner).await.unwrap();
    let detail: ServerDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.server.id, created.id);
    assert_eq!(detail.channels.len(), 1);
    assert_eq!(detail.channels[0].name, "general");
    assert_eq!(detail.members.len(), 1);
    assert_eq!(detail.members[0].role, "ADMIN");
    assert_eq!(detail.members[0].profile_id, created.profile_id);
}

#[tokio::test]
async fn test_invalid_server_body() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.sign_up("owner").await.unwrap();

    let body = CreateServerBody {
        name: String::new(),
        image_url: "/i.png".to_string(),
    };
    let response = server.post_auth("/api/servers", &owner, &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_regenerate_invite_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let path = format!("/api/servers/{}/invite-code", created.id);

    let response = server.patch_empty(&path, Some(&guest)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.patch_empty(&path, Some(&owner)).await.unwrap();
    let updated: Server = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(updated.invite_code, created.invite_code);
}

// ============================================================================
// Leave Tests
// ============================================================================

#[tokio::test]
async fn test_leave_server() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let path = format!("/api/servers/{}/leave", created.id);

    let response = server.patch_empty(&path, Some(&guest)).await.unwrap();
    let left: Server = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(left.id, created.id);

    // no longer a member
    let response = server.patch_empty(&path, Some(&guest)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.patch_empty(&path, Some(&owner)).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "CANNOT_LEAVE_OWNED_SERVER");

    let response = server.get_auth("/api/servers", &guest).await.unwrap();
    let servers: Vec<Server> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(servers.iter().all(|s| s.id != created.id));
}

#[tokio::test]
async fn test_leave_invalid_server_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let guest = server.sign_up("guest").await.unwrap();

    let response = server.patch_empty("/api/servers/abc/leave", Some(&guest)).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Invite Tests
// ============================================================================

#[tokio::test]
async fn test_invite_page_redirects() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.sign_up("owner").await.unwrap();
    let guest = server.sign_up("guest").await.unwrap();
    let response = server
        .post_auth("/api/servers", &owner, &CreateServerBody::unique())
        .await
        .unwrap();
    let created: Server = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&format!("/invite/{}", created.invite_code)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some(server.config.auth.sign_in_url.as_str()));

    let response = server
        .get(&format!("/invite/{}?access_token={guest}", created.invite_code))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some(format!("/servers/{}", created.id)));

    let response = server.get_auth("/invite/does-not-exist", &guest).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));

    let response = server.get("/invite/").await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some(server.config.auth.sign_in_url.as_str()));

    let response = server.get_auth("/invite/", &guest).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));

    let response = server.get_auth(&format!("/api/servers/{}/members", created.id), &guest).await.unwrap();
    let members: Vec<Member> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn test_accept_invite_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, guest, created) = server_with_guest(&server).await;

    let response = server
        .post_auth(
            &format!("/api/invites/{}/accept", created.invite_code),
            &guest,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let again: InviteAccept = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!again.joined);
    assert_eq!(again.server.id, created.id);
    assert_eq!(again.redirect, format!("/servers/{}", created.id));

    let response = server
        .post_auth("/api/invites/nope/accept", &guest, &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_role_and_kick() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;

    let response = server.get_auth(&format!("/api/servers/{}/members", created.id), &owner).await.unwrap();
    let members: Vec<Member> = assert_json(response, StatusCode::OK).await.unwrap();
    let guest_member = members.iter().find(|m| m.role == "GUEST").unwrap();

    let path = format!("/api/members/{}?server_id={}", guest_member.id, created.id);
    let response = server
        .patch_auth(&path, &guest, &serde_json::json!({ "role": "ADMIN" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &owner, &serde_json::json!({ "role": "MODERATOR" }))
        .await
        .unwrap();
    let detail: ServerDetail = assert_json(response, StatusCode::OK).await.unwrap();
    let promoted = detail.members.iter().find(|m| m.id == guest_member.id).unwrap();
    assert_eq!(promoted.role, "MODERATOR");

    let response = server.delete_auth(&path, &owner).await.unwrap();
    let detail: ServerDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.members.len(), 1);

    let response = server.delete_auth(&format!("/api/members/{}", guest_member.id), &owner).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "Server ID missing");
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_channel_management() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let create_path = format!("/api/channels?server_id={}", created.id);

    let response = server.post_auth(&create_path, &owner, &ChannelBody::text("general")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.post_auth(&create_path, &guest, &ChannelBody::text("mine")).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.post_auth(&create_path, &owner, &ChannelBody::text("random")).await.unwrap();
    let random: Channel = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(random.channel_type, "TEXT");
    assert_eq!(random.server_id, created.id);

    let general = general_channel(&server, &owner, &created.id).await;
    let response = server
        .patch_auth(
            &format!("/api/channels/{}?server_id={}", general.id, created.id),
            &owner,
            &ChannelBody::text("lobby"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&format!("/api/channels/{}/view?server_id={}", random.id, created.id), &guest)
        .await
        .unwrap();
    let view: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view.len(), 2);
    assert!(view.iter().any(|c| c["active"] == true && c["name"] == "random"));
    assert!(view.iter().all(|c| c["can_edit"] == false));

    let response = server
        .delete_auth(&format!("/api/channels/{}?server_id={}", random.id, created.id), &owner)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_message_history_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let general = general_channel(&server, &owner, &created.id).await;

    for i in 0..12 {
        send_message(&server, &owner, &created.id, &general.id, &format!("message {i}")).await;
    }

    let response = server
        .get_auth(&format!("/api/messages?channel_id={}", general.id), &guest)
        .await
        .unwrap();
    let first: Page<Message> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].content, "message 11");
    assert_eq!(first.next_cursor.as_deref(), Some(first.items[9].id.as_str()));

    let cursor = first.next_cursor.unwrap();
    let response = server
        .get_auth(&format!("/api/messages?channel_id={}&cursor={cursor}", general.id), &guest)
        .await
        .unwrap();
    let second: Page<Message> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.items[1].content, "message 0");
    assert!(second.next_cursor.is_none());
}

#[tokio::test]
async fn test_message_history_requires_channel_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.sign_up("reader").await.unwrap();

    let response = server.get_auth("/api/messages", &token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.message, "Channel ID missing");
}

#[tokio::test]
async fn test_edit_and_delete_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let general = general_channel(&server, &owner, &created.id).await;
    let message = send_message(&server, &guest, &created.id, &general.id, "hello").await;
    let path = format!(
        "/api/socket/messages/{}?server_id={}&channel_id={}",
        message.id, created.id, general.id
    );

    // admins may delete but never edit someone else's message
    let response = server.patch_auth(&path, &owner, &MessageBody::text("hijack")).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.patch_auth(&path, &guest, &MessageBody::text("hello there")).await.unwrap();
    let edited: Message = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "hello there");

    let response = server.delete_auth(&path, &owner).await.unwrap();
    let deleted: Message = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.deleted);
    assert_eq!(deleted.content, "This message has been deleted.");
    assert!(deleted.file_url.is_none());

    let response = server.patch_auth(&path, &guest, &MessageBody::text("back")).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "MESSAGE_DELETED");
}

#[tokio::test]
async fn test_socket_delivers_new_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let general = general_channel(&server, &owner, &created.id).await;

    let url = server.ws_url(&format!("/api/socket/channels/{}?access_token={guest}", general.id));
    let (mut socket, _) = tokio_tungstenite::connect_async(url).await.unwrap();

    let sent = send_message(&server, &owner, &created.id, &general.id, "ping").await;

    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match socket.next().await {
                Some(Ok(WsMessage::Text(text))) => return text,
                Some(Ok(_)) => continue,
                other => panic!("socket closed: {other:?}"),
            }
        }
    })
    .await
    .expect("no frame received");

    let event: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(event["key"], format!("chat:{}:messages", general.id));
    assert_eq!(event["message"]["id"], sent.id);
    assert_eq!(event["message"]["content"], "ping");
}

#[tokio::test]
async fn test_socket_rejects_non_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, _, created) = server_with_guest(&server).await;
    let general = general_channel(&server, &owner, &created.id).await;
    let stranger = server.sign_up("stranger").await.unwrap();

    let url = server.ws_url(&format!("/api/socket/channels/{}?access_token={stranger}", general.id));
    assert!(tokio_tungstenite::connect_async(url).await.is_err());
}

#[tokio::test]
async fn test_kicked_member_stops_receiving_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;
    let general = general_channel(&server, &owner, &created.id).await;

    let url = server.ws_url(&format!("/api/socket/channels/{}?access_token={guest}", general.id));
    let (mut socket, _) = tokio_tungstenite::connect_async(url).await.unwrap();

    let response = server.get_auth(&format!("/api/servers/{}/members", created.id), &owner).await.unwrap();
    let members: Vec<Member> = assert_json(response, StatusCode::OK).await.unwrap();
    let guest_member = members.iter().find(|m| m.role == "GUEST").unwrap();
    let response = server
        .delete_auth(&format!("/api/members/{}?server_id={}", guest_member.id, created.id), &owner)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    send_message(&server, &owner, &created.id, &general.id, "members only").await;

    let frame = next_text(&mut socket, Duration::from_secs(2)).await;
    assert!(frame.is_none(), "kicked member still got {frame:?}");
}

#[tokio::test]
async fn test_server_socket_streams_membership_events() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, guest, created) = server_with_guest(&server).await;

    let url = server.ws_url(&format!("/api/socket/servers/{}?access_token={owner}", created.id));
    let (mut owner_socket, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    let url = server.ws_url(&format!("/api/socket/servers/{}?access_token={guest}", created.id));
    let (mut guest_socket, _) = tokio_tungstenite::connect_async(url).await.unwrap();

    let newcomer = server.sign_up("newcomer").await.unwrap();
    let response = server
        .post_auth(
            &format!("/api/invites/{}/accept", created.invite_code),
            &newcomer,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let frame = next_text(&mut owner_socket, Duration::from_secs(5)).await.expect("no frame received");
    let event: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(event["key"], format!("server:{}", created.id));
    assert_eq!(event["message"]["type"], "MEMBER_JOINED");

    // the guest sees the join, then its own departure, then the socket closes
    let frame = next_text(&mut guest_socket, Duration::from_secs(5)).await.expect("no frame received");
    assert!(frame.contains("MEMBER_JOINED"));
    let response = server
        .patch_empty(&format!("/api/servers/{}/leave", created.id), Some(&guest))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let frame = next_text(&mut guest_socket, Duration::from_secs(5)).await.expect("no frame received");
    assert!(frame.contains("MEMBER_LEFT"));
    assert!(next_text(&mut guest_socket, Duration::from_secs(5)).await.is_none());

    let stranger = server.sign_up("stranger").await.unwrap();
    let url = server.ws_url(&format!("/api/socket/servers/{}?access_token={stranger}", created.id));
    assert!(tokio_tungstenite::connect_async(url).await.is_err());
}

// ============================================================================
// Upload Tests
// ============================================================================

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn test_upload_and_serve_image() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.sign_up("uploader").await.unwrap();

    let response = server
        .upload("serverImage", &token, "icon.png", "image/png", PNG_BYTES.to_vec())
        .await
        .unwrap();
    let stored: Vec<Uploaded> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "icon.png");
    assert_eq!(stored[0].size, PNG_BYTES.len());

    let response = server.get(&stored[0].url).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_upload_is_served_with_its_mime_type_not_its_name() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.sign_up("uploader").await.unwrap();

    let response = server
        .upload("messageFile", &token, "evil.html", "image/png", PNG_BYTES.to_vec())
        .await
        .unwrap();
    let stored: Vec<Uploaded> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(stored[0].url.ends_with(".png"), "{}", stored[0].url);

    let response = server.get(&stored[0].url).await.unwrap();
    let served_as = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(served_as, "image/png");

    let response = server
        .upload("messageFile", &token, "logo.svg", "image/svg+xml", b"<svg/>".to_vec())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_upload_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.sign_up("uploader").await.unwrap();

    let response = server
        .upload("serverImage", &token, "doc.pdf", "application/pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .upload("messageFile", &token, "doc.PDF", "application/pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .upload("avatar", &token, "icon.png", "image/png", PNG_BYTES.to_vec())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let too_big = vec![0u8; 4 * 1024 * 1024 + 1];
    let response = server
        .upload("serverImage", &token, "big.png", "image/png", too_big)
        .await
        .unwrap();
    assert_status(response, StatusCode::PAYLOAD_TOO_LARGE).await.unwrap();
}
