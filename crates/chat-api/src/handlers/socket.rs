//! Websocket subscriptions
//!
//! A client watching a channel opens one socket and receives every event
//! published on that channel's message keys as `{ "key", "message" }` frames.
//! A client watching a server receives that server's domain events the same
//! way. Either socket is closed once the subscriber leaves, is kicked, or the
//! server (or the watched channel) is deleted.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use chat_core::{DomainEvent, MessageEventKind, Snowflake};
use chat_service::dto::require_id;
use chat_service::services::PermissionService;
use chat_service::{EventHub, RealtimeEvent};
use futures_util::stream::{self, BoxStream, SelectAll};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::extractors::CurrentProfile;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/socket/channels/{channel_id}
///
/// Members only; the upgrade is refused before any frame is sent otherwise.
pub async fn subscribe_channel(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(channel_id): Path<String>,
    ws: WebSocketUpgrade,
) -> ApiResult<impl IntoResponse> {
    let channel_id = require_id(Some(&channel_id), "Channel ID")?;
    let (channel, _) = PermissionService::new(state.service_context())
        .require_channel_member(channel_id, profile.id)
        .await?;

    let subscription = Subscription::open(
        state.event_hub(),
        profile.id,
        channel.server_id,
        Some(channel_id),
        vec![
            MessageEventKind::Added.key(channel_id),
            MessageEventKind::Updated.key(channel_id),
        ],
    );

    tracing::info!(%channel_id, profile_id = %profile.id, "Channel subscription opened");
    Ok(ws.on_upgrade(move |socket| subscription.run(socket)))
}

/// GET /api/socket/servers/{server_id}
///
/// Streams the server's domain events to its members.
pub async fn subscribe_server(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(server_id): Path<String>,
    ws: WebSocketUpgrade,
) -> ApiResult<impl IntoResponse> {
    let server_id = require_id(Some(&server_id), "Server ID")?;
    PermissionService::new(state.service_context())
        .require_member(server_id, profile.id)
        .await?;

    let subscription = Subscription::open(
        state.event_hub(),
        profile.id,
        server_id,
        None,
        vec![DomainEvent::server_topic(server_id)],
    );

    tracing::info!(%server_id, profile_id = %profile.id, "Server subscription opened");
    Ok(ws.on_upgrade(move |socket| subscription.run(socket)))
}

type EventStream = BoxStream<'static, Result<Arc<RealtimeEvent>, u64>>;

/// One socket's receivers plus what it needs to notice its own revocation
struct Subscription {
    hub: EventHub,
    profile_id: Snowflake,
    channel_id: Option<Snowflake>,
    server_topic: String,
    /// Keys whose events are forwarded to the client
    forwarded: Vec<String>,
    /// Every key subscribed to, the server topic included
    watched: Vec<String>,
    events: SelectAll<EventStream>,
}

impl Subscription {
    /// Subscribe before the upgrade completes so nothing published after the
    /// handshake is missed.
    fn open(
        hub: &EventHub,
        profile_id: Snowflake,
        server_id: Snowflake,
        channel_id: Option<Snowflake>,
        forwarded: Vec<String>,
    ) -> Self {
        let server_topic = DomainEvent::server_topic(server_id);
        let mut watched = forwarded.clone();
        if !watched.contains(&server_topic) {
            watched.push(server_topic.clone());
        }
        let events = stream::select_all(
            watched
                .iter()
                .map(|key| receiver_stream(hub.subscribe(key)).boxed()),
        );
        Self {
            hub: hub.clone(),
            profile_id,
            channel_id,
            server_topic,
            forwarded,
            watched,
            events,
        }
    }

    async fn run(self, socket: WebSocket) {
        let Self {
            hub,
            profile_id,
            channel_id,
            server_topic,
            forwarded,
            watched,
            mut events,
        } = self;

        let (mut ws_sink, mut ws_stream) = socket.split();

        // Client frames are ignored; the stream only tells us when it goes away.
        let mut recv_task = tokio::spawn(async move {
            while let Some(msg) = ws_stream.next().await {
                match msg {
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        });

        let mut send_task = tokio::spawn(async move {
            while let Some(next) = events.next().await {
                let event = match next {
                    Ok(event) => event,
                    Err(skipped) => {
                        tracing::warn!(%profile_id, skipped, "Subscriber lagged, events dropped");
                        continue;
                    }
                };

                let revoked = event.key == server_topic
                    && serde_json::from_value::<DomainEvent>(event.message.clone())
                        .is_ok_and(|e| e.revokes_access(profile_id, channel_id));

                if forwarded.contains(&event.key) && !send(&mut ws_sink, &event).await {
                    break;
                }
                if revoked {
                    tracing::info!(%profile_id, key = %event.key, "Access revoked, closing subscription");
                    break;
                }
            }
            let _ = ws_sink.close().await;
        });

        tokio::select! {
            _ = &mut recv_task => {
                send_task.abort();
                let _ = send_task.await;
            }
            _ = &mut send_task => {
                recv_task.abort();
                let _ = recv_task.await;
            }
        }

        // Both tasks are gone, so are their receivers.
        hub.release(&watched);
        tracing::debug!(%profile_id, "Subscription closed");
    }
}

/// Receiver as a stream; lag surfaces as `Err(skipped)` and closing ends it
fn receiver_stream(
    rx: broadcast::Receiver<Arc<RealtimeEvent>>,
) -> impl Stream<Item = Result<Arc<RealtimeEvent>, u64>> {
    stream::unfold(rx, |mut rx| async move {
        match rx.recv().await {
            Ok(event) => Some((Ok(event), rx)),
            Err(RecvError::Lagged(skipped)) => Some((Err(skipped), rx)),
            Err(RecvError::Closed) => None,
        }
    })
}

/// Forward one event; false once the client is gone
async fn send<S>(sink: &mut S, event: &RealtimeEvent) -> bool
where
    S: Sink<Message> + Unpin,
{
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode realtime event");
            return true;
        }
    };
    sink.send(Message::Text(json.into())).await.is_ok()
}
