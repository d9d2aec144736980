// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! axum WebSocket upgrade handler for bot sessions.
//!
//! The authenticated bot user id is provided by upstream middleware as a
//! request extension; this handler only manages the socket and its place
//! in the registry.

use axum::{
    Extension,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use tracing::debug;
use uuid::Uuid;

use crate::{SessionHandle, SharedStreamer};

/// The authenticated bot user behind a WebSocket upgrade request.
///
/// Inserted into request extensions by the platform's auth middleware.
#[derive(Debug, Clone, Copy)]
pub struct BotUserId(pub Uuid);

/// WebSocket upgrade handler.
///
/// Refuses new connections once the streamer is closed; otherwise upgrades
/// and hands the socket to [`handle_socket`].
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(streamer): State<SharedStreamer>,
    Extension(BotUserId(user_id)): Extension<BotUserId>,
) -> Response {
    if streamer.is_closed() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    ws.on_upgrade(move |socket| handle_socket(socket, streamer, user_id))
}

/// Handle one connected session.
///
/// Spawns a forwarder task draining the session buffer onto the socket (a
/// single writer per socket keeps frames serial) and reads the socket
/// until the peer closes.
async fn handle_socket(socket: WebSocket, streamer: SharedStreamer, user_id: Uuid) {
    let (handle, mut rx) = SessionHandle::new(user_id);
    let session_id = handle.id;
    streamer.register(handle);
    debug!(%user_id, %session_id, "bot websocket session opened");

    let (mut ws_sender, mut ws_receiver) = socket.split();

    let forwarder = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        // Buffer closed: the registry dropped this session. Say goodbye.
        let _ = ws_sender.send(Message::Close(None)).await;
    });

    // Bots do not speak on this socket; consume frames until close so
    // protocol-level pings keep being answered by the ws layer.
    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Close(_) => break,
            _ => {}
        }
    }

    streamer.unregister(user_id, session_id);
    forwarder.abort();
    debug!(%user_id, %session_id, "bot websocket session closed");
}
