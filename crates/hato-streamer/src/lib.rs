// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot WebSocket streamer.
//!
//! Holds the per-bot-user session registry and implements the
//! [`EventStreamer`] write contract consumed by the dispatcher. Connections
//! are accepted through the axum upgrade handler in [`handler`]; frames are
//! written through bounded per-session buffers so one slow bot cannot
//! stall event dispatch.

pub mod handler;
pub mod session;

pub use session::{SESSION_BUFFER, SessionHandle, SessionWriteError};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use serde::Serialize;
use serde_json::value::RawValue;
use tracing::warn;
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::traits::streamer::{EventStreamer, StreamerWrite};

/// The wire frame written to bot sessions.
///
/// `body` is the payload exactly as built by the dispatch side; it is
/// embedded verbatim rather than re-encoded.
#[derive(Serialize)]
struct EventFrame<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(rename = "reqId")]
    request_id: Uuid,
    body: &'a RawValue,
}

/// Encode one event frame as a text message.
///
/// Panics if `body` is not valid UTF-8 JSON; the payload builder guarantees
/// it is, so a violation is a programmer error.
fn make_event_frame(event: BotEventType, request_id: Uuid, body: &Bytes) -> String {
    let body = std::str::from_utf8(body).expect("payload is valid UTF-8");
    let raw = RawValue::from_string(body.to_owned()).expect("payload is valid JSON");
    let kind = event.to_string();
    let frame = EventFrame {
        kind: &kind,
        request_id,
        body: &raw,
    };
    serde_json::to_string(&frame).expect("event frame serializes")
}

/// WebSocket session registry keyed by bot user id.
pub struct Streamer {
    sessions: DashMap<Uuid, Vec<SessionHandle>>,
    closed: AtomicBool,
}

impl Default for Streamer {
    fn default() -> Self {
        Self::new()
    }
}

impl Streamer {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Whether [`close`](EventStreamer::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Total connected sessions across all bot users.
    pub fn session_count(&self) -> usize {
        self.sessions.iter().map(|e| e.value().len()).sum()
    }

    pub(crate) fn register(&self, handle: SessionHandle) {
        self.sessions.entry(handle.user_id).or_default().push(handle);
        hato_prometheus::set_connected_sessions(self.session_count() as f64);
    }

    pub(crate) fn unregister(&self, user_id: Uuid, session_id: Uuid) {
        if let Some(mut entry) = self.sessions.get_mut(&user_id) {
            entry.retain(|s| s.id != session_id);
            if entry.is_empty() {
                drop(entry);
                self.sessions.remove_if(&user_id, |_, v| v.is_empty());
            }
        }
        hato_prometheus::set_connected_sessions(self.session_count() as f64);
    }
}

#[async_trait]
impl EventStreamer for Streamer {
    async fn write_message(
        &self,
        event: BotEventType,
        request_id: Uuid,
        body: Bytes,
        bot_user_id: Uuid,
    ) -> StreamerWrite {
        let mut result = StreamerWrite::default();
        if self.is_closed() {
            return result;
        }

        let frame = make_event_frame(event, request_id, &body);
        if let Some(handles) = self.sessions.get(&bot_user_id) {
            for handle in handles.iter() {
                result.attempted = true;
                if let Err(e) = handle.try_write(frame.clone()) {
                    if e == SessionWriteError::BufferFull {
                        warn!(
                            event = %event,
                            request_id = %request_id,
                            user_id = %handle.user_id,
                            "discarded a frame because the session's buffer was full"
                        );
                    }
                    result.errors.push(e.to_string());
                }
            }
        }
        result
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        // Dropping the handles closes each session's buffer; forwarder
        // tasks drain what is queued and then end, closing the sockets.
        self.sessions.clear();
        hato_prometheus::set_connected_sessions(0.0);
    }
}

/// Shared handle used by the upgrade handler and the dispatcher.
pub type SharedStreamer = Arc<Streamer>;

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Bytes {
        Bytes::from_static(br#"{"eventTime":"2026-08-06T10:00:00.000000000Z"}"#)
    }

    #[tokio::test]
    async fn write_without_sessions_is_not_attempted() {
        let streamer = Streamer::new();
        let write = streamer
            .write_message(BotEventType::StampCreated, Uuid::new_v4(), body(), Uuid::new_v4())
            .await;
        assert!(!write.attempted);
        assert!(write.errors.is_empty());
    }

    #[tokio::test]
    async fn write_reaches_every_session_of_the_user() {
        let streamer = Streamer::new();
        let user_id = Uuid::new_v4();
        let (h1, mut rx1) = SessionHandle::new(user_id);
        let (h2, mut rx2) = SessionHandle::new(user_id);
        streamer.register(h1);
        streamer.register(h2);

        let request_id = Uuid::new_v4();
        let write = streamer
            .write_message(BotEventType::Ping, request_id, body(), user_id)
            .await;
        assert!(write.attempted);
        assert!(write.errors.is_empty());

        for rx in [&mut rx1, &mut rx2] {
            let frame: serde_json::Value =
                serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
            assert_eq!(frame["type"], "PING");
            assert_eq!(frame["reqId"], request_id.to_string());
            assert_eq!(frame["body"]["eventTime"], "2026-08-06T10:00:00.000000000Z");
        }
    }

    #[tokio::test]
    async fn other_users_sessions_are_untouched() {
        let streamer = Streamer::new();
        let (handle, mut rx) = SessionHandle::new(Uuid::new_v4());
        streamer.register(handle);

        let write = streamer
            .write_message(BotEventType::Ping, Uuid::new_v4(), body(), Uuid::new_v4())
            .await;
        assert!(!write.attempted);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn buffer_full_surfaces_as_a_write_error() {
        let streamer = Streamer::new();
        let user_id = Uuid::new_v4();
        let (handle, _rx) = SessionHandle::with_capacity(user_id, 1);
        streamer.register(handle);

        let first = streamer
            .write_message(BotEventType::Ping, Uuid::new_v4(), body(), user_id)
            .await;
        assert!(first.attempted && first.errors.is_empty());

        let second = streamer
            .write_message(BotEventType::Ping, Uuid::new_v4(), body(), user_id)
            .await;
        assert!(second.attempted);
        assert_eq!(second.errors, vec!["session buffer is full".to_string()]);
    }

    #[tokio::test]
    async fn unregister_removes_only_that_session() {
        let streamer = Streamer::new();
        let user_id = Uuid::new_v4();
        let (h1, _rx1) = SessionHandle::new(user_id);
        let (h2, _rx2) = SessionHandle::new(user_id);
        let h1_id = h1.id;
        streamer.register(h1);
        streamer.register(h2);
        assert_eq!(streamer.session_count(), 2);

        streamer.unregister(user_id, h1_id);
        assert_eq!(streamer.session_count(), 1);
    }

    #[tokio::test]
    async fn close_clears_sessions_and_refuses_writes() {
        let streamer = Streamer::new();
        let user_id = Uuid::new_v4();
        let (handle, _rx) = SessionHandle::new(user_id);
        streamer.register(handle);

        streamer.close().await;
        assert!(streamer.is_closed());
        assert_eq!(streamer.session_count(), 0);

        let write = streamer
            .write_message(BotEventType::Ping, Uuid::new_v4(), body(), user_id)
            .await;
        assert!(!write.attempted);
    }
}
