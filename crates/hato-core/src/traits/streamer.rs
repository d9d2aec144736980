// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket streamer trait.
//!
//! Session lifecycle (upgrade, registry, buffers) belongs to the streamer;
//! the dispatcher only hands it framed events to write.

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::event::BotEventType;

/// Result of writing one event to a bot user's sessions.
#[derive(Debug, Default)]
pub struct StreamerWrite {
    /// One entry per failed session write.
    pub errors: Vec<String>,
    /// False when no session was connected for the bot user.
    pub attempted: bool,
}

/// Writes framed bot events to connected WebSocket sessions.
#[async_trait]
pub trait EventStreamer: Send + Sync {
    /// Write one event to every session of the given bot user.
    ///
    /// Frame order is maintained per session; each session is written from
    /// a single task.
    async fn write_message(
        &self,
        event: BotEventType,
        request_id: Uuid,
        body: Bytes,
        bot_user_id: Uuid,
    ) -> StreamerWrite;

    /// Close all sessions and refuse further writes.
    async fn close(&self);
}
