// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock WebSocket streamer.
//!
//! Captures written frames and simulates connected/disconnected bot users
//! and failing session writes.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::traits::streamer::{EventStreamer, StreamerWrite};

/// One captured `write_message` call.
#[derive(Debug, Clone)]
pub struct WrittenFrame {
    pub event: BotEventType,
    pub request_id: Uuid,
    pub body: Bytes,
    pub bot_user_id: Uuid,
}

#[derive(Default)]
pub struct MockStreamer {
    connected: Mutex<HashSet<Uuid>>,
    frames: Mutex<Vec<WrittenFrame>>,
    fail_with: Mutex<Option<String>>,
    closed: Mutex<bool>,
}

impl MockStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a bot user as having a connected session.
    pub fn connect(&self, bot_user_id: Uuid) {
        self.connected.lock().unwrap().insert(bot_user_id);
    }

    pub fn disconnect(&self, bot_user_id: Uuid) {
        self.connected.lock().unwrap().remove(&bot_user_id);
    }

    /// Make every subsequent attempted write fail with this error text.
    pub fn fail_writes_with(&self, error: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(error.into());
    }

    /// Frames from attempted writes, in write order.
    pub fn frames(&self) -> Vec<WrittenFrame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }
}

#[async_trait]
impl EventStreamer for MockStreamer {
    async fn write_message(
        &self,
        event: BotEventType,
        request_id: Uuid,
        body: Bytes,
        bot_user_id: Uuid,
    ) -> StreamerWrite {
        let mut write = StreamerWrite::default();
        if !self.connected.lock().unwrap().contains(&bot_user_id) {
            return write;
        }
        write.attempted = true;
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            write.errors.push(error);
            return write;
        }
        self.frames.lock().unwrap().push(WrittenFrame {
            event,
            request_id,
            body,
            bot_user_id,
        });
        write
    }

    async fn close(&self) {
        *self.closed.lock().unwrap() = true;
        self.connected.lock().unwrap().clear();
    }
}
