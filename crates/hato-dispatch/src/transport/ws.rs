// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket delivery through the session streamer.
//!
//! The transport is stateless: it hands the framed event to the streamer
//! and classifies the returned (errors, attempted) pair. A bot with no
//! connected session drops the event -- dropped is benign and carries no
//! error status on the counter.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::traits::streamer::EventStreamer;
use hato_core::types::{Bot, BotEventLog, EventLogResult};

use crate::event_log::EventLogWriter;
use crate::transport::Transport;

/// WebSocket transport shared by all WebSocket-mode bots.
pub struct WsTransport {
    streamer: Arc<dyn EventStreamer>,
    log: Arc<EventLogWriter>,
}

impl WsTransport {
    pub fn new(streamer: Arc<dyn EventStreamer>, log: Arc<EventLogWriter>) -> Self {
        Self { streamer, log }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&self, bot: &Bot, event: BotEventType, body: Bytes) -> bool {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let write = self
            .streamer
            .write_message(event, request_id, body.clone(), bot.bot_user_id)
            .await;

        let latency = started.elapsed().as_nanos() as i64;

        let (result, code, error) = if !write.attempted {
            (EventLogResult::Dropped, 0, String::new())
        } else if write.errors.is_empty() {
            (EventLogResult::Ok, 0, String::new())
        } else {
            (EventLogResult::Ne, -1, write.errors.join("; "))
        };

        self.log
            .write(BotEventLog {
                request_id,
                bot_id: bot.id,
                event,
                body: String::from_utf8_lossy(&body).into_owned(),
                result,
                code,
                error,
                latency,
                date_time: Utc::now(),
            })
            .await;

        result == EventLogResult::Ok
    }
}
