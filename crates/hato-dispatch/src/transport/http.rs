// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP delivery to a bot's configured endpoint.
//!
//! One POST per attempt. A bot accepts an event by answering 204 with no
//! body within five seconds; anything else is a non-success and the body
//! is never read.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode, redirect::Policy};
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::types::{Bot, BotEventLog, EventLogResult};
use hato_core::HatoError;

use crate::event_log::EventLogWriter;
use crate::transport::Transport;

pub const HEADER_BOT_EVENT: &str = "X-TRAQ-BOT-EVENT";
pub const HEADER_BOT_REQUEST_ID: &str = "X-TRAQ-BOT-REQUEST-ID";
pub const HEADER_BOT_TOKEN: &str = "X-TRAQ-BOT-TOKEN";
pub const BOT_USER_AGENT: &str = "traQ_Bot_Processor/1.0";
pub const MIME_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Deadline for the whole request: connect, write, and response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP transport shared by all HTTP-mode bots.
pub struct HttpTransport {
    client: Client,
    log: Arc<EventLogWriter>,
}

impl HttpTransport {
    /// Build the transport with its dedicated client: fixed timeout, no
    /// cookie jar, redirects returned to the caller instead of followed.
    pub fn new(log: Arc<EventLogWriter>) -> Result<Self, HatoError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(Policy::none())
            .build()
            .map_err(|e| HatoError::Transport {
                message: "failed to build HTTP client".into(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client, log })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, bot: &Bot, event: BotEventType, body: Bytes) -> bool {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let response = self
            .client
            .post(&bot.post_url)
            .header(CONTENT_TYPE, MIME_JSON_UTF8)
            .header(USER_AGENT, BOT_USER_AGENT)
            .header(HEADER_BOT_EVENT, event.to_string())
            .header(HEADER_BOT_REQUEST_ID, request_id.to_string())
            .header(HEADER_BOT_TOKEN, &bot.verification_token)
            .body(body.clone())
            .send()
            .await;

        let latency = started.elapsed().as_nanos() as i64;
        let body = String::from_utf8_lossy(&body).into_owned();

        match response {
            Err(e) => {
                self.log
                    .write(BotEventLog {
                        request_id,
                        bot_id: bot.id,
                        event,
                        body,
                        result: EventLogResult::Ne,
                        code: -1,
                        error: e.to_string(),
                        latency,
                        date_time: Utc::now(),
                    })
                    .await;
                false
            }
            Ok(response) => {
                let status = response.status();
                // 204-or-fail: the response body is never read.
                drop(response);

                let ok = status == StatusCode::NO_CONTENT;
                self.log
                    .write(BotEventLog {
                        request_id,
                        bot_id: bot.id,
                        event,
                        body,
                        result: if ok {
                            EventLogResult::Ok
                        } else {
                            EventLogResult::Ng
                        },
                        code: status.as_u16() as i32,
                        error: String::new(),
                        latency,
                        date_time: Utc::now(),
                    })
                    .await;
                ok
            }
        }
    }
}
