// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mode-polymorphic delivery: one payload, one task per target bot.

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::error;

use hato_core::event::BotEventType;
use hato_core::traits::streamer::EventStreamer;
use hato_core::types::{Bot, BotMode};
use hato_core::HatoError;

use crate::event_log::EventLogWriter;
use crate::transport::{HttpTransport, Transport, WsTransport};

/// Serialize a payload into the shared read-only buffer handed to every
/// target.
///
/// Panics on failure: payload shapes are closed types, so an encode error
/// is a programmer error, not an operational one.
pub fn encode_payload<P: Serialize>(payload: &P) -> Bytes {
    serde_json::to_vec(payload)
        .expect("bot event payload serializes")
        .into()
}

/// Routes each delivery to the transport matching the bot's mode.
pub struct Dispatcher {
    http: Arc<dyn Transport>,
    ws: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Production wiring: reqwest-backed HTTP plus the streamer-backed
    /// WebSocket transport, both logging through `log`.
    pub fn new(
        log: Arc<EventLogWriter>,
        streamer: Arc<dyn EventStreamer>,
    ) -> Result<Self, HatoError> {
        Ok(Self {
            http: Arc::new(HttpTransport::new(log.clone())?),
            ws: Arc::new(WsTransport::new(streamer, log)),
        })
    }

    /// Explicit transports, for tests.
    pub fn with_transports(http: Arc<dyn Transport>, ws: Arc<dyn Transport>) -> Self {
        Self { http, ws }
    }

    fn transport_for(&self, bot: &Bot) -> Arc<dyn Transport> {
        match bot.mode {
            BotMode::Http => self.http.clone(),
            BotMode::WebSocket => self.ws.clone(),
        }
    }

    /// One attempt to one bot. Returns whether the outcome was `ok`.
    pub async fn send(&self, bot: &Bot, event: BotEventType, body: Bytes) -> bool {
        self.transport_for(bot).send(bot, event, body).await
    }

    /// Deliver a payload to a single bot.
    pub async fn unicast<P: Serialize>(&self, event: BotEventType, payload: &P, target: &Bot) {
        let body = encode_payload(payload);
        self.send(target, event, body).await;
    }

    /// Deliver one payload to many bots, one task per target.
    ///
    /// The payload is serialized once; a bot appearing multiple times in
    /// the target list receives the event exactly once.
    pub async fn multicast<P: Serialize>(
        self: &Arc<Self>,
        event: BotEventType,
        payload: &P,
        targets: Vec<Bot>,
    ) {
        if targets.is_empty() {
            return;
        }
        let body = encode_payload(payload);

        let mut done = HashSet::with_capacity(targets.len());
        let mut tasks = JoinSet::new();
        for bot in targets {
            if !done.insert(bot.id) {
                continue;
            }
            let dispatcher = self.clone();
            let body = body.clone();
            tasks.spawn(async move {
                dispatcher.send(&bot, event, body).await;
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "delivery task panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hato_test_utils::builders::bot;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct CaptureTransport {
        sent: Mutex<Vec<(Uuid, BotEventType, Bytes)>>,
    }

    #[async_trait]
    impl Transport for CaptureTransport {
        async fn send(&self, bot: &Bot, event: BotEventType, body: Bytes) -> bool {
            self.sent.lock().await.push((bot.id, event, body));
            true
        }
    }

    fn capture_dispatcher() -> (Arc<Dispatcher>, Arc<CaptureTransport>, Arc<CaptureTransport>) {
        let http = Arc::new(CaptureTransport::default());
        let ws = Arc::new(CaptureTransport::default());
        let dispatcher = Arc::new(Dispatcher::with_transports(http.clone(), ws.clone()));
        (dispatcher, http, ws)
    }

    #[tokio::test]
    async fn send_routes_by_bot_mode() {
        let (dispatcher, http, ws) = capture_dispatcher();
        let http_bot = bot().mode(BotMode::Http).build();
        let ws_bot = bot().mode(BotMode::WebSocket).build();

        dispatcher
            .send(&http_bot, BotEventType::Ping, Bytes::from_static(b"{}"))
            .await;
        dispatcher
            .send(&ws_bot, BotEventType::Ping, Bytes::from_static(b"{}"))
            .await;

        assert_eq!(http.sent.lock().await.len(), 1);
        assert_eq!(ws.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn multicast_dedupes_targets_and_shares_one_body() {
        let (dispatcher, http, _ws) = capture_dispatcher();
        let a = bot().build();
        let b = bot().build();
        let targets = vec![a.clone(), b.clone(), a.clone()];

        #[derive(Serialize)]
        struct P {
            x: u32,
        }
        dispatcher
            .multicast(BotEventType::StampCreated, &P { x: 7 }, targets)
            .await;

        let sent = http.sent.lock().await;
        assert_eq!(sent.len(), 2, "duplicate bot must receive exactly one delivery");
        let ids: HashSet<Uuid> = sent.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, HashSet::from([a.id, b.id]));
        assert!(sent.iter().all(|(_, _, body)| body == &sent[0].2));
    }

    #[tokio::test]
    async fn multicast_with_no_targets_is_a_no_op() {
        let (dispatcher, http, _ws) = capture_dispatcher();
        #[derive(Serialize)]
        struct P {}
        dispatcher
            .multicast(BotEventType::StampCreated, &P {}, Vec::new())
            .await;
        assert!(http.sent.lock().await.is_empty());
    }
}
