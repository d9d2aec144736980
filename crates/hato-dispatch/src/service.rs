// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service lifecycle: bus ingress, fan-out, and drain-on-shutdown.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

use hato_bus::{EventBus, SubscriptionId};
use hato_core::HatoError;
use hato_core::traits::event_log_store::EventLogStore;

use crate::context::DispatchContext;
use crate::purger::{PurgeSettings, spawn_purger};
use crate::registry::HandlerRegistry;

/// Bus messages buffered before the publisher is pushed back on.
pub const EVENT_BUFFER: usize = 100;

#[derive(Default)]
struct ServiceState {
    running: bool,
    stopped: bool,
    sub_id: Option<SubscriptionId>,
    cancel: Option<CancellationToken>,
    tracker: Option<TaskTracker>,
    ingress: Option<JoinHandle<()>>,
}

/// The bot event dispatch service.
///
/// `start` subscribes the ingress and arms the purger; `shutdown`
/// unsubscribes, stops the purger, and waits for every in-flight handler
/// task. Callers publish to the bus and never observe delivery.
pub struct BotEventService {
    bus: Arc<EventBus>,
    ctx: Arc<DispatchContext>,
    registry: Arc<HandlerRegistry>,
    log_store: Arc<dyn EventLogStore>,
    purge_settings: PurgeSettings,
    state: Mutex<ServiceState>,
}

impl BotEventService {
    pub fn new(
        bus: Arc<EventBus>,
        ctx: Arc<DispatchContext>,
        registry: HandlerRegistry,
        log_store: Arc<dyn EventLogStore>,
        purge_settings: PurgeSettings,
    ) -> Self {
        Self {
            bus,
            ctx,
            registry: Arc::new(registry),
            log_store,
            purge_settings,
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Transition Stopped -> Running. Idempotent; a second call (or a call
    /// after shutdown) is a no-op.
    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        if state.running || state.stopped {
            return;
        }
        state.running = true;

        let subscription = self
            .bus
            .subscribe(EVENT_BUFFER, &self.registry.topics())
            .await;
        state.sub_id = Some(subscription.id);

        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();
        spawn_purger(
            self.log_store.clone(),
            self.purge_settings,
            cancel.clone(),
            &tracker,
        );

        let ctx = self.ctx.clone();
        let registry = self.registry.clone();
        let ingress_cancel = cancel.clone();
        let ingress_tracker = tracker.clone();
        let mut receiver = subscription.receiver;

        state.ingress = Some(tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    // Once shutdown begins, no new handler tasks start --
                    // buffered messages are abandoned, not drained.
                    _ = ingress_cancel.cancelled() => break,
                    received = receiver.recv() => match received {
                        Some(event) => event,
                        None => break,
                    },
                };

                let datetime = Utc::now();
                let topic = event.topic();
                let Some(handler) = registry.get(topic) else {
                    continue;
                };
                let ctx = ctx.clone();
                ingress_tracker.spawn(async move {
                    if let Err(e) = handler(ctx, datetime, event).await {
                        error!(topic, error = %e, "bot event handler failed");
                    }
                });
            }
        }));

        state.cancel = Some(cancel);
        state.tracker = Some(tracker);
        info!("bot event service started");
    }

    /// Whether the service is currently running.
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.running
    }

    /// Stop the service: unsubscribe, cancel the purger, and wait up to
    /// `timeout` for in-flight handler tasks to finish. Nothing in flight
    /// is cancelled; the deadline only bounds the wait.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), HatoError> {
        let (sub_id, cancel, tracker, ingress) = {
            let mut state = self.state.lock().await;
            if !state.running {
                return Ok(());
            }
            state.running = false;
            state.stopped = true;
            (
                state.sub_id.take(),
                state.cancel.take(),
                state.tracker.take(),
                state.ingress.take(),
            )
        };

        if let Some(id) = sub_id {
            self.bus.unsubscribe(id).await;
        }
        if let Some(cancel) = cancel {
            cancel.cancel();
        }
        if let Some(ingress) = ingress {
            let _ = ingress.await;
        }
        if let Some(tracker) = tracker {
            tracker.close();
            tokio::time::timeout(timeout, tracker.wait())
                .await
                .map_err(|_| {
                    HatoError::Internal("shutdown deadline exceeded with tasks in flight".into())
                })?;
        }

        info!("bot event service shutdown");
        Ok(())
    }
}
