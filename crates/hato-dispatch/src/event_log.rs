// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort event log writes.
//!
//! Every delivery attempt yields exactly one record. A failed write is a
//! local log line, never an error for the delivery path.

use std::sync::Arc;

use tracing::warn;

use hato_core::traits::event_log_store::EventLogStore;
use hato_core::types::BotEventLog;

/// Writes delivery-attempt records and keeps the send counter current.
pub struct EventLogWriter {
    store: Arc<dyn EventLogStore>,
}

impl EventLogWriter {
    pub fn new(store: Arc<dyn EventLogStore>) -> Self {
        Self { store }
    }

    /// Record one delivery attempt.
    pub async fn write(&self, log: BotEventLog) {
        hato_prometheus::record_event_send(log.bot_id, log.result.counter_label());
        hato_prometheus::record_delivery_latency(log.latency as f64 / 1e9);

        if let Err(e) = self.store.write(&log).await {
            warn!(
                error = %e,
                request_id = %log.request_id,
                bot_id = %log.bot_id,
                event = %log.event,
                "failed to write bot event log"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use hato_core::HatoError;
    use hato_core::event::BotEventType;
    use hato_core::types::EventLogResult;
    use uuid::Uuid;

    struct FailingStore;

    #[async_trait]
    impl EventLogStore for FailingStore {
        async fn write(&self, _log: &BotEventLog) -> Result<(), HatoError> {
            Err(HatoError::Internal("disk on fire".into()))
        }

        async fn purge_older_than(&self, _cutoff: DateTime<Utc>) -> Result<u64, HatoError> {
            Ok(0)
        }

        async fn logs_for_bot(
            &self,
            _bot_id: Uuid,
            _limit: u32,
            _offset: u32,
        ) -> Result<Vec<BotEventLog>, HatoError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn store_failures_never_propagate() {
        let writer = EventLogWriter::new(Arc::new(FailingStore));
        writer
            .write(BotEventLog {
                request_id: Uuid::new_v4(),
                bot_id: Uuid::new_v4(),
                event: BotEventType::Ping,
                body: "{}".into(),
                result: EventLogResult::Ok,
                code: 204,
                error: String::new(),
                latency: 1,
                date_time: Utc::now(),
            })
            .await;
    }
}
