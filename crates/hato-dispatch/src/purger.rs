// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic event log purging.
//!
//! A jittered timer deletes records past the retention window. The period
//! is drawn uniformly from [floor, base] on every cycle so purges from
//! many instances do not align.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

use hato_core::traits::event_log_store::EventLogStore;

/// Retention and timing knobs for the purger.
#[derive(Debug, Clone, Copy)]
pub struct PurgeSettings {
    /// Records older than this are deleted.
    pub retention: Duration,
    /// Lower bound of the purge period.
    pub period_floor: Duration,
    /// Upper bound of the purge period.
    pub period_base: Duration,
}

impl Default for PurgeSettings {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(365 * 24 * 60 * 60),
            period_floor: Duration::from_secs(23 * 60 * 60),
            period_base: Duration::from_secs(24 * 60 * 60),
        }
    }
}

fn jittered_period(settings: &PurgeSettings) -> Duration {
    if settings.period_base <= settings.period_floor {
        return settings.period_floor;
    }
    let window = settings.period_base - settings.period_floor;
    settings.period_floor + window.mul_f64(rand::thread_rng().gen_range(0.0..1.0))
}

/// Spawn the purge loop onto `tracker`.
///
/// The loop runs until `cancel` fires. A purge in progress when
/// cancellation arrives finishes before the task ends, so a tracker wait
/// drains it.
pub fn spawn_purger(
    store: Arc<dyn EventLogStore>,
    settings: PurgeSettings,
    cancel: CancellationToken,
    tracker: &TaskTracker,
) {
    tracker.spawn(async move {
        loop {
            let period = jittered_period(&settings);
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(period) => {
                    let cutoff = chrono::Utc::now()
                        - chrono::Duration::from_std(settings.retention)
                            .unwrap_or_else(|_| chrono::Duration::days(365));
                    match store.purge_older_than(cutoff).await {
                        Ok(deleted) => {
                            info!(deleted, %cutoff, "purged bot event logs");
                        }
                        Err(e) => {
                            error!(error = %e, "bot event log purge failed");
                        }
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use hato_core::HatoError;
    use hato_core::types::BotEventLog;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingStore {
        purges: AtomicUsize,
    }

    #[async_trait]
    impl EventLogStore for CountingStore {
        async fn write(&self, _log: &BotEventLog) -> Result<(), HatoError> {
            Ok(())
        }

        async fn purge_older_than(&self, _cutoff: DateTime<Utc>) -> Result<u64, HatoError> {
            self.purges.fetch_add(1, Ordering::SeqCst);
            Ok(3)
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

    fn fast_settings() -> PurgeSettings {
        PurgeSettings {
            retention: Duration::from_secs(3600),
            period_floor: Duration::from_secs(10),
            period_base: Duration::from_secs(10),
        }
    }

    #[test]
    fn period_stays_within_the_jitter_window() {
        let settings = PurgeSettings::default();
        for _ in 0..64 {
            let period = jittered_period(&settings);
            assert!(period >= settings.period_floor);
            assert!(period <= settings.period_base);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn purge_fires_each_period_until_cancelled() {
        let store = Arc::new(CountingStore::default());
        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();

        spawn_purger(store.clone(), fast_settings(), cancel.clone(), &tracker);

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(store.purges.load(Ordering::SeqCst), 2);

        cancel.cancel();
        tracker.close();
        tracker.wait().await;
        // No further purges after shutdown.
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(store.purges.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_before_the_first_period_purges_nothing() {
        let store = Arc::new(CountingStore::default());
        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();

        spawn_purger(store.clone(), fast_settings(), cancel.clone(), &tracker);
        cancel.cancel();
        tracker.close();
        tracker.wait().await;
        assert_eq!(store.purges.load(Ordering::SeqCst), 0);
    }
}
