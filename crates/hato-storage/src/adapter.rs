// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the EventLogStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use hato_config::model::StorageConfig;
use hato_core::types::BotEventLog;
use hato_core::{EventLogStore, HatoError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed event log store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily initialized on the first
/// call to [`initialize`](Self::initialize).
pub struct SqliteEventLogStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteEventLogStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database, apply pragmas, and run migrations.
    pub async fn initialize(&self) -> Result<(), HatoError> {
        let db = Database::open_with_wal(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HatoError::Store {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "event log storage initialized");
        Ok(())
    }

    /// Checkpoint the WAL before the process exits.
    pub async fn close(&self) -> Result<(), HatoError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    fn db(&self) -> Result<&Database, HatoError> {
        self.db.get().ok_or_else(|| HatoError::Store {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl EventLogStore for SqliteEventLogStore {
    async fn write(&self, log: &BotEventLog) -> Result<(), HatoError> {
        queries::event_logs::insert(self.db()?, log).await
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, HatoError> {
        queries::event_logs::purge_older_than(self.db()?, cutoff).await
    }

    async fn logs_for_bot(
        &self,
        bot_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BotEventLog>, HatoError> {
        queries::event_logs::logs_for_bot(self.db()?, bot_id, limit, offset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SubsecRound;
    use hato_core::event::BotEventType;
    use hato_core::types::EventLogResult;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn write_fails_before_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteEventLogStore::new(make_config(db_path.to_str().unwrap()));

        let log = BotEventLog {
            request_id: Uuid::new_v4(),
            bot_id: Uuid::new_v4(),
            event: BotEventType::Ping,
            body: "{}".into(),
            result: EventLogResult::Ok,
            code: 204,
            error: String::new(),
            latency: 1,
            date_time: Utc::now(),
        };
        assert!(store.write(&log).await.is_err());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteEventLogStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn full_lifecycle_through_the_trait() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let store = SqliteEventLogStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let bot_id = Uuid::new_v4();
        let log = BotEventLog {
            request_id: Uuid::new_v4(),
            bot_id,
            event: BotEventType::StampCreated,
            body: r#"{"eventTime":"2026-08-06T00:00:00Z"}"#.into(),
            result: EventLogResult::Ng,
            code: 500,
            error: "internal server error".into(),
            latency: 7_500_000,
            date_time: Utc::now().trunc_subsecs(6),
        };
        store.write(&log).await.unwrap();

        let logs = store.logs_for_bot(bot_id, 10, 0).await.unwrap();
        assert_eq!(logs, vec![log]);

        let deleted = store
            .purge_older_than(Utc::now() - chrono::Duration::days(365))
            .await
            .unwrap();
        assert_eq!(deleted, 0);

        store.close().await.unwrap();
    }
}
