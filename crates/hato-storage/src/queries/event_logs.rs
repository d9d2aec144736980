// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot event log CRUD operations.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::types::{BotEventLog, EventLogResult};
use hato_core::HatoError;

use crate::database::Database;

/// Insert one delivery-attempt record.
pub async fn insert(db: &Database, log: &BotEventLog) -> Result<(), HatoError> {
    let log = log.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO bot_event_logs
                     (request_id, bot_id, event, body, result, code, error, latency, date_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    log.request_id.to_string(),
                    log.bot_id.to_string(),
                    log.event.to_string(),
                    log.body,
                    log.result.as_str(),
                    log.code,
                    log.error,
                    log.latency,
                    log.date_time.timestamp_micros(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete records older than the cutoff. Returns the number deleted.
pub async fn purge_older_than(db: &Database, cutoff: DateTime<Utc>) -> Result<u64, HatoError> {
    let cutoff_micros = cutoff.timestamp_micros();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM bot_event_logs WHERE date_time < ?1",
                params![cutoff_micros],
            )?;
            Ok(deleted as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch records for one bot, newest first.
pub async fn logs_for_bot(
    db: &Database,
    bot_id: Uuid,
    limit: u32,
    offset: u32,
) -> Result<Vec<BotEventLog>, HatoError> {
    let bot_id = bot_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT request_id, bot_id, event, body, result, code, error, latency, date_time
                 FROM bot_event_logs WHERE bot_id = ?1
                 ORDER BY date_time DESC LIMIT ?2 OFFSET ?3",
            )?;
            let rows = stmt.query_map(params![bot_id, limit, offset], |row| {
                Ok(BotEventLog {
                    request_id: parse_uuid(0, row.get(0)?)?,
                    bot_id: parse_uuid(1, row.get(1)?)?,
                    event: parse_enum::<BotEventType>(2, row.get(2)?)?,
                    body: row.get(3)?,
                    result: parse_enum::<EventLogResult>(4, row.get(4)?)?,
                    code: row.get(5)?,
                    error: row.get(6)?,
                    latency: row.get(7)?,
                    date_time: parse_micros(8, row.get(8)?)?,
                })
            })?;
            let mut logs = Vec::new();
            for row in rows {
                logs.push(row?);
            }
            Ok(logs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn parse_uuid(idx: usize, value: String) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(&value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_enum<T: FromStr<Err = strum::ParseError>>(
    idx: usize,
    value: String,
) -> Result<T, rusqlite::Error> {
    T::from_str(&value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_micros(idx: usize, value: i64) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::from_timestamp_micros(value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Integer,
            Box::new(std::io::Error::other("timestamp out of range")),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, SubsecRound};
    use tempfile::tempdir;

    fn make_log(bot_id: Uuid, age: Duration) -> BotEventLog {
        BotEventLog {
            request_id: Uuid::new_v4(),
            bot_id,
            event: BotEventType::MessageCreated,
            body: r#"{"eventTime":"2026-08-06T00:00:00Z"}"#.into(),
            result: EventLogResult::Ok,
            code: 204,
            error: String::new(),
            latency: 12_000_000,
            // Micros is the storage resolution; truncate for equality checks.
            date_time: (Utc::now() - age).trunc_subsecs(6),
        }
    }

    async fn open_test_db(dir: &tempfile::TempDir) -> Database {
        let path = dir.path().join("logs.db");
        Database::open(path.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn insert_and_fetch_round_trips() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir).await;
        let bot_id = Uuid::new_v4();

        let log = make_log(bot_id, Duration::zero());
        insert(&db, &log).await.unwrap();

        let logs = logs_for_bot(&db, bot_id, 10, 0).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0], log);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn logs_are_newest_first_and_paginated() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir).await;
        let bot_id = Uuid::new_v4();

        for days in [3, 1, 2] {
            insert(&db, &make_log(bot_id, Duration::days(days)))
                .await
                .unwrap();
        }

        let logs = logs_for_bot(&db, bot_id, 2, 0).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].date_time > logs[1].date_time);

        let rest = logs_for_bot(&db, bot_id, 2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert!(rest[0].date_time < logs[1].date_time);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn purge_deletes_only_records_past_the_cutoff() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir).await;
        let bot_id = Uuid::new_v4();

        insert(&db, &make_log(bot_id, Duration::days(400)))
            .await
            .unwrap();
        insert(&db, &make_log(bot_id, Duration::days(10)))
            .await
            .unwrap();

        let deleted = purge_older_than(&db, Utc::now() - Duration::days(365))
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let remaining = logs_for_bot(&db, bot_id, 10, 0).await.unwrap();
        assert_eq!(remaining.len(), 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn other_bots_logs_are_not_returned() {
        let dir = tempdir().unwrap();
        let db = open_test_db(&dir).await;

        insert(&db, &make_log(Uuid::new_v4(), Duration::zero()))
            .await
            .unwrap();
        let logs = logs_for_bot(&db, Uuid::new_v4(), 10, 0).await.unwrap();
        assert!(logs.is_empty());

        db.close().await.unwrap();
    }
}
