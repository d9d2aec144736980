// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event log store trait.
//!
//! The bot event log table is the only persisted state this service writes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::HatoError;
use crate::types::BotEventLog;

/// Persistence for delivery-attempt records.
#[async_trait]
pub trait EventLogStore: Send + Sync {
    /// Append one delivery-attempt record.
    async fn write(&self, log: &BotEventLog) -> Result<(), HatoError>;

    /// Delete records older than the cutoff. Returns the number deleted.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, HatoError>;

    /// Return records for one bot, newest first.
    async fn logs_for_bot(
        &self,
        bot_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BotEventLog>, HatoError>;
}
