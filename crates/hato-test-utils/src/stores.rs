// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store implementations for deterministic testing.
//!
//! Every store keeps its data behind a plain mutex and exposes assertion
//! accessors alongside the trait implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use hato_core::HatoError;
use hato_core::traits::bot_store::{BotStore, BotsQuery};
use hato_core::traits::channel_store::ChannelStore;
use hato_core::traits::event_log_store::EventLogStore;
use hato_core::traits::tag_store::TagStore;
use hato_core::traits::user_store::UserStore;
use hato_core::types::{Bot, BotEventLog, BotState, Channel, Tag, User};

/// Bots plus their channel memberships.
#[derive(Default)]
pub struct InMemoryBotStore {
    bots: Mutex<Vec<Bot>>,
    /// (bot id, channel id) membership pairs.
    joined: Mutex<HashSet<(Uuid, Uuid)>>,
    /// Applied state changes, oldest first.
    state_changes: Mutex<Vec<(Uuid, BotState)>>,
}

impl InMemoryBotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bots(bots: Vec<Bot>) -> Self {
        Self {
            bots: Mutex::new(bots),
            ..Self::default()
        }
    }

    pub fn insert(&self, bot: Bot) {
        self.bots.lock().unwrap().push(bot);
    }

    /// Record the bot's synthetic user as a member of the channel.
    pub fn join(&self, bot_id: Uuid, channel_id: Uuid) {
        self.joined.lock().unwrap().insert((bot_id, channel_id));
    }

    pub fn leave(&self, bot_id: Uuid, channel_id: Uuid) {
        self.joined.lock().unwrap().remove(&(bot_id, channel_id));
    }

    /// The bot as currently stored.
    pub fn bot(&self, id: Uuid) -> Option<Bot> {
        self.bots.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    /// Every `change_bot_state` call, oldest first.
    pub fn state_changes(&self) -> Vec<(Uuid, BotState)> {
        self.state_changes.lock().unwrap().clone()
    }
}

#[async_trait]
impl BotStore for InMemoryBotStore {
    async fn bots(&self, query: BotsQuery) -> Result<Vec<Bot>, HatoError> {
        let joined = self.joined.lock().unwrap();
        let bots = self.bots.lock().unwrap();
        Ok(bots
            .iter()
            .filter(|bot| query.matches(bot))
            .filter(|bot| match query.member_of {
                Some(channel_id) => joined.contains(&(bot.id, channel_id)),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn change_bot_state(&self, id: Uuid, state: BotState) -> Result<(), HatoError> {
        let mut bots = self.bots.lock().unwrap();
        let Some(bot) = bots.iter_mut().find(|b| b.id == id) else {
            return Err(HatoError::Internal(format!("no such bot: {id}")));
        };
        bot.state = state;
        self.state_changes.lock().unwrap().push((id, state));
        Ok(())
    }
}

/// Channels with paths and DM membership lists.
#[derive(Default)]
pub struct InMemoryChannelStore {
    channels: Mutex<HashMap<Uuid, Channel>>,
    paths: Mutex<HashMap<Uuid, String>>,
    dm_members: Mutex<HashMap<Uuid, Vec<Uuid>>>,
}

impl InMemoryChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, channel: Channel, path: &str) {
        self.paths.lock().unwrap().insert(channel.id, path.into());
        self.channels.lock().unwrap().insert(channel.id, channel);
    }

    pub fn set_dm_members(&self, channel_id: Uuid, members: Vec<Uuid>) {
        self.dm_members.lock().unwrap().insert(channel_id, members);
    }
}

#[async_trait]
impl ChannelStore for InMemoryChannelStore {
    async fn channel(&self, id: Uuid) -> Result<Option<Channel>, HatoError> {
        Ok(self.channels.lock().unwrap().get(&id).cloned())
    }

    async fn channel_path(&self, id: Uuid) -> Result<Option<String>, HatoError> {
        Ok(self.paths.lock().unwrap().get(&id).cloned())
    }

    async fn dm_members(&self, id: Uuid) -> Result<Vec<Uuid>, HatoError> {
        Ok(self
            .dm_members
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, HatoError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryTagStore {
    tags: Mutex<HashMap<Uuid, Tag>>,
    lookups: Mutex<u32>,
}

impl InMemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, tag: Tag) {
        self.tags.lock().unwrap().insert(tag.id, tag);
    }

    /// How many times `tag` has been called. Lets tests assert the
    /// subscription-check-before-fetch shortcut.
    pub fn lookup_count(&self) -> u32 {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl TagStore for InMemoryTagStore {
    async fn tag(&self, id: Uuid) -> Result<Option<Tag>, HatoError> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self.tags.lock().unwrap().get(&id).cloned())
    }
}

/// Event log records in arrival order.
#[derive(Default)]
pub struct InMemoryEventLogStore {
    records: Mutex<Vec<BotEventLog>>,
}

impl InMemoryEventLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records written so far, in write order.
    pub fn records(&self) -> Vec<BotEventLog> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventLogStore for InMemoryEventLogStore {
    async fn write(&self, log: &BotEventLog) -> Result<(), HatoError> {
        self.records.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, HatoError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.date_time >= cutoff);
        Ok((before - records.len()) as u64)
    }

    async fn logs_for_bot(
        &self,
        bot_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<BotEventLog>, HatoError> {
        let mut logs: Vec<BotEventLog> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.bot_id == bot_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        Ok(logs
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
