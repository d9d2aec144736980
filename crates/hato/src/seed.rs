// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seeded domain stores for standalone operation.
//!
//! In production the platform provides bot/channel/user/tag stores backed
//! by its own database. `hato serve` runs the subsystem standalone, so the
//! domain projections are loaded once from a TOML fixture and held in
//! memory. Only bot state is mutable, through `change_bot_state`.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::traits::bot_store::{BotStore, BotsQuery};
use hato_core::traits::channel_store::ChannelStore;
use hato_core::traits::tag_store::TagStore;
use hato_core::traits::user_store::UserStore;
use hato_core::types::{Bot, BotMode, BotState, Channel, Tag, User};
use hato_core::HatoError;

/// The TOML fixture shape.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedFile {
    #[serde(default)]
    bots: Vec<SeedBot>,
    #[serde(default)]
    channels: Vec<SeedChannel>,
    #[serde(default)]
    users: Vec<SeedUser>,
    #[serde(default)]
    tags: Vec<SeedTag>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedBot {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default = "Uuid::new_v4")]
    bot_user_id: Uuid,
    #[serde(default)]
    description: String,
    verification_token: String,
    #[serde(default)]
    post_url: String,
    mode: BotMode,
    #[serde(default = "default_state")]
    state: BotState,
    #[serde(default)]
    privileged: bool,
    /// Wire names of subscribed events.
    #[serde(default)]
    subscribe: Vec<BotEventType>,
    /// Channel ids the bot's synthetic user is a member of.
    #[serde(default)]
    join: Vec<Uuid>,
}

fn default_state() -> BotState {
    BotState::Active
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedChannel {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    name: String,
    /// Slash-separated path without the leading '#'.
    path: String,
    #[serde(default)]
    topic: String,
    #[serde(default = "Uuid::new_v4")]
    creator_id: Uuid,
    #[serde(default)]
    dm: bool,
    /// DM member user ids; ignored for public channels.
    #[serde(default)]
    members: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedUser {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    bot: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedTag {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    name: String,
}

/// Domain stores built from a seed fixture.
pub struct SeedStores {
    pub bots: Arc<dyn BotStore>,
    pub channels: Arc<dyn ChannelStore>,
    pub users: Arc<dyn UserStore>,
    pub tags: Arc<dyn TagStore>,
}

/// Load stores from the optional fixture path. No path yields empty
/// stores: the service runs, it just has no bots to dispatch to.
pub fn load(path: Option<&str>) -> Result<SeedStores, HatoError> {
    let seed = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                HatoError::Config(format!("cannot read seed file {path}: {e}"))
            })?;
            toml::from_str::<SeedFile>(&raw)
                .map_err(|e| HatoError::Config(format!("invalid seed file {path}: {e}")))?
        }
        None => SeedFile::default(),
    };

    let now = Utc::now();
    let mut bots = Vec::new();
    let mut joined = HashSet::new();
    for b in seed.bots {
        if b.mode == BotMode::Http && b.post_url.is_empty() {
            return Err(HatoError::Config(format!(
                "bot {} is in HTTP mode but has no post_url",
                b.id
            )));
        }
        for channel_id in &b.join {
            joined.insert((b.id, *channel_id));
        }
        bots.push(Bot {
            id: b.id,
            bot_user_id: b.bot_user_id,
            creator_id: Uuid::new_v4(),
            description: b.description,
            verification_token: b.verification_token,
            post_url: b.post_url,
            subscribe_events: b.subscribe.into_iter().collect(),
            mode: b.mode,
            state: b.state,
            privileged: b.privileged,
            created_at: now,
            updated_at: now,
        });
    }

    let mut channels = HashMap::new();
    let mut paths = HashMap::new();
    let mut dm_members = HashMap::new();
    for c in seed.channels {
        paths.insert(c.id, c.path);
        if c.dm {
            dm_members.insert(c.id, c.members);
        }
        channels.insert(
            c.id,
            Channel {
                id: c.id,
                name: c.name,
                topic: c.topic,
                parent_id: None,
                creator_id: c.creator_id,
                is_public: !c.dm,
                is_dm: c.dm,
                created_at: now,
                updated_at: now,
            },
        );
    }

    let users = seed
        .users
        .into_iter()
        .map(|u| {
            (
                u.id,
                User {
                    id: u.id,
                    name: u.name,
                    display_name: u.display_name,
                    icon_file_id: Uuid::new_v4(),
                    bot: u.bot,
                },
            )
        })
        .collect();

    let tags = seed
        .tags
        .into_iter()
        .map(|t| (t.id, Tag { id: t.id, name: t.name }))
        .collect();

    Ok(SeedStores {
        bots: Arc::new(SeededBotStore {
            bots: Mutex::new(bots),
            joined,
        }),
        channels: Arc::new(SeededChannelStore {
            channels,
            paths,
            dm_members,
        }),
        users: Arc::new(SeededUserStore { users }),
        tags: Arc::new(SeededTagStore { tags }),
    })
}

struct SeededBotStore {
    bots: Mutex<Vec<Bot>>,
    joined: HashSet<(Uuid, Uuid)>,
}

#[async_trait]
impl BotStore for SeededBotStore {
    async fn bots(&self, query: BotsQuery) -> Result<Vec<Bot>, HatoError> {
        let bots = self.bots.lock().unwrap();
        Ok(bots
            .iter()
            .filter(|bot| query.matches(bot))
            .filter(|bot| match query.member_of {
                Some(channel_id) => self.joined.contains(&(bot.id, channel_id)),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn change_bot_state(&self, id: Uuid, state: BotState) -> Result<(), HatoError> {
        let mut bots = self.bots.lock().unwrap();
        match bots.iter_mut().find(|b| b.id == id) {
            Some(bot) => {
                bot.state = state;
                Ok(())
            }
            None => Err(HatoError::Internal(format!("no such bot: {id}"))),
        }
    }
}

struct SeededChannelStore {
    channels: HashMap<Uuid, Channel>,
    paths: HashMap<Uuid, String>,
    dm_members: HashMap<Uuid, Vec<Uuid>>,
}

#[async_trait]
impl ChannelStore for SeededChannelStore {
    async fn channel(&self, id: Uuid) -> Result<Option<Channel>, HatoError> {
        Ok(self.channels.get(&id).cloned())
    }

    async fn channel_path(&self, id: Uuid) -> Result<Option<String>, HatoError> {
        Ok(self.paths.get(&id).cloned())
    }

    async fn dm_members(&self, id: Uuid) -> Result<Vec<Uuid>, HatoError> {
        Ok(self.dm_members.get(&id).cloned().unwrap_or_default())
    }
}

struct SeededUserStore {
    users: HashMap<Uuid, User>,
}

#[async_trait]
impl UserStore for SeededUserStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, HatoError> {
        Ok(self.users.get(&id).cloned())
    }
}

struct SeededTagStore {
    tags: HashMap<Uuid, Tag>,
}

#[async_trait]
impl TagStore for SeededTagStore {
    async fn tag(&self, id: Uuid) -> Result<Option<Tag>, HatoError> {
        Ok(self.tags.get(&id).cloned())
    }
}
