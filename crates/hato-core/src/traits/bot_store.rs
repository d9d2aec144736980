// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot store trait and its query builder.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HatoError;
use crate::event::BotEventType;
use crate::types::{Bot, BotState};

/// Filter for bot lookups.
///
/// Filters compose conjunctively; an empty query returns every bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotsQuery {
    pub active_only: bool,
    pub id: Option<Uuid>,
    pub bot_user_id: Option<Uuid>,
    pub subscribes: Option<BotEventType>,
    /// Restrict to bots whose synthetic user is a member of this channel.
    pub member_of: Option<Uuid>,
}

impl BotsQuery {
    pub fn active(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub fn bot_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn bot_user_id(mut self, id: Uuid) -> Self {
        self.bot_user_id = Some(id);
        self
    }

    pub fn subscribes(mut self, event: BotEventType) -> Self {
        self.subscribes = Some(event);
        self
    }

    pub fn member_of(mut self, channel_id: Uuid) -> Self {
        self.member_of = Some(channel_id);
        self
    }

    /// Whether the given bot matches every filter of this query.
    ///
    /// Membership (`member_of`) cannot be decided from the bot alone and is
    /// left to the store implementation; this checks all other filters.
    pub fn matches(&self, bot: &Bot) -> bool {
        if self.active_only && bot.state != BotState::Active {
            return false;
        }
        if let Some(id) = self.id {
            if bot.id != id {
                return false;
            }
        }
        if let Some(uid) = self.bot_user_id {
            if bot.bot_user_id != uid {
                return false;
            }
        }
        if let Some(event) = self.subscribes {
            if !bot.subscribes(event) {
                return false;
            }
        }
        true
    }
}

/// Read access to registered bots, plus the two mutations this service is
/// allowed: state changes and nothing else.
#[async_trait]
pub trait BotStore: Send + Sync {
    /// Return all bots matching the query.
    async fn bots(&self, query: BotsQuery) -> Result<Vec<Bot>, HatoError>;

    /// Persist a new activation state for the given bot.
    async fn change_bot_state(&self, id: Uuid, state: BotState) -> Result<(), HatoError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTypeSet;
    use crate::types::BotMode;
    use chrono::Utc;

    fn bot(state: BotState, events: &[BotEventType]) -> Bot {
        Bot {
            id: Uuid::new_v4(),
            bot_user_id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            description: String::new(),
            verification_token: "token".into(),
            post_url: "http://localhost/webhook".into(),
            subscribe_events: events.iter().copied().collect::<EventTypeSet>(),
            mode: BotMode::Http,
            state,
            privileged: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn active_filter_rejects_paused_and_disabled() {
        let query = BotsQuery::default().active();
        assert!(query.matches(&bot(BotState::Active, &[])));
        assert!(!query.matches(&bot(BotState::Paused, &[])));
        assert!(!query.matches(&bot(BotState::Disabled, &[])));
    }

    #[test]
    fn subscribe_filter_checks_the_event_set() {
        let query = BotsQuery::default().subscribes(BotEventType::MessageCreated);
        assert!(query.matches(&bot(BotState::Paused, &[BotEventType::MessageCreated])));
        assert!(!query.matches(&bot(BotState::Active, &[BotEventType::Ping])));
    }

    #[test]
    fn id_filters_compose() {
        let b = bot(BotState::Active, &[BotEventType::Ping]);
        let query = BotsQuery::default()
            .active()
            .bot_id(b.id)
            .subscribes(BotEventType::Ping);
        assert!(query.matches(&b));
        assert!(!query.bot_user_id(Uuid::new_v4()).matches(&b));
    }
}
