// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Hato workspace.
//!
//! Bots are the only entity this service owns; channels, users, messages,
//! tags, and stamps are read-only projections of the platform store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::event::{BotEventType, EventTypeSet};

/// How events are delivered to a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum BotMode {
    /// Events are POSTed to the bot's `post_url`.
    #[strum(serialize = "HTTP")]
    #[serde(rename = "HTTP")]
    Http,
    /// Events are written to the bot's connected WebSocket sessions.
    #[strum(serialize = "WEBSOCKET")]
    #[serde(rename = "WEBSOCKET")]
    WebSocket,
}

/// Activation state of a bot.
///
/// `Disabled` is a terminal administrative state; ping outcomes never
/// leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BotState {
    Active,
    Paused,
    Disabled,
}

/// A registered third-party automation agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    pub id: Uuid,
    /// The synthetic user identity the bot acts as. Used for channel
    /// membership, mentions, and self-echo suppression.
    pub bot_user_id: Uuid,
    pub creator_id: Uuid,
    pub description: String,
    /// Shared secret echoed back in the `X-TRAQ-BOT-TOKEN` header.
    pub verification_token: String,
    /// HTTP delivery endpoint. Must be non-empty when `mode` is HTTP.
    pub post_url: String,
    pub subscribe_events: EventTypeSet,
    pub mode: BotMode,
    pub state: BotState,
    pub privileged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bot {
    pub fn is_active(&self) -> bool {
        self.state == BotState::Active
    }

    pub fn subscribes(&self, event: BotEventType) -> bool {
        self.subscribe_events.contains(event)
    }
}

/// Read-only channel projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub topic: String,
    pub parent_id: Option<Uuid>,
    pub creator_id: Uuid,
    pub is_public: bool,
    pub is_dm: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only user projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub icon_file_id: Uuid,
    pub bot: bool,
}

/// Read-only message projection, including its current stamp aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Uuid,
    pub channel_id: Uuid,
    pub text: String,
    #[serde(default)]
    pub stamps: Vec<MessageStamp>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One (stamp, user) aggregation entry on a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStamp {
    pub stamp_id: Uuid,
    pub user_id: Uuid,
    pub count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only stamp projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: Uuid,
    pub name: String,
    pub file_id: Uuid,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only tag projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

/// Output of the external message parser for one message body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub plain_text: String,
    /// User ids mentioned in the text. May contain duplicates.
    pub mentions: Vec<Uuid>,
    pub embedded: Vec<EmbeddedInfo>,
}

/// One embedded entity extracted from message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedInfo {
    pub raw: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Outcome class of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum EventLogResult {
    #[strum(serialize = "ok")]
    #[serde(rename = "ok")]
    Ok,
    /// Response received with a non-204 status.
    #[strum(serialize = "ng")]
    #[serde(rename = "ng")]
    Ng,
    /// Network error, timeout, TLS failure, or WebSocket write error.
    #[strum(serialize = "ne")]
    #[serde(rename = "ne")]
    Ne,
    /// WebSocket target had no connected session at the moment of write.
    #[strum(serialize = "dp")]
    #[serde(rename = "dp")]
    Dropped,
}

impl EventLogResult {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Ng => "ng",
            Self::Ne => "ne",
            Self::Dropped => "dp",
        }
    }

    /// Label used on the send counter. A dropped WebSocket write is
    /// operationally benign and counts as ok.
    pub fn counter_label(self) -> &'static str {
        match self {
            Self::Dropped => "ok",
            other => other.as_str(),
        }
    }
}

/// One row of the bot event log: a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotEventLog {
    pub request_id: Uuid,
    pub bot_id: Uuid,
    pub event: BotEventType,
    /// Serialized payload as sent.
    pub body: String,
    pub result: EventLogResult,
    /// HTTP status code, 0 for dropped, -1 when no usable status exists.
    pub code: i32,
    /// Free-text error detail, empty on success.
    pub error: String,
    /// Wall-clock duration of the attempt in nanoseconds.
    pub latency: i64,
    pub date_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_mode_round_trips_wire_names() {
        assert_eq!(BotMode::Http.to_string(), "HTTP");
        assert_eq!(BotMode::WebSocket.to_string(), "WEBSOCKET");
        assert_eq!("WEBSOCKET".parse::<BotMode>().unwrap(), BotMode::WebSocket);
    }

    #[test]
    fn dropped_counts_as_ok_on_the_counter() {
        assert_eq!(EventLogResult::Dropped.as_str(), "dp");
        assert_eq!(EventLogResult::Dropped.counter_label(), "ok");
        assert_eq!(EventLogResult::Ne.counter_label(), "ne");
        assert_eq!(EventLogResult::Ng.counter_label(), "ng");
    }

    #[test]
    fn embedded_info_serializes_type_field() {
        let info = EmbeddedInfo {
            raw: "@bob".into(),
            kind: "user".into(),
            id: "d7461966-e5d3-4c6d-9538-7c8605f45a1e".into(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "user");
        assert_eq!(json["raw"], "@bob");
    }
}
