// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot event payload construction.
//!
//! Pure JSON shapes shared by both transports. Every payload embeds
//! [`Base`] as its first field, carrying the instant the event was received
//! from the bus -- not the dispatch time -- so all targets of one event see
//! an identical body.

mod events;

pub use events::*;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use hato_core::types::{Channel, EmbeddedInfo, Message, ParseResult, User};

/// Fields embedded in every event payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    pub event_time: DateTime<Utc>,
}

pub fn make_base(event_time: DateTime<Utc>) -> Base {
    Base { event_time }
}

/// User as it appears inside event payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub icon_id: Uuid,
    pub bot: bool,
}

/// Build the user sub-payload. An unknown user yields the zero value so
/// the field shape stays stable.
pub fn make_user(user: Option<&User>) -> UserPayload {
    match user {
        Some(user) => UserPayload {
            id: user.id,
            name: user.name.clone(),
            display_name: if user.display_name.is_empty() {
                user.name.clone()
            } else {
                user.display_name.clone()
            },
            icon_id: user.icon_file_id,
            bot: user.bot,
        },
        None => UserPayload {
            id: Uuid::nil(),
            name: String::new(),
            display_name: String::new(),
            icon_id: Uuid::nil(),
            bot: false,
        },
    }
}

/// Message as it appears inside message-shaped payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: Uuid,
    pub user: UserPayload,
    pub channel_id: Uuid,
    pub text: String,
    pub plain_text: String,
    pub embedded: Vec<EmbeddedInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn make_message(message: &Message, author: Option<&User>, parsed: &ParseResult) -> MessagePayload {
    MessagePayload {
        id: message.id,
        user: make_user(author),
        channel_id: message.channel_id,
        text: message.text.clone(),
        plain_text: parsed.plain_text.clone(),
        embedded: parsed.embedded.clone(),
        created_at: message.created_at,
        updated_at: message.updated_at,
    }
}

/// Channel as it appears inside channel-shaped payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPayload {
    pub id: Uuid,
    pub name: String,
    /// Full path, `#`-prefixed.
    pub path: String,
    pub parent_id: Uuid,
    pub creator: UserPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn make_channel(channel: &Channel, path: &str, creator: Option<&User>) -> ChannelPayload {
    ChannelPayload {
        id: channel.id,
        name: channel.name.clone(),
        path: format!("#{path}"),
        parent_id: channel.parent_id.unwrap_or_else(Uuid::nil),
        creator: make_user(creator),
        created_at: channel.created_at,
        updated_at: channel.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "bob".into(),
            display_name: String::new(),
            icon_file_id: Uuid::new_v4(),
            bot: false,
        }
    }

    #[test]
    fn display_name_falls_back_to_name() {
        let payload = make_user(Some(&user()));
        assert_eq!(payload.display_name, "bob");
    }

    #[test]
    fn unknown_user_yields_the_zero_value() {
        let payload = make_user(None);
        assert_eq!(payload.id, Uuid::nil());
        assert!(payload.name.is_empty());
        assert!(!payload.bot);
    }

    #[test]
    fn channel_path_is_hash_prefixed() {
        let channel = Channel {
            id: Uuid::new_v4(),
            name: "general".into(),
            topic: String::new(),
            parent_id: None,
            creator_id: Uuid::new_v4(),
            is_public: true,
            is_dm: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };
        let payload = make_channel(&channel, "gps/times/general", None);
        assert_eq!(payload.path, "#gps/times/general");
        assert_eq!(payload.parent_id, Uuid::nil());
    }

    #[test]
    fn empty_embedded_serializes_as_an_array() {
        let message = Message {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            channel_id: Uuid::new_v4(),
            text: "hi".into(),
            stamps: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let payload = make_message(&message, None, &ParseResult::default());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["embedded"], serde_json::json!([]));
    }
}
