// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One payload shape per event type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use hato_core::types::{Channel, Message, MessageStamp, ParseResult, Stamp, User};

use super::{Base, ChannelPayload, MessagePayload, UserPayload, make_base, make_channel, make_message, make_user};

#[derive(Debug, Clone, Serialize)]
pub struct Ping {
    #[serde(flatten)]
    pub base: Base,
}

pub fn make_ping(event_time: DateTime<Utc>) -> Ping {
    Ping {
        base: make_base(event_time),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageCreated {
    #[serde(flatten)]
    pub base: Base,
    pub message: MessagePayload,
}

pub fn make_message_created(
    event_time: DateTime<Utc>,
    message: &Message,
    author: Option<&User>,
    parsed: &ParseResult,
) -> MessageCreated {
    MessageCreated {
        base: make_base(event_time),
        message: make_message(message, author, parsed),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageUpdated {
    #[serde(flatten)]
    pub base: Base,
    pub message: MessagePayload,
}

pub fn make_message_updated(
    event_time: DateTime<Utc>,
    message: &Message,
    author: Option<&User>,
    parsed: &ParseResult,
) -> MessageUpdated {
    MessageUpdated {
        base: make_base(event_time),
        message: make_message(message, author, parsed),
    }
}

/// The reduced message shape carried by public-channel delete events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMessage {
    pub id: Uuid,
    pub channel_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageDeleted {
    #[serde(flatten)]
    pub base: Base,
    pub message: DeletedMessage,
}

pub fn make_message_deleted(event_time: DateTime<Utc>, message: &Message) -> MessageDeleted {
    MessageDeleted {
        base: make_base(event_time),
        message: DeletedMessage {
            id: message.id,
            channel_id: message.channel_id,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectMessageCreated {
    #[serde(flatten)]
    pub base: Base,
    pub message: MessagePayload,
}

pub fn make_direct_message_created(
    event_time: DateTime<Utc>,
    message: &Message,
    author: Option<&User>,
    parsed: &ParseResult,
) -> DirectMessageCreated {
    DirectMessageCreated {
        base: make_base(event_time),
        message: make_message(message, author, parsed),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectMessageUpdated {
    #[serde(flatten)]
    pub base: Base,
    pub message: MessagePayload,
}

pub fn make_direct_message_updated(
    event_time: DateTime<Utc>,
    message: &Message,
    author: Option<&User>,
    parsed: &ParseResult,
) -> DirectMessageUpdated {
    DirectMessageUpdated {
        base: make_base(event_time),
        message: make_message(message, author, parsed),
    }
}

/// The reduced message shape carried by DM delete events. Unlike the
/// public form it names the author so the bot can tell whose message
/// vanished from the pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedDirectMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub channel_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectMessageDeleted {
    #[serde(flatten)]
    pub base: Base,
    pub message: DeletedDirectMessage,
}

pub fn make_direct_message_deleted(
    event_time: DateTime<Utc>,
    message: &Message,
) -> DirectMessageDeleted {
    DirectMessageDeleted {
        base: make_base(event_time),
        message: DeletedDirectMessage {
            id: message.id,
            user_id: message.user_id,
            channel_id: message.channel_id,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMessageStampsUpdated {
    #[serde(flatten)]
    pub base: Base,
    pub message_id: Uuid,
    pub stamps: Vec<MessageStamp>,
}

pub fn make_bot_message_stamps_updated(
    event_time: DateTime<Utc>,
    message_id: Uuid,
    stamps: &[MessageStamp],
) -> BotMessageStampsUpdated {
    BotMessageStampsUpdated {
        base: make_base(event_time),
        message_id,
        stamps: stamps.to_vec(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinedOrLeft {
    #[serde(flatten)]
    pub base: Base,
    pub channel: ChannelPayload,
}

pub fn make_joined_or_left(
    event_time: DateTime<Utc>,
    channel: &Channel,
    path: &str,
    creator: Option<&User>,
) -> JoinedOrLeft {
    JoinedOrLeft {
        base: make_base(event_time),
        channel: make_channel(channel, path, creator),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelCreated {
    #[serde(flatten)]
    pub base: Base,
    pub channel: ChannelPayload,
}

pub fn make_channel_created(
    event_time: DateTime<Utc>,
    channel: &Channel,
    path: &str,
    creator: Option<&User>,
) -> ChannelCreated {
    ChannelCreated {
        base: make_base(event_time),
        channel: make_channel(channel, path, creator),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelTopicChanged {
    #[serde(flatten)]
    pub base: Base,
    pub channel: ChannelPayload,
    pub topic: String,
    pub updater: UserPayload,
}

pub fn make_channel_topic_changed(
    event_time: DateTime<Utc>,
    channel: &Channel,
    path: &str,
    creator: Option<&User>,
    topic: &str,
    updater: Option<&User>,
) -> ChannelTopicChanged {
    ChannelTopicChanged {
        base: make_base(event_time),
        channel: make_channel(channel, path, creator),
        topic: topic.to_owned(),
        updater: make_user(updater),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreated {
    #[serde(flatten)]
    pub base: Base,
    pub user: UserPayload,
}

pub fn make_user_created(event_time: DateTime<Utc>, user: &User) -> UserCreated {
    UserCreated {
        base: make_base(event_time),
        user: make_user(Some(user)),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserActivated {
    #[serde(flatten)]
    pub base: Base,
    pub user: UserPayload,
}

pub fn make_user_activated(event_time: DateTime<Utc>, user: &User) -> UserActivated {
    UserActivated {
        base: make_base(event_time),
        user: make_user(Some(user)),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampCreated {
    #[serde(flatten)]
    pub base: Base,
    pub id: Uuid,
    pub name: String,
    pub file_id: Uuid,
    pub creator: UserPayload,
}

pub fn make_stamp_created(
    event_time: DateTime<Utc>,
    stamp: &Stamp,
    creator: Option<&User>,
) -> StampCreated {
    StampCreated {
        base: make_base(event_time),
        id: stamp.id,
        name: stamp.name.clone(),
        file_id: stamp.file_id,
        creator: make_user(creator),
    }
}

/// Shared shape of TAG_ADDED / TAG_UPDATED / TAG_REMOVED.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagEvent {
    #[serde(flatten)]
    pub base: Base,
    pub tag_id: Uuid,
    /// The tag text.
    pub tag: String,
}

pub fn make_tag_event(event_time: DateTime<Utc>, tag_id: Uuid, tag: &str) -> TagEvent {
    TagEvent {
        base: make_base(event_time),
        tag_id,
        tag: tag.to_owned(),
    }
}

/// Shared shape of USER_GROUP_{CREATED,UPDATED,DELETED}.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEvent {
    #[serde(flatten)]
    pub base: Base,
    pub group_id: Uuid,
}

pub fn make_group_event(event_time: DateTime<Utc>, group_id: Uuid) -> GroupEvent {
    GroupEvent {
        base: make_base(event_time),
        group_id,
    }
}

/// Shared shape of the USER_GROUP member/admin events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberEvent {
    #[serde(flatten)]
    pub base: Base,
    pub group_id: Uuid,
    pub user_id: Uuid,
}

pub fn make_group_member_event(
    event_time: DateTime<Utc>,
    group_id: Uuid,
    user_id: Uuid,
) -> GroupMemberEvent {
    GroupMemberEvent {
        base: make_base(event_time),
        group_id,
        user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    #[test]
    fn event_time_is_the_first_field() {
        let json = serde_json::to_string(&make_ping(event_time())).unwrap();
        assert!(
            json.starts_with("{\"eventTime\":"),
            "eventTime must lead the body, got {json}"
        );
    }

    #[test]
    fn ping_payload_is_base_only() {
        let json = serde_json::to_value(make_ping(event_time())).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn deleted_message_shapes_differ_between_public_and_dm() {
        let message = Message {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            channel_id: Uuid::new_v4(),
            text: "gone".into(),
            stamps: Vec::new(),
            created_at: event_time(),
            updated_at: event_time(),
        };

        let public = serde_json::to_value(make_message_deleted(event_time(), &message)).unwrap();
        assert!(public["message"].get("userId").is_none());
        assert_eq!(public["message"]["id"], message.id.to_string());

        let dm = serde_json::to_value(make_direct_message_deleted(event_time(), &message)).unwrap();
        assert_eq!(dm["message"]["userId"], message.user_id.to_string());
    }

    #[test]
    fn stamps_updated_carries_the_aggregation() {
        let stamp = MessageStamp {
            stamp_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            count: 3,
            created_at: event_time(),
            updated_at: event_time(),
        };
        let json = serde_json::to_value(make_bot_message_stamps_updated(
            event_time(),
            Uuid::new_v4(),
            std::slice::from_ref(&stamp),
        ))
        .unwrap();
        assert_eq!(json["stamps"][0]["stampId"], stamp.stamp_id.to_string());
        assert_eq!(json["stamps"][0]["count"], 3);
    }

    #[test]
    fn group_member_event_names_both_ids() {
        let group_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let json =
            serde_json::to_value(make_group_member_event(event_time(), group_id, user_id)).unwrap();
        assert_eq!(json["groupId"], group_id.to_string());
        assert_eq!(json["userId"], user_id.to_string());
    }

    #[test]
    fn tag_event_carries_id_and_text() {
        let tag_id = Uuid::new_v4();
        let json = serde_json::to_value(make_tag_event(event_time(), tag_id, "backend")).unwrap();
        assert_eq!(json["tagId"], tag_id.to_string());
        assert_eq!(json["tag"], "backend");
    }
}
