// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed bus events and their topic names.
//!
//! Each topic carries exactly the fields listed here; publishers uphold the
//! contract by construction because the payloads are closed enum variants
//! rather than dynamically typed field maps.

use uuid::Uuid;

use hato_core::types::{Bot, Channel, Message, ParseResult, Stamp, User};

/// Topic name constants, `<entity>.<action>`.
pub mod topic {
    pub const BOT_JOINED: &str = "bot.joined";
    pub const BOT_LEFT: &str = "bot.left";
    pub const BOT_PING_REQUEST: &str = "bot.ping_request";
    pub const MESSAGE_CREATED: &str = "message.created";
    pub const MESSAGE_UPDATED: &str = "message.updated";
    pub const MESSAGE_DELETED: &str = "message.deleted";
    pub const MESSAGE_STAMPS_UPDATED: &str = "message.stamps_updated";
    pub const CHANNEL_CREATED: &str = "channel.created";
    pub const CHANNEL_TOPIC_UPDATED: &str = "channel.topic_updated";
    pub const USER_CREATED: &str = "user.created";
    pub const USER_ACTIVATED: &str = "user.activated";
    pub const STAMP_CREATED: &str = "stamp.created";
    pub const USER_TAG_ADDED: &str = "user_tag.added";
    pub const USER_TAG_UPDATED: &str = "user_tag.updated";
    pub const USER_TAG_REMOVED: &str = "user_tag.removed";
    pub const USER_GROUP_CREATED: &str = "user_group.created";
    pub const USER_GROUP_UPDATED: &str = "user_group.updated";
    pub const USER_GROUP_DELETED: &str = "user_group.deleted";
    pub const USER_GROUP_MEMBER_ADDED: &str = "user_group.member_added";
    pub const USER_GROUP_MEMBER_UPDATED: &str = "user_group.member_updated";
    pub const USER_GROUP_MEMBER_REMOVED: &str = "user_group.member_removed";
    pub const USER_GROUP_ADMIN_ADDED: &str = "user_group.admin_added";
    pub const USER_GROUP_ADMIN_REMOVED: &str = "user_group.admin_removed";
}

/// One platform event as published on the internal bus.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    BotJoined {
        bot_id: Uuid,
        channel_id: Uuid,
    },
    BotLeft {
        bot_id: Uuid,
        channel_id: Uuid,
    },
    BotPingRequest {
        bot: Bot,
    },
    MessageCreated {
        message: Message,
        parse_result: ParseResult,
    },
    MessageUpdated {
        message: Message,
        parse_result: ParseResult,
    },
    MessageDeleted {
        message: Message,
    },
    MessageStampsUpdated {
        message: Message,
    },
    ChannelCreated {
        channel: Channel,
    },
    ChannelTopicUpdated {
        channel_id: Uuid,
        topic: String,
        updater_id: Uuid,
    },
    UserCreated {
        user: User,
    },
    UserActivated {
        user: User,
    },
    StampCreated {
        stamp: Stamp,
    },
    UserTagAdded {
        user_id: Uuid,
        tag_id: Uuid,
    },
    UserTagUpdated {
        user_id: Uuid,
        tag_id: Uuid,
    },
    UserTagRemoved {
        user_id: Uuid,
        tag_id: Uuid,
    },
    UserGroupCreated {
        group_id: Uuid,
    },
    UserGroupUpdated {
        group_id: Uuid,
    },
    UserGroupDeleted {
        group_id: Uuid,
    },
    UserGroupMemberAdded {
        group_id: Uuid,
        user_id: Uuid,
    },
    UserGroupMemberUpdated {
        group_id: Uuid,
        user_id: Uuid,
    },
    UserGroupMemberRemoved {
        group_id: Uuid,
        user_id: Uuid,
    },
    UserGroupAdminAdded {
        group_id: Uuid,
        user_id: Uuid,
    },
    UserGroupAdminRemoved {
        group_id: Uuid,
        user_id: Uuid,
    },
}

impl SystemEvent {
    /// The topic this event is published on.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::BotJoined { .. } => topic::BOT_JOINED,
            Self::BotLeft { .. } => topic::BOT_LEFT,
            Self::BotPingRequest { .. } => topic::BOT_PING_REQUEST,
            Self::MessageCreated { .. } => topic::MESSAGE_CREATED,
            Self::MessageUpdated { .. } => topic::MESSAGE_UPDATED,
            Self::MessageDeleted { .. } => topic::MESSAGE_DELETED,
            Self::MessageStampsUpdated { .. } => topic::MESSAGE_STAMPS_UPDATED,
            Self::ChannelCreated { .. } => topic::CHANNEL_CREATED,
            Self::ChannelTopicUpdated { .. } => topic::CHANNEL_TOPIC_UPDATED,
            Self::UserCreated { .. } => topic::USER_CREATED,
            Self::UserActivated { .. } => topic::USER_ACTIVATED,
            Self::StampCreated { .. } => topic::STAMP_CREATED,
            Self::UserTagAdded { .. } => topic::USER_TAG_ADDED,
            Self::UserTagUpdated { .. } => topic::USER_TAG_UPDATED,
            Self::UserTagRemoved { .. } => topic::USER_TAG_REMOVED,
            Self::UserGroupCreated { .. } => topic::USER_GROUP_CREATED,
            Self::UserGroupUpdated { .. } => topic::USER_GROUP_UPDATED,
            Self::UserGroupDeleted { .. } => topic::USER_GROUP_DELETED,
            Self::UserGroupMemberAdded { .. } => topic::USER_GROUP_MEMBER_ADDED,
            Self::UserGroupMemberUpdated { .. } => topic::USER_GROUP_MEMBER_UPDATED,
            Self::UserGroupMemberRemoved { .. } => topic::USER_GROUP_MEMBER_REMOVED,
            Self::UserGroupAdminAdded { .. } => topic::USER_GROUP_ADMIN_ADDED,
            Self::UserGroupAdminRemoved { .. } => topic::USER_GROUP_ADMIN_REMOVED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_follow_entity_action_naming() {
        let ev = SystemEvent::UserGroupAdminRemoved {
            group_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };
        assert_eq!(ev.topic(), "user_group.admin_removed");
    }
}
