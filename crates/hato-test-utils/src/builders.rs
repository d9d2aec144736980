// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders for domain objects.
//!
//! Defaults are the least surprising values: an Active HTTP bot with no
//! subscriptions, a public non-DM channel, a human user.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::types::{
    Bot, BotMode, BotState, Channel, Message, MessageStamp, ParseResult, Stamp, Tag, User,
};

fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// Start building a bot.
pub fn bot() -> BotBuilder {
    BotBuilder {
        bot: Bot {
            id: Uuid::new_v4(),
            bot_user_id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            description: String::new(),
            verification_token: "verification-token".into(),
            post_url: "http://127.0.0.1:1/webhook".into(),
            subscribe_events: Default::default(),
            mode: BotMode::Http,
            state: BotState::Active,
            privileged: false,
            created_at: fixture_time(),
            updated_at: fixture_time(),
        },
    }
}

pub struct BotBuilder {
    bot: Bot,
}

impl BotBuilder {
    pub fn id(mut self, id: Uuid) -> Self {
        self.bot.id = id;
        self
    }

    pub fn bot_user_id(mut self, id: Uuid) -> Self {
        self.bot.bot_user_id = id;
        self
    }

    pub fn mode(mut self, mode: BotMode) -> Self {
        self.bot.mode = mode;
        self
    }

    pub fn state(mut self, state: BotState) -> Self {
        self.bot.state = state;
        self
    }

    pub fn subscribes(mut self, events: &[BotEventType]) -> Self {
        self.bot.subscribe_events = events.iter().copied().collect();
        self
    }

    pub fn post_url(mut self, url: impl Into<String>) -> Self {
        self.bot.post_url = url.into();
        self
    }

    pub fn verification_token(mut self, token: impl Into<String>) -> Self {
        self.bot.verification_token = token.into();
        self
    }

    pub fn privileged(mut self) -> Self {
        self.bot.privileged = true;
        self
    }

    pub fn build(self) -> Bot {
        self.bot
    }
}

/// Start building a channel.
pub fn channel() -> ChannelBuilder {
    ChannelBuilder {
        channel: Channel {
            id: Uuid::new_v4(),
            name: "general".into(),
            topic: String::new(),
            parent_id: None,
            creator_id: Uuid::new_v4(),
            is_public: true,
            is_dm: false,
            created_at: fixture_time(),
            updated_at: fixture_time(),
        },
    }
}

pub struct ChannelBuilder {
    channel: Channel,
}

impl ChannelBuilder {
    pub fn id(mut self, id: Uuid) -> Self {
        self.channel.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.channel.name = name.into();
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.channel.topic = topic.into();
        self
    }

    pub fn creator_id(mut self, id: Uuid) -> Self {
        self.channel.creator_id = id;
        self
    }

    pub fn parent_id(mut self, id: Uuid) -> Self {
        self.channel.parent_id = Some(id);
        self
    }

    pub fn dm(mut self) -> Self {
        self.channel.is_dm = true;
        self.channel.is_public = false;
        self
    }

    pub fn private(mut self) -> Self {
        self.channel.is_public = false;
        self
    }

    pub fn build(self) -> Channel {
        self.channel
    }
}

/// Build a user with the given name.
pub fn user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.into(),
        display_name: String::new(),
        icon_file_id: Uuid::new_v4(),
        bot: false,
    }
}

/// Start building a message by `author` in `channel_id`.
pub fn message(author: Uuid, channel_id: Uuid) -> MessageBuilder {
    MessageBuilder {
        message: Message {
            id: Uuid::new_v4(),
            user_id: author,
            channel_id,
            text: "hello".into(),
            stamps: Vec::new(),
            created_at: fixture_time(),
            updated_at: fixture_time(),
        },
    }
}

pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn id(mut self, id: Uuid) -> Self {
        self.message.id = id;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.message.text = text.into();
        self
    }

    pub fn stamp(mut self, stamp_id: Uuid, user_id: Uuid, count: i32) -> Self {
        self.message.stamps.push(MessageStamp {
            stamp_id,
            user_id,
            count,
            created_at: fixture_time(),
            updated_at: fixture_time(),
        });
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// A parse result with the given plain text and mentions, no embeddings.
pub fn parsed(plain_text: &str, mentions: &[Uuid]) -> ParseResult {
    ParseResult {
        plain_text: plain_text.into(),
        mentions: mentions.to_vec(),
        embedded: Vec::new(),
    }
}

/// A stamp created by `creator_id`.
pub fn stamp(name: &str, creator_id: Uuid) -> Stamp {
    Stamp {
        id: Uuid::new_v4(),
        name: name.into(),
        file_id: Uuid::new_v4(),
        creator_id,
        created_at: fixture_time(),
        updated_at: fixture_time(),
    }
}

/// A tag with the given text.
pub fn tag(name: &str) -> Tag {
    Tag {
        id: Uuid::new_v4(),
        name: name.into(),
    }
}
