// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of bot event types and the subscription set built on it.
//!
//! Every event type has exactly one wire name (its SCREAMING_SNAKE_CASE
//! form) and exactly one payload shape, defined in `hato-dispatch`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A bot event type tag.
///
/// The `Display`/`FromStr` forms are the wire names carried in the
/// `X-TRAQ-BOT-EVENT` header and in WebSocket frames.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BotEventType {
    Ping,
    Joined,
    Left,
    MessageCreated,
    MessageUpdated,
    MessageDeleted,
    MentionMessageCreated,
    DirectMessageCreated,
    DirectMessageUpdated,
    DirectMessageDeleted,
    BotMessageStampsUpdated,
    ChannelCreated,
    ChannelTopicChanged,
    UserCreated,
    UserActivated,
    StampCreated,
    TagAdded,
    TagUpdated,
    TagRemoved,
    UserGroupCreated,
    UserGroupUpdated,
    UserGroupDeleted,
    UserGroupMemberAdded,
    UserGroupMemberUpdated,
    UserGroupMemberRemoved,
    UserGroupAdminAdded,
    UserGroupAdminRemoved,
}

/// A set of event types a bot subscribes to.
///
/// Serializes as a JSON array of wire names; the `Display`/`FromStr` pair
/// round-trips through the space-separated form used by storage columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTypeSet(HashSet<BotEventType>);

impl EventTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains the given event type.
    pub fn contains(&self, event: BotEventType) -> bool {
        self.0.contains(&event)
    }

    pub fn insert(&mut self, event: BotEventType) -> bool {
        self.0.insert(event)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = BotEventType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<BotEventType> for EventTypeSet {
    fn from_iter<I: IntoIterator<Item = BotEventType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for EventTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for event in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{event}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for EventTypeSet {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(' ')
            .filter(|t| !t.is_empty())
            .map(BotEventType::from_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_names_are_screaming_snake_case() {
        assert_eq!(BotEventType::Ping.to_string(), "PING");
        assert_eq!(
            BotEventType::MentionMessageCreated.to_string(),
            "MENTION_MESSAGE_CREATED"
        );
        assert_eq!(
            BotEventType::BotMessageStampsUpdated.to_string(),
            "BOT_MESSAGE_STAMPS_UPDATED"
        );
        assert_eq!(
            BotEventType::UserGroupAdminRemoved.to_string(),
            "USER_GROUP_ADMIN_REMOVED"
        );
    }

    #[test]
    fn every_type_round_trips_through_its_wire_name() {
        for event in BotEventType::iter() {
            let parsed = BotEventType::from_str(&event.to_string()).unwrap();
            assert_eq!(event, parsed);
        }
    }

    #[test]
    fn serde_agrees_with_strum_on_wire_names() {
        for event in BotEventType::iter() {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{event}\""));
        }
    }

    #[test]
    fn event_type_count_is_closed() {
        assert_eq!(BotEventType::iter().count(), 27);
    }

    #[test]
    fn set_round_trips_space_separated() {
        let set: EventTypeSet = "PING MESSAGE_CREATED TAG_ADDED".parse().unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(BotEventType::Ping));
        assert!(set.contains(BotEventType::MessageCreated));
        assert!(!set.contains(BotEventType::MessageDeleted));

        let reparsed: EventTypeSet = set.to_string().parse().unwrap();
        assert_eq!(set, reparsed);
    }

    #[test]
    fn set_parse_skips_empty_tokens_but_rejects_unknown_ones() {
        let set: EventTypeSet = "  PING  ".parse().unwrap();
        assert_eq!(set.len(), 1);
        assert!("PING NOT_AN_EVENT".parse::<EventTypeSet>().is_err());
    }

    #[test]
    fn set_serializes_as_json_array() {
        let set: EventTypeSet = [BotEventType::Ping].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[\"PING\"]");
    }
}
