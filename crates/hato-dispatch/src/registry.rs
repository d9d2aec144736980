// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The topic-to-handler table.
//!
//! Injected into the service constructor rather than living in global
//! state, so tests can substitute or narrow it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

use hato_bus::{SystemEvent, topic};
use hato_core::HatoError;

use crate::context::DispatchContext;
use crate::handlers;

/// One handler entry. Non-capturing, so the table is a plain map of
/// function pointers.
pub type HandlerFn =
    fn(Arc<DispatchContext>, DateTime<Utc>, SystemEvent) -> BoxFuture<'static, Result<(), HatoError>>;

/// Maps topic names to handlers.
pub struct HandlerRegistry {
    map: HashMap<&'static str, HandlerFn>,
}

impl HandlerRegistry {
    /// An empty registry; used by tests that install their own entries.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The full production table, one entry per consumed topic.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(topic::BOT_JOINED, |c, t, e| {
            Box::pin(handlers::bot_channel::handle(c, t, e))
        });
        registry.insert(topic::BOT_LEFT, |c, t, e| {
            Box::pin(handlers::bot_channel::handle(c, t, e))
        });
        registry.insert(topic::BOT_PING_REQUEST, |c, t, e| {
            Box::pin(handlers::ping::handle(c, t, e))
        });
        registry.insert(topic::MESSAGE_CREATED, |c, t, e| {
            Box::pin(handlers::message_created::handle(c, t, e))
        });
        registry.insert(topic::MESSAGE_UPDATED, |c, t, e| {
            Box::pin(handlers::message_updated::handle(c, t, e))
        });
        registry.insert(topic::MESSAGE_DELETED, |c, t, e| {
            Box::pin(handlers::message_deleted::handle(c, t, e))
        });
        registry.insert(topic::MESSAGE_STAMPS_UPDATED, |c, t, e| {
            Box::pin(handlers::message_stamps_updated::handle(c, t, e))
        });
        registry.insert(topic::CHANNEL_CREATED, |c, t, e| {
            Box::pin(handlers::channel::handle_created(c, t, e))
        });
        registry.insert(topic::CHANNEL_TOPIC_UPDATED, |c, t, e| {
            Box::pin(handlers::channel::handle_topic_updated(c, t, e))
        });
        registry.insert(topic::USER_CREATED, |c, t, e| {
            Box::pin(handlers::user::handle(c, t, e))
        });
        registry.insert(topic::USER_ACTIVATED, |c, t, e| {
            Box::pin(handlers::user::handle(c, t, e))
        });
        registry.insert(topic::STAMP_CREATED, |c, t, e| {
            Box::pin(handlers::stamp::handle(c, t, e))
        });
        for tag_topic in [
            topic::USER_TAG_ADDED,
            topic::USER_TAG_UPDATED,
            topic::USER_TAG_REMOVED,
        ] {
            registry.insert(tag_topic, |c, t, e| Box::pin(handlers::tag::handle(c, t, e)));
        }
        for group_topic in [
            topic::USER_GROUP_CREATED,
            topic::USER_GROUP_UPDATED,
            topic::USER_GROUP_DELETED,
            topic::USER_GROUP_MEMBER_ADDED,
            topic::USER_GROUP_MEMBER_UPDATED,
            topic::USER_GROUP_MEMBER_REMOVED,
            topic::USER_GROUP_ADMIN_ADDED,
            topic::USER_GROUP_ADMIN_REMOVED,
        ] {
            registry.insert(group_topic, |c, t, e| {
                Box::pin(handlers::user_group::handle(c, t, e))
            });
        }
        registry
    }

    pub fn insert(&mut self, topic: &'static str, handler: HandlerFn) {
        self.map.insert(topic, handler);
    }

    pub fn get(&self, topic: &str) -> Option<HandlerFn> {
        self.map.get(topic).copied()
    }

    /// Every topic the service must subscribe to.
    pub fn topics(&self) -> Vec<&'static str> {
        self.map.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_all_consumed_topics() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.len(), 23);
        for topic_name in [
            topic::BOT_JOINED,
            topic::BOT_PING_REQUEST,
            topic::MESSAGE_CREATED,
            topic::MESSAGE_STAMPS_UPDATED,
            topic::CHANNEL_TOPIC_UPDATED,
            topic::USER_TAG_UPDATED,
            topic::USER_GROUP_ADMIN_REMOVED,
        ] {
            assert!(registry.get(topic_name).is_some(), "missing {topic_name}");
        }
    }

    #[test]
    fn unknown_topics_resolve_to_none() {
        let registry = HandlerRegistry::with_defaults();
        assert!(registry.get("message.reacted").is_none());
    }
}
