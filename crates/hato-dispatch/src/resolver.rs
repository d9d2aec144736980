// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Target resolution: which bots an event must reach.
//!
//! All lookups return Active bots only; subscription and membership
//! filters are pushed down into the store query. Self-echo and mention
//! handling compose on top in the handlers.

use std::sync::Arc;

use uuid::Uuid;

use hato_core::event::BotEventType;
use hato_core::traits::bot_store::{BotStore, BotsQuery};
use hato_core::types::Bot;
use hato_core::HatoError;

/// Resolver over the bot store.
pub struct TargetResolver {
    bots: Arc<dyn BotStore>,
}

impl TargetResolver {
    pub fn new(bots: Arc<dyn BotStore>) -> Self {
        Self { bots }
    }

    /// The Active bot with the given id, if any.
    pub async fn bot_by_id(&self, id: Uuid) -> Result<Option<Bot>, HatoError> {
        let bots = self
            .bots
            .bots(BotsQuery::default().active().bot_id(id))
            .await?;
        Ok(bots.into_iter().next())
    }

    /// The Active bot whose synthetic user has the given id, if any.
    pub async fn bot_by_bot_user_id(&self, user_id: Uuid) -> Result<Option<Bot>, HatoError> {
        let bots = self
            .bots
            .bots(BotsQuery::default().active().bot_user_id(user_id))
            .await?;
        Ok(bots.into_iter().next())
    }

    /// All Active bots subscribed to the event.
    pub async fn bots_subscribing(&self, event: BotEventType) -> Result<Vec<Bot>, HatoError> {
        self.bots
            .bots(BotsQuery::default().active().subscribes(event))
            .await
    }

    /// All Active bots subscribed to the event whose synthetic user is a
    /// member of the channel.
    pub async fn channel_bots(
        &self,
        channel_id: Uuid,
        event: BotEventType,
    ) -> Result<Vec<Bot>, HatoError> {
        self.bots
            .bots(
                BotsQuery::default()
                    .active()
                    .subscribes(event)
                    .member_of(channel_id),
            )
            .await
    }
}

/// Drop every bot whose synthetic user authored the message, preventing
/// self-echo loops.
pub fn filter_bot_user_id_not_equals(bots: Vec<Bot>, user_id: Uuid) -> Vec<Bot> {
    bots.into_iter()
        .filter(|bot| bot.bot_user_id != user_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hato_core::types::BotState;
    use hato_test_utils::builders::bot;
    use hato_test_utils::stores::InMemoryBotStore;

    #[tokio::test]
    async fn bot_by_id_only_sees_active_bots() {
        let paused = bot().state(BotState::Paused).build();
        let active = bot().build();
        let store = Arc::new(InMemoryBotStore::with_bots(vec![
            paused.clone(),
            active.clone(),
        ]));
        let resolver = TargetResolver::new(store);

        assert!(resolver.bot_by_id(paused.id).await.unwrap().is_none());
        assert_eq!(
            resolver.bot_by_id(active.id).await.unwrap().unwrap().id,
            active.id
        );
    }

    #[tokio::test]
    async fn bots_subscribing_filters_on_the_event_tag() {
        let subscribed = bot().subscribes(&[BotEventType::StampCreated]).build();
        let other = bot().subscribes(&[BotEventType::Ping]).build();
        let store = Arc::new(InMemoryBotStore::with_bots(vec![
            subscribed.clone(),
            other,
        ]));
        let resolver = TargetResolver::new(store);

        let found = resolver
            .bots_subscribing(BotEventType::StampCreated)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, subscribed.id);
    }

    #[tokio::test]
    async fn channel_bots_requires_membership() {
        let channel_id = Uuid::new_v4();
        let member = bot().subscribes(&[BotEventType::MessageCreated]).build();
        let outsider = bot().subscribes(&[BotEventType::MessageCreated]).build();

        let store = InMemoryBotStore::with_bots(vec![member.clone(), outsider]);
        store.join(member.id, channel_id);
        let resolver = TargetResolver::new(Arc::new(store));

        let found = resolver
            .channel_bots(channel_id, BotEventType::MessageCreated)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, member.id);
    }

    #[test]
    fn self_echo_filter_drops_the_author_bot() {
        let author = Uuid::new_v4();
        let echoing = bot().bot_user_id(author).build();
        let other = bot().build();
        let kept = filter_bot_user_id_not_equals(vec![echoing, other.clone()], author);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, other.id);
    }
}
