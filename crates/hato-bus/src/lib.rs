// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Internal event bus for the Hato platform.
//!
//! A topic-filtered publish/subscribe channel carrying strongly typed
//! platform events. Subscriptions are bounded; a full subscriber applies
//! back-pressure at the publisher instead of dropping events.

mod event;

pub use event::{SystemEvent, topic};

use std::collections::HashSet;

use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Identifies one subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The receiving end of a subscription.
///
/// The channel closes when the subscription is removed from the bus, so a
/// plain `while let Some(ev) = sub.receiver.recv().await` loop terminates
/// on unsubscribe.
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: mpsc::Receiver<SystemEvent>,
}

struct SubEntry {
    id: SubscriptionId,
    topics: HashSet<&'static str>,
    tx: mpsc::Sender<SystemEvent>,
}

/// Topic-filtered pub/sub bus.
#[derive(Default)]
pub struct EventBus {
    inner: Mutex<BusInner>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subs: Vec<SubEntry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription for the given topics with a bounded buffer.
    pub async fn subscribe(&self, capacity: usize, topics: &[&'static str]) -> Subscription {
        let (tx, rx) = mpsc::channel(capacity);
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subs.push(SubEntry {
            id,
            topics: topics.iter().copied().collect(),
            tx,
        });
        debug!(topics = topics.len(), "bus subscription registered");
        Subscription { id, receiver: rx }
    }

    /// Remove a subscription, closing its channel.
    pub async fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock().await;
        inner.subs.retain(|s| s.id != id);
    }

    /// Deliver an event to every subscription covering its topic.
    ///
    /// Awaits on full subscriber buffers, so slow consumers push back on
    /// the publisher. Closed subscriptions are skipped.
    pub async fn publish(&self, event: SystemEvent) {
        let topic = event.topic();
        let targets: Vec<mpsc::Sender<SystemEvent>> = {
            let inner = self.inner.lock().await;
            inner
                .subs
                .iter()
                .filter(|s| s.topics.contains(topic))
                .map(|s| s.tx.clone())
                .collect()
        };

        for tx in targets {
            if tx.send(event.clone()).await.is_err() {
                debug!(topic, "dropping event for closed subscription");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;
    use uuid::Uuid;

    fn joined_event() -> SystemEvent {
        SystemEvent::BotJoined {
            bot_id: Uuid::new_v4(),
            channel_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn publish_reaches_matching_subscription_only() {
        let bus = EventBus::new();
        let mut joined = bus.subscribe(4, &[topic::BOT_JOINED]).await;
        let mut left = bus.subscribe(4, &[topic::BOT_LEFT]).await;

        bus.publish(joined_event()).await;

        let received = joined.receiver.recv().await.unwrap();
        assert_eq!(received.topic(), topic::BOT_JOINED);
        assert!(left.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribe_closes_the_channel() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe(4, &[topic::BOT_JOINED]).await;
        bus.unsubscribe(sub.id).await;
        assert!(sub.receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn publish_to_removed_subscription_is_a_no_op() {
        let bus = EventBus::new();
        let sub = bus.subscribe(1, &[topic::BOT_JOINED]).await;
        drop(sub.receiver);
        bus.unsubscribe(sub.id).await;
        bus.publish(joined_event()).await;
    }

    #[tokio::test(start_paused = true)]
    async fn full_subscriber_applies_back_pressure() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe(1, &[topic::BOT_JOINED]).await;

        bus.publish(joined_event()).await;
        // Buffer is full; the next publish must block until the
        // subscriber drains one message.
        let blocked = timeout(Duration::from_millis(50), bus.publish(joined_event())).await;
        assert!(blocked.is_err(), "publish should block on a full buffer");

        sub.receiver.recv().await.unwrap();
        timeout(Duration::from_millis(50), bus.publish(joined_event()))
            .await
            .expect("publish should complete once capacity frees up");
    }
}
