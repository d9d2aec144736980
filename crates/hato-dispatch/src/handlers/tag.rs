// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `user_tag.{added,updated,removed}`: notify the tagged user's bot.
//!
//! The subscription check runs before the tag is fetched, so untargeted
//! tag churn never touches the tag store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use hato_bus::SystemEvent;
use hato_core::HatoError;
use hato_core::event::BotEventType;

use crate::context::DispatchContext;
use crate::payload;

pub async fn handle(
    ctx: Arc<DispatchContext>,
    datetime: DateTime<Utc>,
    event: SystemEvent,
) -> Result<(), HatoError> {
    let (event_type, user_id, tag_id) = match event {
        SystemEvent::UserTagAdded { user_id, tag_id } => {
            (BotEventType::TagAdded, user_id, tag_id)
        }
        SystemEvent::UserTagUpdated { user_id, tag_id } => {
            (BotEventType::TagUpdated, user_id, tag_id)
        }
        SystemEvent::UserTagRemoved { user_id, tag_id } => {
            (BotEventType::TagRemoved, user_id, tag_id)
        }
        other => {
            warn!(topic = other.topic(), "tag handler received mismatched bus event");
            return Ok(());
        }
    };

    // Subscription check before fetch: most tagged users are not bots.
    let Some(bot) = ctx.resolver.bot_by_bot_user_id(user_id).await? else {
        return Ok(());
    };
    if !bot.subscribes(event_type) {
        return Ok(());
    }

    let Some(tag) = ctx.tags.tag(tag_id).await? else {
        warn!(%tag_id, "tag event for unknown tag");
        return Ok(());
    };

    let payload = payload::make_tag_event(datetime, tag.id, &tag.name);
    ctx.dispatcher.unicast(event_type, &payload, &bot).await;
    Ok(())
}
