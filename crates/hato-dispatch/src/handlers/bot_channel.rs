// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `bot.joined` / `bot.left`: a bot's channel membership changed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

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
    let (event_type, bot_id, channel_id) = match event {
        SystemEvent::BotJoined { bot_id, channel_id } => {
            (BotEventType::Joined, bot_id, channel_id)
        }
        SystemEvent::BotLeft { bot_id, channel_id } => (BotEventType::Left, bot_id, channel_id),
        other => {
            warn!(topic = other.topic(), "membership handler received mismatched bus event");
            return Ok(());
        }
    };

    let Some(bot) = ctx.resolver.bot_by_id(bot_id).await? else {
        return Ok(());
    };
    if !bot.subscribes(event_type) {
        return Ok(());
    }

    let Some((channel, path)) = channel_with_path(&ctx, channel_id).await? else {
        warn!(%channel_id, "membership event for unknown channel");
        return Ok(());
    };
    let creator = ctx.users.user(channel.creator_id).await?;

    let payload = payload::make_joined_or_left(datetime, &channel, &path, creator.as_ref());
    ctx.dispatcher.unicast(event_type, &payload, &bot).await;
    Ok(())
}

pub(crate) async fn channel_with_path(
    ctx: &DispatchContext,
    channel_id: Uuid,
) -> Result<Option<(hato_core::types::Channel, String)>, HatoError> {
    let Some(channel) = ctx.channels.channel(channel_id).await? else {
        return Ok(None);
    };
    let Some(path) = ctx.channels.channel_path(channel_id).await? else {
        return Ok(None);
    };
    Ok(Some((channel, path)))
}
