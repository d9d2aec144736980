// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `channel.created` / `channel.topic_updated`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use hato_bus::SystemEvent;
use hato_core::HatoError;
use hato_core::event::BotEventType;

use crate::context::DispatchContext;
use crate::handlers::bot_channel::channel_with_path;
use crate::payload;

pub async fn handle_created(
    ctx: Arc<DispatchContext>,
    datetime: DateTime<Utc>,
    event: SystemEvent,
) -> Result<(), HatoError> {
    let SystemEvent::ChannelCreated { channel } = event else {
        warn!(topic = event.topic(), "channel handler received mismatched bus event");
        return Ok(());
    };

    // Only public channel creations are broadcast.
    if channel.is_dm || !channel.is_public {
        return Ok(());
    }

    let bots = ctx
        .resolver
        .bots_subscribing(BotEventType::ChannelCreated)
        .await?;
    if bots.is_empty() {
        return Ok(());
    }

    let Some(path) = ctx.channels.channel_path(channel.id).await? else {
        warn!(channel_id = %channel.id, "created channel has no path");
        return Ok(());
    };
    let creator = ctx.users.user(channel.creator_id).await?;

    let payload = payload::make_channel_created(datetime, &channel, &path, creator.as_ref());
    ctx.dispatcher
        .multicast(BotEventType::ChannelCreated, &payload, bots)
        .await;
    Ok(())
}

pub async fn handle_topic_updated(
    ctx: Arc<DispatchContext>,
    datetime: DateTime<Utc>,
    event: SystemEvent,
) -> Result<(), HatoError> {
    let SystemEvent::ChannelTopicUpdated {
        channel_id,
        topic,
        updater_id,
    } = event
    else {
        warn!(topic = event.topic(), "channel handler received mismatched bus event");
        return Ok(());
    };

    let bots = ctx
        .resolver
        .channel_bots(channel_id, BotEventType::ChannelTopicChanged)
        .await?;
    if bots.is_empty() {
        return Ok(());
    }

    let Some((channel, path)) = channel_with_path(&ctx, channel_id).await? else {
        warn!(%channel_id, "topic change on unknown channel");
        return Ok(());
    };
    let creator = ctx.users.user(channel.creator_id).await?;
    let updater = ctx.users.user(updater_id).await?;

    let payload = payload::make_channel_topic_changed(
        datetime,
        &channel,
        &path,
        creator.as_ref(),
        &topic,
        updater.as_ref(),
    );
    ctx.dispatcher
        .multicast(BotEventType::ChannelTopicChanged, &payload, bots)
        .await;
    Ok(())
}
