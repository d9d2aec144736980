// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `message.updated`: edits fan out like creations, minus mentions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use hato_bus::SystemEvent;
use hato_core::HatoError;
use hato_core::event::BotEventType;

use crate::context::DispatchContext;
use crate::handlers::message_created::dm_recipient;
use crate::payload;
use crate::resolver::filter_bot_user_id_not_equals;

pub async fn handle(
    ctx: Arc<DispatchContext>,
    datetime: DateTime<Utc>,
    event: SystemEvent,
) -> Result<(), HatoError> {
    let SystemEvent::MessageUpdated {
        message,
        parse_result,
    } = event
    else {
        warn!(topic = event.topic(), "message handler received mismatched bus event");
        return Ok(());
    };

    let Some(channel) = ctx.channels.channel(message.channel_id).await? else {
        warn!(channel_id = %message.channel_id, "message updated in unknown channel");
        return Ok(());
    };

    if channel.is_dm {
        let Some(recipient) = dm_recipient(&ctx, channel.id, message.user_id).await? else {
            return Ok(());
        };
        let Some(bot) = ctx.resolver.bot_by_bot_user_id(recipient).await? else {
            return Ok(());
        };
        if !bot.subscribes(BotEventType::DirectMessageUpdated) {
            return Ok(());
        }

        let author = ctx.users.user(message.user_id).await?;
        let payload =
            payload::make_direct_message_updated(datetime, &message, author.as_ref(), &parse_result);
        ctx.dispatcher
            .unicast(BotEventType::DirectMessageUpdated, &payload, &bot)
            .await;
    } else {
        let bots = ctx
            .resolver
            .channel_bots(message.channel_id, BotEventType::MessageUpdated)
            .await?;
        let bots = filter_bot_user_id_not_equals(bots, message.user_id);
        if bots.is_empty() {
            return Ok(());
        }

        let author = ctx.users.user(message.user_id).await?;
        let payload =
            payload::make_message_updated(datetime, &message, author.as_ref(), &parse_result);
        ctx.dispatcher
            .multicast(BotEventType::MessageUpdated, &payload, bots)
            .await;
    }
    Ok(())
}
