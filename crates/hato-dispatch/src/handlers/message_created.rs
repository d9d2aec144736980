// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `message.created`: the highest-traffic handler.
//!
//! Public channels fan out to channel subscribers plus mention-subscribed
//! bots; DM channels unicast to the bot on the other side of the pair.
//! Mention subscription is satisfied with MESSAGE_CREATED deliveries --
//! MENTION_MESSAGE_CREATED exists only as a subscription filter, not as a
//! wire event.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, warn};
use uuid::Uuid;

use hato_bus::SystemEvent;
use hato_core::HatoError;
use hato_core::event::BotEventType;
use hato_core::types::{Channel, Message, ParseResult};

use crate::context::DispatchContext;
use crate::payload;
use crate::resolver::filter_bot_user_id_not_equals;

pub async fn handle(
    ctx: Arc<DispatchContext>,
    datetime: DateTime<Utc>,
    event: SystemEvent,
) -> Result<(), HatoError> {
    let SystemEvent::MessageCreated {
        message,
        parse_result,
    } = event
    else {
        warn!(topic = event.topic(), "message handler received mismatched bus event");
        return Ok(());
    };

    let Some(channel) = ctx.channels.channel(message.channel_id).await? else {
        warn!(channel_id = %message.channel_id, "message created in unknown channel");
        return Ok(());
    };

    if channel.is_dm {
        dispatch_dm(&ctx, datetime, &channel, &message, &parse_result).await
    } else {
        dispatch_public(&ctx, datetime, &message, &parse_result).await
    }
}

async fn dispatch_dm(
    ctx: &DispatchContext,
    datetime: DateTime<Utc>,
    channel: &Channel,
    message: &Message,
    parsed: &ParseResult,
) -> Result<(), HatoError> {
    let Some(recipient) = dm_recipient(ctx, channel.id, message.user_id).await? else {
        return Ok(());
    };
    let Some(bot) = ctx.resolver.bot_by_bot_user_id(recipient).await? else {
        return Ok(());
    };
    if !bot.subscribes(BotEventType::DirectMessageCreated) {
        return Ok(());
    }

    let author = ctx.users.user(message.user_id).await?;
    let payload = payload::make_direct_message_created(datetime, message, author.as_ref(), parsed);
    ctx.dispatcher
        .unicast(BotEventType::DirectMessageCreated, &payload, &bot)
        .await;
    Ok(())
}

async fn dispatch_public(
    ctx: &DispatchContext,
    datetime: DateTime<Utc>,
    message: &Message,
    parsed: &ParseResult,
) -> Result<(), HatoError> {
    // Channel subscribers first.
    let mut bots = ctx
        .resolver
        .channel_bots(message.channel_id, BotEventType::MessageCreated)
        .await?;

    // Then mention targets, deduplicated before lookup.
    let mut seen: HashSet<Uuid> = HashSet::new();
    for user_id in &parsed.mentions {
        if !seen.insert(*user_id) {
            continue;
        }
        match ctx.resolver.bot_by_bot_user_id(*user_id).await {
            Ok(Some(bot)) if bot.subscribes(BotEventType::MentionMessageCreated) => {
                bots.push(bot);
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, user_id = %user_id, "mention target lookup failed");
            }
        }
    }

    let bots = filter_bot_user_id_not_equals(bots, message.user_id);
    if bots.is_empty() {
        return Ok(());
    }

    let author = ctx.users.user(message.user_id).await?;
    let payload = payload::make_message_created(datetime, message, author.as_ref(), parsed);
    ctx.dispatcher
        .multicast(BotEventType::MessageCreated, &payload, bots)
        .await;
    Ok(())
}

/// The single non-author member of a two-member DM pair. A self-DM (or a
/// malformed membership list) yields no recipient.
pub(crate) async fn dm_recipient(
    ctx: &DispatchContext,
    channel_id: Uuid,
    author_id: Uuid,
) -> Result<Option<Uuid>, HatoError> {
    let members = ctx.channels.dm_members(channel_id).await?;
    Ok(members.into_iter().find(|&m| m != author_id))
}
