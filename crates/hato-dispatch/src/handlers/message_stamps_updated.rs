// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `message.stamps_updated`: notify the bot that authored the message.

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
    let SystemEvent::MessageStampsUpdated { message } = event else {
        warn!(topic = event.topic(), "stamps handler received mismatched bus event");
        return Ok(());
    };

    // Only the author bot cares, and only if it asked to.
    let Some(bot) = ctx.resolver.bot_by_bot_user_id(message.user_id).await? else {
        return Ok(());
    };
    if !bot.subscribes(BotEventType::BotMessageStampsUpdated) {
        return Ok(());
    }

    let payload = payload::make_bot_message_stamps_updated(datetime, message.id, &message.stamps);
    ctx.dispatcher
        .unicast(BotEventType::BotMessageStampsUpdated, &payload, &bot)
        .await;
    Ok(())
}
