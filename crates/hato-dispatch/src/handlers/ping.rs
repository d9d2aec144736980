// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `bot.ping_request`: probe a bot and drive its activation state.
//!
//! PING is delivered regardless of the bot's current state; the outcome is
//! applied only to states that respond to pings (Disabled is sticky).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use hato_bus::SystemEvent;
use hato_core::HatoError;
use hato_core::event::BotEventType;

use crate::context::DispatchContext;
use crate::dispatcher::encode_payload;
use crate::payload;
use crate::state::next_state_after_ping;

pub async fn handle(
    ctx: Arc<DispatchContext>,
    datetime: DateTime<Utc>,
    event: SystemEvent,
) -> Result<(), HatoError> {
    let SystemEvent::BotPingRequest { bot } = event else {
        warn!(topic = event.topic(), "ping handler received mismatched bus event");
        return Ok(());
    };

    let body = encode_payload(&payload::make_ping(datetime));
    let delivered = ctx.dispatcher.send(&bot, BotEventType::Ping, body).await;

    if let Some(next) = next_state_after_ping(bot.state, delivered) {
        ctx.bots.change_bot_state(bot.id, next).await?;
        info!(bot_id = %bot.id, state = %next, delivered, "ping outcome applied");
    }
    Ok(())
}
