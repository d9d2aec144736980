// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `user.created` / `user.activated`: global broadcasts.

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
    match event {
        SystemEvent::UserCreated { user } => {
            let bots = ctx
                .resolver
                .bots_subscribing(BotEventType::UserCreated)
                .await?;
            if bots.is_empty() {
                return Ok(());
            }
            let payload = payload::make_user_created(datetime, &user);
            ctx.dispatcher
                .multicast(BotEventType::UserCreated, &payload, bots)
                .await;
        }
        SystemEvent::UserActivated { user } => {
            let bots = ctx
                .resolver
                .bots_subscribing(BotEventType::UserActivated)
                .await?;
            if bots.is_empty() {
                return Ok(());
            }
            let payload = payload::make_user_activated(datetime, &user);
            ctx.dispatcher
                .multicast(BotEventType::UserActivated, &payload, bots)
                .await;
        }
        other => {
            warn!(topic = other.topic(), "user handler received mismatched bus event");
        }
    }
    Ok(())
}
