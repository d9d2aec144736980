// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stamp.created`: global broadcast.

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
    let SystemEvent::StampCreated { stamp } = event else {
        warn!(topic = event.topic(), "stamp handler received mismatched bus event");
        return Ok(());
    };

    let bots = ctx
        .resolver
        .bots_subscribing(BotEventType::StampCreated)
        .await?;
    if bots.is_empty() {
        return Ok(());
    }

    let creator = ctx.users.user(stamp.creator_id).await?;
    let payload = payload::make_stamp_created(datetime, &stamp, creator.as_ref());
    ctx.dispatcher
        .multicast(BotEventType::StampCreated, &payload, bots)
        .await;
    Ok(())
}
