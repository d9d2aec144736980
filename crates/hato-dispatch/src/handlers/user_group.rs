// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The eight `user_group.*` topics: global broadcasts carrying ids.

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
    let (event_type, group_id, user_id): (BotEventType, Uuid, Option<Uuid>) = match event {
        SystemEvent::UserGroupCreated { group_id } => {
            (BotEventType::UserGroupCreated, group_id, None)
        }
        SystemEvent::UserGroupUpdated { group_id } => {
            (BotEventType::UserGroupUpdated, group_id, None)
        }
        SystemEvent::UserGroupDeleted { group_id } => {
            (BotEventType::UserGroupDeleted, group_id, None)
        }
        SystemEvent::UserGroupMemberAdded { group_id, user_id } => {
            (BotEventType::UserGroupMemberAdded, group_id, Some(user_id))
        }
        SystemEvent::UserGroupMemberUpdated { group_id, user_id } => {
            (BotEventType::UserGroupMemberUpdated, group_id, Some(user_id))
        }
        SystemEvent::UserGroupMemberRemoved { group_id, user_id } => {
            (BotEventType::UserGroupMemberRemoved, group_id, Some(user_id))
        }
        SystemEvent::UserGroupAdminAdded { group_id, user_id } => {
            (BotEventType::UserGroupAdminAdded, group_id, Some(user_id))
        }
        SystemEvent::UserGroupAdminRemoved { group_id, user_id } => {
            (BotEventType::UserGroupAdminRemoved, group_id, Some(user_id))
        }
        other => {
            warn!(topic = other.topic(), "group handler received mismatched bus event");
            return Ok(());
        }
    };

    let bots = ctx.resolver.bots_subscribing(event_type).await?;
    if bots.is_empty() {
        return Ok(());
    }

    match user_id {
        Some(user_id) => {
            let payload = payload::make_group_member_event(datetime, group_id, user_id);
            ctx.dispatcher.multicast(event_type, &payload, bots).await;
        }
        None => {
            let payload = payload::make_group_event(datetime, group_id);
            ctx.dispatcher.multicast(event_type, &payload, bots).await;
        }
    }
    Ok(())
}
