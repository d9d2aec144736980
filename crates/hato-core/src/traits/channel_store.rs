// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HatoError;
use crate::types::Channel;

/// Read access to channels.
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Return the channel with the given id, or `None`.
    async fn channel(&self, id: Uuid) -> Result<Option<Channel>, HatoError>;

    /// Return the full slash-separated path of the channel, without the
    /// leading `#`, or `None` for an unknown channel.
    async fn channel_path(&self, id: Uuid) -> Result<Option<String>, HatoError>;

    /// Return the member user ids of a DM channel.
    async fn dm_members(&self, id: Uuid) -> Result<Vec<Uuid>, HatoError>;
}
