// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HatoError;
use crate::types::Tag;

/// Read access to user tags.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Return the tag with the given id, or `None`.
    async fn tag(&self, id: Uuid) -> Result<Option<Tag>, HatoError>;
}
