// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User store trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HatoError;
use crate::types::User;

/// Read access to users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return the user with the given id, or `None`.
    async fn user(&self, id: Uuid) -> Result<Option<User>, HatoError>;
}
