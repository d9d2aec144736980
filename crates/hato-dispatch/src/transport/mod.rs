// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery transports.
//!
//! One [`Transport`] implementation per bot mode. A transport performs
//! exactly one attempt per call -- retries are an explicit non-goal -- and
//! records exactly one event log row for it.

pub mod http;
pub mod ws;

use async_trait::async_trait;
use bytes::Bytes;

use hato_core::event::BotEventType;
use hato_core::types::Bot;

pub use http::HttpTransport;
pub use ws::WsTransport;

/// One delivery attempt to one bot.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the serialized payload. Returns whether the attempt succeeded
    /// (`ok` outcome). The attempt's event log record is written before
    /// this returns.
    async fn send(&self, bot: &Bot, event: BotEventType, body: Bytes) -> bool;
}
