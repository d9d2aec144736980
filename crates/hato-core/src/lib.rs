// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hato bot event dispatch service.
//!
//! This crate provides the foundational types, trait definitions, and error
//! type used throughout the Hato workspace: the closed bot event type
//! enumeration, domain read models, the event log record, and the store and
//! streamer traits the dispatch core consumes.

pub mod error;
pub mod event;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HatoError;
pub use event::{BotEventType, EventTypeSet};
pub use types::{
    Bot, BotEventLog, BotMode, BotState, Channel, EmbeddedInfo, EventLogResult, Message,
    MessageStamp, ParseResult, Stamp, Tag, User,
};

// Re-export the consumed-interface traits at crate root.
pub use traits::{
    BotStore, BotsQuery, ChannelStore, EventLogStore, EventStreamer, StreamerWrite, TagStore,
    UserStore,
};
