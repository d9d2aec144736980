// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the external collaborators this service consumes.
//!
//! The dispatch core never owns these backends; it reads bots, channels,
//! users, and tags through them and writes only the bot event log.

pub mod bot_store;
pub mod channel_store;
pub mod event_log_store;
pub mod streamer;
pub mod tag_store;
pub mod user_store;

pub use bot_store::{BotStore, BotsQuery};
pub use channel_store::ChannelStore;
pub use event_log_store::EventLogStore;
pub use streamer::{EventStreamer, StreamerWrite};
pub use tag_store::TagStore;
pub use user_store::UserStore;
