// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Hato workspace.
//!
//! In-memory implementations of the store traits, a mock streamer, and
//! fixture builders. Everything here is deterministic and synchronous
//! under the hood so tests read as plain assertions.

pub mod builders;
pub mod stores;
pub mod streamer;

pub use builders::{bot, channel, message, parsed, stamp, tag, user};
pub use stores::{
    InMemoryBotStore, InMemoryChannelStore, InMemoryEventLogStore, InMemoryTagStore,
    InMemoryUserStore,
};
pub use streamer::{MockStreamer, WrittenFrame};
