// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-topic event handlers.
//!
//! A handler does three things and nothing else: resolve targets, build a
//! payload, hand it to the dispatcher. Handlers recover every operational
//! error locally -- the ingress loop never sees them fail except to log.
//! The ping handler is the single exception allowed to mutate bot state.

pub mod bot_channel;
pub mod channel;
pub mod message_created;
pub mod message_deleted;
pub mod message_stamps_updated;
pub mod message_updated;
pub mod ping;
pub mod stamp;
pub mod tag;
pub mod user;
pub mod user_group;
