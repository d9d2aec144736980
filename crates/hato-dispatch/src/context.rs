// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared handler context.
//!
//! Everything a handler may touch: the target resolver, the read-only
//! platform stores, the dispatcher, and -- for the ping handler alone --
//! the bot store's state mutation.

use std::sync::Arc;

use hato_core::traits::bot_store::BotStore;
use hato_core::traits::channel_store::ChannelStore;
use hato_core::traits::tag_store::TagStore;
use hato_core::traits::user_store::UserStore;

use crate::dispatcher::Dispatcher;
use crate::resolver::TargetResolver;

/// Dependencies handed to every handler invocation.
pub struct DispatchContext {
    pub resolver: TargetResolver,
    pub bots: Arc<dyn BotStore>,
    pub channels: Arc<dyn ChannelStore>,
    pub users: Arc<dyn UserStore>,
    pub tags: Arc<dyn TagStore>,
    pub dispatcher: Arc<Dispatcher>,
}

impl DispatchContext {
    pub fn new(
        bots: Arc<dyn BotStore>,
        channels: Arc<dyn ChannelStore>,
        users: Arc<dyn UserStore>,
        tags: Arc<dyn TagStore>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            resolver: TargetResolver::new(bots.clone()),
            bots,
            channels,
            users,
            tags,
            dispatcher,
        }
    }
}
