// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bot activation state machine.
//!
//! Ping outcomes are the only event-driven transitions; everything else is
//! administrative. `Disabled` is terminal for the event side: no ping
//! outcome leaves it.

use hato_core::types::BotState;

/// Administrative commands issued by the management layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    /// Re-enable a disabled bot. It comes back paused and must answer a
    /// ping before it is active again.
    Enable,
    /// Disable a bot until explicitly re-enabled.
    Disable,
}

/// The state a bot moves to after a ping attempt, or `None` when the
/// current state does not respond to pings.
pub fn next_state_after_ping(current: BotState, delivered: bool) -> Option<BotState> {
    match current {
        BotState::Disabled => None,
        BotState::Active | BotState::Paused => Some(if delivered {
            BotState::Active
        } else {
            BotState::Paused
        }),
    }
}

/// Apply an administrative command.
pub fn administer(current: BotState, command: AdminCommand) -> BotState {
    match command {
        AdminCommand::Disable => BotState::Disabled,
        AdminCommand::Enable => match current {
            BotState::Disabled => BotState::Paused,
            other => other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_ping_activates_paused_bots() {
        assert_eq!(
            next_state_after_ping(BotState::Paused, true),
            Some(BotState::Active)
        );
        assert_eq!(
            next_state_after_ping(BotState::Active, true),
            Some(BotState::Active)
        );
    }

    #[test]
    fn failed_ping_pauses() {
        assert_eq!(
            next_state_after_ping(BotState::Active, false),
            Some(BotState::Paused)
        );
        assert_eq!(
            next_state_after_ping(BotState::Paused, false),
            Some(BotState::Paused)
        );
    }

    #[test]
    fn disabled_is_sticky_for_pings() {
        assert_eq!(next_state_after_ping(BotState::Disabled, true), None);
        assert_eq!(next_state_after_ping(BotState::Disabled, false), None);
    }

    #[test]
    fn enable_returns_a_disabled_bot_to_paused() {
        assert_eq!(
            administer(BotState::Disabled, AdminCommand::Enable),
            BotState::Paused
        );
        assert_eq!(
            administer(BotState::Active, AdminCommand::Enable),
            BotState::Active
        );
    }

    #[test]
    fn disable_wins_from_any_state() {
        for state in [BotState::Active, BotState::Paused, BotState::Disabled] {
            assert_eq!(administer(state, AdminCommand::Disable), BotState::Disabled);
        }
    }
}
