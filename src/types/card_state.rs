//! Card activation state machine
//!
//! Two states, two transitions:
//!
//! ```text
//!            disable
//!   Active ----------> Disabled
//!      ^                  |
//!      +------------------+
//!            activate
//! ```
//!
//! Firing a transition that would not change the state is rejected
//! (`AlreadyActive` / `AlreadyDisabled`) and leaves the state untouched.
//! The machine has no locking of its own; the owning card serializes access.

use super::error::BankError;
use super::ids::CardId;
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, info};

/// Activation state of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    #[default]
    Active,
    Disabled,
}

impl CardState {
    pub fn is_active(self) -> bool {
        matches!(self, CardState::Active)
    }

    pub fn label(self) -> &'static str {
        match self {
            CardState::Active => "active",
            CardState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transitions accepted by [`CardStateMachine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTransition {
    Activate,
    Disable,
}

impl CardTransition {
    /// State reached by firing this transition
    pub fn target(self) -> CardState {
        match self {
            CardTransition::Activate => CardState::Active,
            CardTransition::Disable => CardState::Disabled,
        }
    }
}

/// Per-card state machine, starting in [`CardState::Active`]
#[derive(Debug, Clone)]
pub struct CardStateMachine {
    card: CardId,
    state: CardState,
}

impl CardStateMachine {
    pub fn new(card: CardId) -> Self {
        Self {
            card,
            state: CardState::Active,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Move a disabled card back to `Active`
    pub fn activate(&mut self) -> Result<CardState, BankError> {
        self.fire(CardTransition::Activate)
    }

    /// Move an active card to `Disabled`
    pub fn disable(&mut self) -> Result<CardState, BankError> {
        self.fire(CardTransition::Disable)
    }

    /// Apply a transition, returning the new state
    ///
    /// # Errors
    ///
    /// `AlreadyActive` or `AlreadyDisabled` when the card is already in the
    /// target state.
    pub fn fire(&mut self, transition: CardTransition) -> Result<CardState, BankError> {
        let target = transition.target();
        if self.state == target {
            let err = match target {
                CardState::Active => BankError::already_active(self.card),
                CardState::Disabled => BankError::already_disabled(self.card),
            };
            error!(entity = %self.card, "{err}");
            return Err(err);
        }

        debug!(entity = %self.card, ?transition, "Going to change state");
        self.state = target;
        info!(entity = %self.card, "{} has changed state to {}", self.card, target);
        Ok(target)
    }
}
