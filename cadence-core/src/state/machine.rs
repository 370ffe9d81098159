//! State machine definition
//!
//! The commanded servo position is a function of the current state alone.

use super::events::Event;
use crate::config::CycleConfig;

/// Cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Servo commanded to the rest angle, waiting for the activation delay
    #[default]
    Resting,
    /// Servo commanded to the activated angle, waiting for the hold time
    Activated,
}

impl State {
    /// Check if the servo is (commanded to be) in the activated position
    pub fn is_moved(&self) -> bool {
        matches!(self, State::Activated)
    }

    /// Angle the servo is commanded to while in this state
    pub fn target_angle(&self, config: &CycleConfig) -> u8 {
        match self {
            State::Resting => config.rest_angle,
            State::Activated => config.active_angle,
        }
    }

    /// Event that would move the machine out of this state
    pub fn pending_event(&self) -> Event {
        match self {
            State::Resting => Event::DelayElapsed,
            State::Activated => Event::HoldElapsed,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Resting, DelayElapsed) => Activated,
            (Activated, HoldElapsed) => Resting,

            // Default: stay in current state
            _ => self,
        }
    }
}
