//! Events that trigger state transitions

/// Events that can trigger state transitions
///
/// Both events are raised by the cycle timer; nothing else drives the
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Activation delay has passed since cycle start
    DelayElapsed,
    /// Activation delay plus hold time has passed since cycle start
    HoldElapsed,
}

impl Event {
    /// Check if this event ends a cycle and restarts the timer
    pub fn restarts_cycle(&self) -> bool {
        matches!(self, Event::HoldElapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restarts_cycle() {
        assert!(Event::HoldElapsed.restarts_cycle());
        assert!(!Event::DelayElapsed.restarts_cycle());
    }
}
