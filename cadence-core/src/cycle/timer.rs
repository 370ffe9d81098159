//! Cycle timer
//!
//! Holds the two pieces of cycle state, the phase reference time and the
//! current [`State`], and decides when a transition is due.
//!
//! Elapsed time is computed with wrapping arithmetic on a `u32` millisecond
//! counter, so the cycle keeps its timing when the counter rolls over.

use cadence_hal::elapsed_since;

use crate::config::CycleConfig;
use crate::state::{Event, State};

/// Status text emitted when the servo is activated
pub const ACTIVATED_MESSAGE: &str = "Timer elapsed! Servo activated.";

/// Status text emitted when the servo returns to rest
pub const RESTED_MESSAGE: &str = "Servo returned to rest position.";

/// A transition reported by [`CycleTimer::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Event that fired
    pub event: Event,
    /// State before the transition
    pub from: State,
    /// State after the transition
    pub to: State,
    /// Clock reading at which the transition was taken
    pub at_ms: u32,
    /// Time since cycle start when the transition was taken
    pub elapsed_ms: u32,
}

impl Transition {
    /// Angle the servo must be commanded to
    pub fn angle(&self, config: &CycleConfig) -> u8 {
        self.to.target_angle(config)
    }

    /// Operator status line for this transition
    pub fn message(&self) -> &'static str {
        match self.event {
            Event::DelayElapsed => ACTIVATED_MESSAGE,
            Event::HoldElapsed => RESTED_MESSAGE,
        }
    }
}

/// Timing state for the actuator cycle
#[derive(Debug, Clone)]
pub struct CycleTimer {
    config: CycleConfig,
    /// Clock reading at the start of the current cycle
    start_ms: u32,
    state: State,
}

impl CycleTimer {
    /// Create a timer whose first cycle starts at `now_ms`
    pub fn new(config: CycleConfig, now_ms: u32) -> Self {
        Self {
            config,
            start_ms: now_ms,
            state: State::Resting,
        }
    }

    /// Return to `Resting` with a new cycle starting at `now_ms`
    pub fn restart(&mut self, now_ms: u32) {
        self.start_ms = now_ms;
        self.state = State::Resting;
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// True while the servo is commanded to the activated angle
    pub fn is_moved(&self) -> bool {
        self.state.is_moved()
    }

    /// Clock reading at the start of the current cycle
    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    /// Get the configuration
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Time since the current cycle started
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        elapsed_since(self.start_ms, now_ms)
    }

    /// Event due at `now_ms`, if any, without taking it
    pub fn due_event(&self, now_ms: u32) -> Option<Event> {
        let event = self.state.pending_event();
        (self.elapsed_ms(now_ms) >= self.deadline_ms(event)).then_some(event)
    }

    /// Time into the cycle at which `event` fires
    pub fn deadline_ms(&self, event: Event) -> u32 {
        match event {
            Event::DelayElapsed => self.config.delay_ms,
            Event::HoldElapsed => self.config.return_ms(),
        }
    }

    /// Check the clock and take at most one transition
    ///
    /// Returning to rest restarts the cycle at `now_ms`, so any lateness of
    /// the poll is absorbed into the next cycle rather than accumulated.
    pub fn poll(&mut self, now_ms: u32) -> Option<Transition> {
        let event = self.due_event(now_ms)?;
        let elapsed_ms = self.elapsed_ms(now_ms);

        let from = self.state;
        self.state = from.transition(event);

        if event.restarts_cycle() {
            self.start_ms = now_ms;
        }

        Some(Transition {
            event,
            from,
            to: self.state,
            at_ms: now_ms,
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timer_at(now_ms: u32) -> CycleTimer {
        CycleTimer::new(CycleConfig::default(), now_ms)
    }

    #[test]
    fn test_resting_before_delay() {
        let mut timer = timer_at(0);
        for t in [0, 1, 5_000, 9_999] {
            assert_eq!(timer.poll(t), None);
            assert!(!timer.is_moved());
        }
    }

    #[test]
    fn test_activates_at_delay() {
        let mut timer = timer_at(0);
        let t = timer.poll(10_000).unwrap();
        assert_eq!(t.event, Event::DelayElapsed);
        assert_eq!(t.from, State::Resting);
        assert_eq!(t.to, State::Activated);
        assert_eq!(t.angle(timer.config()), 90);
        assert_eq!(t.message(), ACTIVATED_MESSAGE);
        assert!(timer.is_moved());

        // Activation does not restart the cycle
        assert_eq!(timer.start_ms(), 0);
    }

    #[test]
    fn test_activated_until_return() {
        let mut timer = timer_at(0);
        timer.poll(10_000);
        for t in [10_001, 12_000, 14_999] {
            assert_eq!(timer.poll(t), None);
            assert!(timer.is_moved());
        }
    }

    #[test]
    fn test_returns_and_restarts_at_fifteen_seconds() {
        let mut timer = timer_at(0);
        timer.poll(10_000);

        let t = timer.poll(15_000).unwrap();
        assert_eq!(t.event, Event::HoldElapsed);
        assert_eq!(t.to, State::Resting);
        assert_eq!(t.angle(timer.config()), 0);
        assert_eq!(t.message(), RESTED_MESSAGE);
        assert!(!timer.is_moved());
        assert_eq!(timer.start_ms(), 15_000);
        assert_eq!(timer.elapsed_ms(15_000), 0);
    }

    #[test]
    fn test_reference_scenario() {
        let mut timer = timer_at(0);

        assert_eq!(timer.poll(0), None);
        assert_eq!(timer.state(), State::Resting);

        let activated = timer.poll(10_001).unwrap();
        assert_eq!(activated.elapsed_ms, 10_001);
        assert_eq!(timer.poll(10_001), None);

        let rested = timer.poll(15_002).unwrap();
        assert_eq!(rested.event, Event::HoldElapsed);
        assert_eq!(timer.poll(15_002), None);
        assert_eq!(timer.start_ms(), 15_002);

        // Next activation is measured from the restart
        assert_eq!(timer.poll(25_001), None);
        assert!(timer.poll(25_002).is_some());
    }

    #[test]
    fn test_one_transition_per_poll_after_stall() {
        let mut timer = timer_at(0);

        // Far past both thresholds: only the activation is taken
        let first = timer.poll(40_000).unwrap();
        assert_eq!(first.event, Event::DelayElapsed);
        assert!(timer.is_moved());

        let second = timer.poll(40_001).unwrap();
        assert_eq!(second.event, Event::HoldElapsed);
        assert_eq!(timer.start_ms(), 40_001);
    }

    #[test]
    fn test_timing_across_clock_wrap() {
        let start = u32::MAX - 4_000;
        let mut timer = timer_at(start);

        assert_eq!(timer.poll(start.wrapping_add(9_999)), None);
        let t = timer.poll(start.wrapping_add(10_000)).unwrap();
        assert_eq!(t.event, Event::DelayElapsed);
        assert_eq!(t.at_ms, 5_999);

        assert_eq!(timer.poll(start.wrapping_add(14_999)), None);
        assert!(timer.poll(start.wrapping_add(15_000)).is_some());
        assert_eq!(timer.start_ms(), 10_999);
    }

    #[test]
    fn test_due_event_follows_state() {
        let mut timer = timer_at(0);
        assert_eq!(timer.deadline_ms(Event::DelayElapsed), 10_000);
        assert_eq!(timer.deadline_ms(Event::HoldElapsed), 15_000);

        assert_eq!(timer.due_event(9_999), None);
        assert_eq!(timer.due_event(10_000), Some(Event::DelayElapsed));
        // Peeking does not take the transition
        assert!(!timer.is_moved());

        timer.poll(10_000);
        assert_eq!(timer.due_event(14_999), None);
        assert_eq!(timer.due_event(15_000), Some(Event::HoldElapsed));
    }

    #[test]
    fn test_restart() {
        let mut timer = timer_at(0);
        timer.poll(10_000);
        timer.restart(12_000);
        assert_eq!(timer.state(), State::Resting);
        assert_eq!(timer.poll(21_999), None);
        assert!(timer.poll(22_000).is_some());
    }

    #[test]
    fn test_custom_timing() {
        let config = CycleConfig {
            delay_ms: 100,
            hold_ms: 50,
            rest_angle: 10,
            active_angle: 170,
            poll_interval_ms: 1,
        };
        let mut timer = CycleTimer::new(config, 1_000);

        let up = timer.poll(1_100).unwrap();
        assert_eq!(up.angle(&config), 170);
        let down = timer.poll(1_150).unwrap();
        assert_eq!(down.angle(&config), 10);
    }

    proptest! {
        /// After any poll the state agrees with the time since cycle start,
        /// wherever the clock started and however often it is polled
        #[test]
        fn prop_state_matches_elapsed(start in any::<u32>(), step in 1u32..500) {
            let config = CycleConfig::default();
            let mut timer = CycleTimer::new(config, start);
            let mut activations = 0u32;
            let mut last_activation: Option<u32> = None;

            let mut offset = 0u32;
            while offset < 50_000 {
                let now = start.wrapping_add(offset);
                if let Some(t) = timer.poll(now) {
                    if t.event == Event::DelayElapsed {
                        if let Some(prev) = last_activation {
                            // Period is 15s, plus at most one poll of lateness
                            let period = now.wrapping_sub(prev);
                            prop_assert!(period >= config.return_ms());
                            prop_assert!(period < config.return_ms() + 2 * step);
                        }
                        last_activation = Some(now);
                        activations += 1;
                    }
                }

                let elapsed = timer.elapsed_ms(now);
                if timer.is_moved() {
                    prop_assert!(elapsed >= config.delay_ms);
                    prop_assert!(elapsed < config.return_ms());
                } else {
                    prop_assert!(elapsed < config.delay_ms);
                }

                offset += step;
            }

            // 50s covers at least three activations (10s, ~25s, ~40s)
            prop_assert!(activations >= 3);
        }
    }
}
