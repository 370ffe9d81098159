//! Cycle controller
//!
//! Couples the [`CycleTimer`] to the hardware: reads the clock, commands the
//! servo and emits a status line on each transition.
//!
//! # Usage
//!
//! ```ignore
//! let mut controller = CycleController::new(config, servo, clock, sink);
//! controller.start()?; // servo to rest, cycle starts now
//!
//! loop {
//!     controller.poll()?;
//!     ticker.next().await;
//! }
//! ```

use cadence_hal::MonotonicClock;

use super::timer::{CycleTimer, Transition};
use crate::config::CycleConfig;
use crate::state::State;
use crate::traits::{ServoDriver, ServoError, StatusSink};

/// Drives one servo through the timed cycle
pub struct CycleController<S, C, N> {
    config: CycleConfig,
    timer: CycleTimer,
    servo: S,
    clock: C,
    sink: N,
}

impl<S, C, N> CycleController<S, C, N>
where
    S: ServoDriver,
    C: MonotonicClock,
    N: StatusSink,
{
    /// Create a controller; the servo is not touched until [`start`](Self::start)
    pub fn new(config: CycleConfig, servo: S, clock: C, sink: N) -> Self {
        let timer = CycleTimer::new(config, clock.now_ms());
        Self {
            config,
            timer,
            servo,
            clock,
            sink,
        }
    }

    /// Command the rest angle and start the first cycle now
    pub fn start(&mut self) -> Result<(), ServoError> {
        self.timer.restart(self.clock.now_ms());
        self.servo.set_angle(self.config.rest_angle)
    }

    /// Periodic check; call as often as the host loop allows
    ///
    /// Takes at most one transition. On a transition the servo is commanded
    /// and the status line is emitted. The cycle state and the status line
    /// do not depend on the servo accepting the command, as there is no
    /// position feedback; a rejected command is returned as the error.
    pub fn poll(&mut self) -> Result<Option<Transition>, ServoError> {
        let now_ms = self.clock.now_ms();
        let Some(transition) = self.timer.poll(now_ms) else {
            return Ok(None);
        };

        let commanded = self.servo.set_angle(transition.angle(&self.config));
        self.sink.notify(transition.message());

        commanded.map(|()| Some(transition))
    }

    /// Current cycle state
    pub fn state(&self) -> State {
        self.timer.state()
    }

    /// True while the servo is commanded to the activated angle
    pub fn is_moved(&self) -> bool {
        self.timer.is_moved()
    }

    /// Get the cycle timer
    pub fn timer(&self) -> &CycleTimer {
        &self.timer
    }

    /// Get the servo driver
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// Get the configuration
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Time since the current cycle started
    pub fn elapsed_ms(&self) -> u32 {
        self.clock.elapsed_ms(self.timer.start_ms())
    }

    /// Consume the controller and return the servo, clock and sink
    pub fn into_parts(self) -> (S, C, N) {
        (self.servo, self.clock, self.sink)
    }
}
