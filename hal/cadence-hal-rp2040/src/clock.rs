//! Embassy-backed monotonic clock

use embassy_time::Instant;

use cadence_hal::MonotonicClock;

/// Milliseconds since construction, read from the embassy time driver
///
/// Create it as early as possible during boot; readings are relative to
/// that moment, which stands in for process start.
#[derive(Debug, Clone, Copy)]
pub struct EmbassyClock {
    start: Instant,
}

impl EmbassyClock {
    /// Start a clock at the current instant
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for EmbassyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation is intended: consumers compare with wrapping arithmetic
        self.start.elapsed().as_millis() as u32
    }
}
