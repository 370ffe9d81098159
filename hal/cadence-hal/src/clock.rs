//! Monotonic clock abstraction
//!
//! The clock reports milliseconds since the process started as a `u32`.
//! That counter wraps after roughly 49.7 days; every comparison against it
//! must go through [`elapsed_since`] so the wrap is transparent.

/// Millisecond uptime source
pub trait MonotonicClock {
    /// Milliseconds elapsed since the clock was started
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `start_ms`, tolerant of counter wrap
    fn elapsed_ms(&self, start_ms: u32) -> u32 {
        elapsed_since(start_ms, self.now_ms())
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Time between two readings of a wrapping millisecond counter
///
/// Correct as long as the true interval is shorter than one full wrap.
#[inline]
pub const fn elapsed_since(start_ms: u32, now_ms: u32) -> u32 {
    now_ms.wrapping_sub(start_ms)
}
