//! PWM slice timing
//!
//! Computes the clock divider and counter wrap value (TOP) needed to run a
//! 16-bit PWM counter at a requested frequency. The divider is fractional in
//! 1/16 steps (integer part 1-255), which is the layout used by the RP2040
//! and similar slice-based PWM blocks.
//!
//! ```text
//! f_pwm = f_sys / (divider * (TOP + 1))
//! ```
//!
//! The divider is kept as small as possible so TOP, and therefore duty
//! resolution, is as large as possible.

/// Smallest divider, 1.0 in 1/16 units
const DIVIDER_X16_MIN: u32 = 16;

/// Largest divider, 255 + 15/16 in 1/16 units
const DIVIDER_X16_MAX: u32 = 4095;

/// Counter steps per period below which duty resolution is unusable
pub const MIN_PERIOD_COUNTS: u32 = 100;

/// Errors from PWM timing calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmTimingError {
    /// Requested frequency was 0 Hz
    ZeroFrequency,
    /// Requested frequency needs a divider above the hardware maximum
    FrequencyTooLow,
    /// Requested frequency leaves fewer than [`MIN_PERIOD_COUNTS`] steps
    FrequencyTooHigh,
}

/// Divider and TOP for one PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Clock divider in 1/16 units (16 = divide by 1.0)
    pub divider_x16: u16,
    /// Counter wrap value; the period is TOP + 1 counts
    pub top: u16,
    /// System clock the timing was computed for
    pub sys_clock_hz: u32,
}

impl PwmTiming {
    /// Compute the timing for `frequency_hz` from a `sys_clock_hz` source
    pub fn for_frequency(sys_clock_hz: u32, frequency_hz: u32) -> Result<Self, PwmTimingError> {
        if frequency_hz == 0 {
            return Err(PwmTimingError::ZeroFrequency);
        }

        // Counts per period at divider 1.0, scaled by 16 for the fractional divider
        let counts_x16 = sys_clock_hz as u64 * 16 / frequency_hz as u64;

        let divider_x16 = counts_x16.div_ceil(1 << 16).max(DIVIDER_X16_MIN as u64);
        if divider_x16 > DIVIDER_X16_MAX as u64 {
            return Err(PwmTimingError::FrequencyTooLow);
        }

        let period_counts = counts_x16 / divider_x16;
        if period_counts < MIN_PERIOD_COUNTS as u64 {
            return Err(PwmTimingError::FrequencyTooHigh);
        }

        Ok(Self {
            divider_x16: divider_x16 as u16,
            top: (period_counts - 1) as u16,
            sys_clock_hz,
        })
    }

    /// Integer part of the divider
    pub fn divider_int(&self) -> u8 {
        (self.divider_x16 >> 4) as u8
    }

    /// Fractional part of the divider in 1/16 steps
    pub fn divider_frac(&self) -> u8 {
        (self.divider_x16 & 0x0F) as u8
    }

    /// Counter steps per PWM period
    pub fn period_counts(&self) -> u32 {
        self.top as u32 + 1
    }

    /// Output frequency actually produced, in millihertz
    pub fn actual_frequency_mhz(&self) -> u32 {
        let denom = self.divider_x16 as u64 * self.period_counts() as u64;
        (self.sys_clock_hz as u64 * 16 * 1000 / denom) as u32
    }

    /// Output frequency actually produced, rounded down to whole hertz
    pub fn actual_frequency_hz(&self) -> u32 {
        self.actual_frequency_mhz() / 1000
    }

    /// PWM period in microseconds
    pub fn period_us(&self) -> u32 {
        let ticks_x16 = self.divider_x16 as u64 * self.period_counts() as u64;
        (ticks_x16 * 1_000_000 / (self.sys_clock_hz as u64 * 16)) as u32
    }
}
