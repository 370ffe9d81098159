//! PWM slice setup for servo outputs
//!
//! Converts a board-agnostic [`PwmTiming`] into an embassy-rp PWM config and
//! hands back the channel as a `PwmOutput`, which implements
//! `embedded_hal::pwm::SetDutyCycle` for the servo driver.

use embassy_rp::pwm::{ChannelAPin, Config, Pwm, PwmOutput, Slice};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;

use cadence_hal::PwmTiming;

/// Errors setting up a servo PWM output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoPwmError {
    /// The slice did not yield the requested channel
    ChannelUnavailable,
}

/// Build a PWM config for the given timing with the output held low
pub fn servo_pwm_config(timing: &PwmTiming) -> Config {
    let mut config = Config::default();
    config.divider = FixedU16::<U4>::from_bits(timing.divider_x16);
    config.top = timing.top;
    config.compare_a = 0;
    config.compare_b = 0;
    config.phase_correct = false;
    config
}

/// Configure channel A of `slice` on `pin` for servo output
pub fn servo_output_a<'d, T: Slice>(
    slice: Peri<'d, T>,
    pin: Peri<'d, impl ChannelAPin<T>>,
    timing: &PwmTiming,
) -> Result<PwmOutput<'d>, ServoPwmError> {
    let pwm = Pwm::new_output_a(slice, pin, servo_pwm_config(timing));
    let (output_a, _) = pwm.split();
    output_a.ok_or(ServoPwmError::ChannelUnavailable)
}
