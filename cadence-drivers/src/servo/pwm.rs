//! PWM servo driver
//!
//! A hobby servo reads the width of a pulse repeated at a fixed frame rate:
//! `min_pulse_us` is 0 degrees, `max_pulse_us` is the full travel, and the
//! angle is linear in between. Typical values are 500-2500 µs at 50 Hz.
//!
//! The driver works with any `embedded_hal::pwm::SetDutyCycle` channel that
//! has already been configured for the servo frame rate.
//!
//! ```ignore
//! let mut servo = PwmServo::new(pwm_channel, ServoConfig::default());
//! servo.set_angle(90)?; // 1.5ms pulse
//! ```

use embedded_hal::pwm::SetDutyCycle;

use cadence_core::config::ServoConfig;
use cadence_core::traits::{ServoDriver, ServoError};

/// Servo driven by a PWM channel
pub struct PwmServo<P> {
    pwm: P,
    config: ServoConfig,
    /// Last commanded angle, `None` until commanded or after release
    angle: Option<u8>,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Wrap a PWM channel configured for `config.frequency_hz`
    ///
    /// The output is left as-is until the first command.
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            angle: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Pulse width for `degrees`, clamped to the servo travel
    pub fn pulse_width_us(&self, degrees: u8) -> u32 {
        let max_angle = self.config.max_angle.max(1) as u32;
        let degrees = (degrees as u32).min(max_angle);
        let range = self
            .config
            .max_pulse_us
            .saturating_sub(self.config.min_pulse_us);
        self.config.min_pulse_us + range * degrees / max_angle
    }

    /// Duty cycle value producing the pulse for `degrees`
    pub fn duty_for_angle(&self, degrees: u8) -> u16 {
        let max_duty = self.pwm.max_duty_cycle() as u64;
        let period_us = self.config.period_us().max(1) as u64;
        let duty = self.pulse_width_us(degrees) as u64 * max_duty / period_us;
        duty.min(max_duty) as u16
    }

    /// Stop sending pulses so the servo no longer holds position
    pub fn release(&mut self) -> Result<(), ServoError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ServoError::Pwm)?;
        self.angle = None;
        Ok(())
    }

    /// Consume the driver and return the PWM channel
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> ServoDriver for PwmServo<P> {
    fn set_angle(&mut self, degrees: u8) -> Result<(), ServoError> {
        if degrees > self.config.max_angle {
            return Err(ServoError::InvalidAngle);
        }

        let duty = self.duty_for_angle(degrees);
        self.pwm.set_duty_cycle(duty).map_err(|_| ServoError::Pwm)?;
        self.angle = Some(degrees);
        Ok(())
    }

    fn angle(&self) -> Option<u8> {
        self.angle
    }

    fn max_angle(&self) -> u8 {
        self.config.max_angle
    }
}
