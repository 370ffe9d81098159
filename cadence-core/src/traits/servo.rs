//! Servo driver trait
//!
//! A positional servo takes an angle command and gives no feedback. The
//! driver only knows what it was last told, never where the horn really is.

use crate::config::SERVO_MAX_ANGLE;

/// Errors that can occur when commanding a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// Angle beyond the servo's travel
    InvalidAngle,
    /// PWM peripheral rejected the duty cycle
    Pwm,
}

/// Trait for angle-commanded servos
pub trait ServoDriver {
    /// Command the servo to `degrees`
    ///
    /// Returns [`ServoError::InvalidAngle`] without touching the output if
    /// `degrees` exceeds [`max_angle`](ServoDriver::max_angle).
    fn set_angle(&mut self, degrees: u8) -> Result<(), ServoError>;

    /// Last successfully commanded angle, if any
    fn angle(&self) -> Option<u8>;

    /// Mechanical travel in degrees
    fn max_angle(&self) -> u8 {
        SERVO_MAX_ANGLE
    }
}

impl<T: ServoDriver + ?Sized> ServoDriver for &mut T {
    fn set_angle(&mut self, degrees: u8) -> Result<(), ServoError> {
        (**self).set_angle(degrees)
    }

    fn angle(&self) -> Option<u8> {
        (**self).angle()
    }

    fn max_angle(&self) -> u8 {
        (**self).max_angle()
    }
}
