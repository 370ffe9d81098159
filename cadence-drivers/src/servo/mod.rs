//! Servo driver implementations
//!
//! - PWM servos: angle mapped linearly onto a pulse width range

pub mod pwm;

pub use pwm::PwmServo;
