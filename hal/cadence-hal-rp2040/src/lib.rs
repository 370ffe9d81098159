//! RP2040-specific HAL for the servo cycle firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `cadence-hal` traits:
//!
//! - Millisecond clock backed by the embassy time driver
//! - PWM slice setup for a servo output

#![no_std]

pub mod clock;
pub mod pwm;

// Re-export shared traits from cadence-hal for convenience
pub use cadence_hal::{MonotonicClock, PwmTiming};
pub use clock::EmbassyClock;
pub use pwm::{servo_output_a, servo_pwm_config, ServoPwmError};
