//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cadence-core:
//!
//! - Servo drivers (PWM pulse-width positioning)

#![no_std]
#![deny(unsafe_code)]

pub mod servo;
