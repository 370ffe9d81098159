//! Board-agnostic core logic for the servo cycle firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo, status output)
//! - Two-state machine for the actuator cycle
//! - Cycle timer and controller
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod state;
pub mod traits;
