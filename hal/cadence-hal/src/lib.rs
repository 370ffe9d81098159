//! Cadence Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The cycle logic in `cadence-core` only ever talks
//! to these traits, so it runs unchanged on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cadence-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ cadence-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`clock::MonotonicClock`] - Millisecond uptime source
//! - [`pwm::PwmTiming`] - Divider/TOP calculation for a PWM slice

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod pwm;

// Re-export key items at crate root for convenience
pub use clock::{elapsed_since, MonotonicClock};
pub use pwm::{PwmTiming, PwmTimingError};
