//! Actuator cycle
//!
//! The cycle runs forever:
//!
//! ```text
//!   t=0            t=delay              t=delay+hold
//!    │   Resting     │     Activated        │
//!    ├───────────────┼──────────────────────┤──► t=0 again
//!   rest angle    active angle          rest angle
//! ```
//!
//! [`CycleTimer`] is the pure timing half: it is fed clock readings and
//! reports transitions. [`CycleController`] owns the servo, the clock and the
//! status output and applies those transitions to the hardware.

pub mod controller;
pub mod timer;

pub use controller::CycleController;
pub use timer::{CycleTimer, Transition};
