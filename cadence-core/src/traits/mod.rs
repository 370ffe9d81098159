//! Hardware abstraction traits
//!
//! These traits define the interface between the cycle logic
//! and hardware-specific implementations.

pub mod servo;
pub mod status;

pub use servo::{ServoDriver, ServoError};
pub use status::StatusSink;
