//! Configuration types
//!
//! Board-agnostic configuration structures and the parser for the
//! `machine.toml` subset the firmware embeds.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
