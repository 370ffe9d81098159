//! Configuration loading
//!
//! The machine configuration is the `machine.toml` embedded at build time,
//! parsed with the no_std parser from cadence-core.

pub mod loader;

pub use loader::load_config;
