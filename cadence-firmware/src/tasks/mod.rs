//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod cycle;
pub mod status_tx;

pub use cycle::cycle_task;
pub use status_tx::status_tx_task;
