//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

/// Longest status line, in bytes, before truncation
pub const STATUS_LINE_LEN: usize = 64;

/// Channel capacity for status lines
const STATUS_CHANNEL_SIZE: usize = 4;

/// One operator status line, without terminator
pub type StatusLine = String<STATUS_LINE_LEN>;

/// Status lines from the cycle controller to the UART
pub static STATUS_CHANNEL: Channel<CriticalSectionRawMutex, StatusLine, STATUS_CHANNEL_SIZE> =
    Channel::new();
