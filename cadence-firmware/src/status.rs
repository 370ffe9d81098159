//! Status sink backed by the status channel
//!
//! The cycle task must never wait on the UART, so lines are offered to the
//! channel with `try_send` and dropped when it is full.

use defmt::*;

use cadence_core::traits::StatusSink;

use crate::channels::{StatusLine, STATUS_CHANNEL};

/// Forwards status lines to [`STATUS_CHANNEL`]
pub struct ChannelSink {
    /// Lines dropped because the channel was full
    dropped: u32,
}

impl ChannelSink {
    pub const fn new() -> Self {
        Self { dropped: 0 }
    }
}

impl StatusSink for ChannelSink {
    fn notify(&mut self, line: &str) {
        let mut buf = StatusLine::new();
        for c in line.chars() {
            if buf.push(c).is_err() {
                debug!("Status line truncated to {} bytes", buf.len());
                break;
            }
        }

        if STATUS_CHANNEL.try_send(buf).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Status channel full, dropped line ({} total)", self.dropped);
        }
    }
}
