//! Status UART transmit task
//!
//! Prints status lines from the cycle controller for the operator.

use defmt::*;
use embassy_rp::uart::{BufferedUartTx, Error as UartError};
use embedded_io_async::Write;

use crate::channels::STATUS_CHANNEL;

/// Status TX task - writes each status line to the UART, CRLF terminated
#[embassy_executor::task]
pub async fn status_tx_task(mut tx: BufferedUartTx) {
    info!("Status TX task started");

    loop {
        let line = STATUS_CHANNEL.receive().await;

        if let Err(e) = write_line(&mut tx, line.as_str()).await {
            warn!("Failed to send status line: {:?}", e);
        } else {
            trace!("Status line sent");
        }
    }
}

/// Write one line and flush it out of the buffer
async fn write_line(tx: &mut BufferedUartTx, line: &str) -> Result<(), UartError> {
    tx.write_all(line.as_bytes()).await?;
    tx.write_all(b"\r\n").await?;
    tx.flush().await
}
