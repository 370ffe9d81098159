//! Servo cycle task
//!
//! Owns the servo and runs the cycle controller on a fixed ticker.
//! Uses the cadence_drivers::servo::PwmServo driver for angle-to-pulse mapping.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};

use cadence_core::config::CycleConfig;
use cadence_core::cycle::CycleController;
use cadence_drivers::servo::PwmServo;
use cadence_hal_rp2040::EmbassyClock;

use crate::status::ChannelSink;

/// Servo cycle task
///
/// Commands the rest angle immediately, then polls the controller every
/// `poll_interval_ms` for the life of the firmware.
#[embassy_executor::task]
pub async fn cycle_task(
    servo: PwmServo<PwmOutput<'static>>,
    clock: EmbassyClock,
    config: CycleConfig,
) {
    info!(
        "Cycle task started: activate after {} ms, hold {} ms",
        config.delay_ms, config.hold_ms
    );

    let mut controller = CycleController::new(config, servo, clock, ChannelSink::new());

    match controller.start() {
        Ok(()) => info!("Servo at rest angle {} deg", config.rest_angle),
        Err(e) => error!("Failed to command rest angle: {:?}", e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.poll_interval_ms as u64));

    loop {
        match controller.poll() {
            Ok(Some(transition)) => {
                info!(
                    "{:?} -> {:?} at {} ms into cycle: {}",
                    transition.from,
                    transition.to,
                    transition.elapsed_ms,
                    transition.message()
                );
            }
            Ok(None) => {}
            Err(e) => {
                // No feedback from the servo: the cycle carries on regardless
                warn!(
                    "Servo command failed: {:?}, cycle now {:?}",
                    e,
                    controller.state()
                );
            }
        }

        ticker.next().await;
    }
}
