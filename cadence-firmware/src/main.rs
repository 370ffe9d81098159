//! Cadence - Timed Servo Cycle Firmware
//!
//! Main firmware binary for RP2040-based boards.
//!
//! After power-on the servo waits at its rest angle, swings to the activated
//! angle once the delay has passed, holds there, returns to rest and starts
//! the cycle again. Timing and angles come from the embedded machine.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cadence_core::config::ServoConfig;
use cadence_drivers::servo::PwmServo;
use cadence_hal_rp2040::{servo_output_a, EmbassyClock, PwmTiming};

mod channels;
mod config;
mod status;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cadence firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Cycle time is measured from here, as close to power-on as we get
    let clock = EmbassyClock::new();
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);

    // Setup UART0 for operator status lines
    // Pin assignment is board-specific (Pico: TX=GPIO0, RX=GPIO1)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();

    info!("UART initialized at {} baud", config.serial.baudrate);

    // Setup PWM for the servo signal
    // Pin assignment is board-specific (GPIO16 = PWM slice 0, channel A)
    let sys_clock_hz = embassy_rp::clocks::clk_sys_freq();
    let (servo_config, timing) =
        match PwmTiming::for_frequency(sys_clock_hz, config.servo.frequency_hz) {
            Ok(timing) => (config.servo, timing),
            Err(e) => {
                error!(
                    "No PWM timing for {} Hz: {:?}, using default servo config",
                    config.servo.frequency_hz, e
                );
                let fallback = ServoConfig::default();
                let timing = unwrap!(PwmTiming::for_frequency(
                    sys_clock_hz,
                    fallback.frequency_hz
                ));
                (fallback, timing)
            }
        };

    debug!(
        "PWM timing: divider {}+{}/16, top {}, {} mHz",
        timing.divider_int(),
        timing.divider_frac(),
        timing.top,
        timing.actual_frequency_mhz()
    );

    let pwm = unwrap!(servo_output_a(p.PWM_SLICE0, p.PIN_16, &timing));
    let servo = PwmServo::new(pwm, servo_config);

    info!("Servo PWM initialized at {} Hz", servo_config.frequency_hz);

    // Spawn tasks
    spawner.spawn(tasks::status_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::cycle_task(servo, clock, config.cycle))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
