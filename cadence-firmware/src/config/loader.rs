//! Configuration loader
//!
//! Parses and validates the embedded configuration.
//! Falls back to compiled defaults if either step fails.

use defmt::*;

use cadence_core::config::{parse_config, ConfigError, MachineConfig};

/// Load the machine configuration from TOML text
///
/// Never fails: a broken config is logged and replaced by the defaults, so
/// the servo still cycles with the stock timing.
pub fn load_config(toml: &str) -> MachineConfig {
    match parse_and_validate(toml) {
        Ok(config) => {
            info!("Configuration loaded successfully");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            // build.rs validates machine.toml, so this only happens when the
            // two validators disagree
            error!("Invalid embedded configuration: {:?}", e);
            error!("Using default configuration");
            let config = MachineConfig::default();
            log_config_summary(&config);
            config
        }
    }
}

fn parse_and_validate(toml: &str) -> Result<MachineConfig, ConfigError> {
    let config = parse_config(toml)?;
    config.validate()?;
    Ok(config)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &MachineConfig) {
    debug!(
        "  servo: {} Hz, {}-{} us over {} deg",
        config.servo.frequency_hz,
        config.servo.min_pulse_us,
        config.servo.max_pulse_us,
        config.servo.max_angle
    );
    debug!(
        "  cycle: rest {} deg, active {} deg after {} ms, hold {} ms, poll {} ms",
        config.cycle.rest_angle,
        config.cycle.active_angle,
        config.cycle.delay_ms,
        config.cycle.hold_ms,
        config.cycle.poll_interval_ms
    );
    debug!("  serial: {} baud", config.serial.baudrate);
}
