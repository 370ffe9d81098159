//! Simple TOML parser for machine configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the servo cycle configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers (`servo`, `cycle`, `serial`)
//! - `key = value` pairs with unsigned integer values
//! - Digit separators (`10_000`)
//! - Comments (`# ...`), including trailing comments
//!
//! Unknown keys inside a known section are ignored. Anything missing keeps
//! its default value.

use super::types::{CycleConfig, MachineConfig, SerialConfig, ServoConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value is not an unsigned integer in range for its key
    InvalidValue,
    /// Line is neither a header, a key/value pair nor a comment
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Servo,
    Cycle,
    Serial,
}

/// Parse TOML configuration into MachineConfig
///
/// The result is not validated; call [`MachineConfig::validate`] on it.
pub fn parse_config(input: &str) -> Result<MachineConfig, ParseError> {
    let mut config = MachineConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        match section {
            // Top-level keys carry nothing we use
            Section::Root => {}
            Section::Servo => apply_servo(&mut config.servo, key, value)?,
            Section::Cycle => apply_cycle(&mut config.cycle, key, value)?,
            Section::Serial => apply_serial(&mut config.serial, key, value)?,
        }
    }

    Ok(config)
}

/// Parse a section header like "servo" or "cycle"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "servo" => Ok(Section::Servo),
        "cycle" => Ok(Section::Cycle),
        "serial" => Ok(Section::Serial),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_servo(servo: &mut ServoConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "frequency_hz" => servo.frequency_hz = parse_uint(value)?,
        "min_pulse_us" => servo.min_pulse_us = parse_uint(value)?,
        "max_pulse_us" => servo.max_pulse_us = parse_uint(value)?,
        "max_angle" => servo.max_angle = parse_uint(value)?,
        _ => {} // Ignore unknown keys
    }
    Ok(())
}

fn apply_cycle(cycle: &mut CycleConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "delay_ms" => cycle.delay_ms = parse_uint(value)?,
        "hold_ms" => cycle.hold_ms = parse_uint(value)?,
        "rest_angle" => cycle.rest_angle = parse_uint(value)?,
        "active_angle" => cycle.active_angle = parse_uint(value)?,
        "poll_interval_ms" => cycle.poll_interval_ms = parse_uint(value)?,
        _ => {}
    }
    Ok(())
}

fn apply_serial(serial: &mut SerialConfig, key: &str, value: &str) -> Result<(), ParseError> {
    if key == "baudrate" {
        serial.baudrate = parse_uint(value)?;
    }
    Ok(())
}

/// Drop everything from the first `#`
///
/// Values are integers only, so a `#` can never sit inside a string.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an unsigned integer, accepting TOML digit separators
fn parse_uint<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    if value.starts_with('_') || value.ends_with('_') || value.contains("__") {
        return Err(ParseError::InvalidValue);
    }

    let mut acc: u64 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }

    T::try_from(acc).map_err(|_| ParseError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Servo cycle configuration

[servo]
frequency_hz = 50
min_pulse_us = 600     # SG90 low end
max_pulse_us = 2_400
max_angle = 180

[cycle]
delay_ms = 10_000
hold_ms = 5_000
rest_angle = 0
active_angle = 90
poll_interval_ms = 5

[serial]
baudrate = 115200
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.servo.frequency_hz, 50);
        assert_eq!(config.servo.min_pulse_us, 600);
        assert_eq!(config.servo.max_pulse_us, 2400);
        assert_eq!(config.cycle.delay_ms, 10_000);
        assert_eq!(config.cycle.hold_ms, 5_000);
        assert_eq!(config.cycle.active_angle, 90);
        assert_eq!(config.cycle.poll_interval_ms, 5);
        assert_eq!(config.serial.baudrate, 115_200);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_shipped_machine_toml_matches_defaults() {
        let shipped = include_str!("../../../cadence-firmware/machine.toml");
        let config = parse_config(shipped).unwrap();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("[cycle]\nhold_ms = 2000\n").unwrap();
        assert_eq!(config.cycle.hold_ms, 2000);
        assert_eq!(config.cycle.delay_ms, 10_000);
        assert_eq!(config.servo, ServoConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[stepper]\nmicrosteps = 16\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_config("[servo\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[servo]\npin = 16\n").unwrap();
        assert_eq!(config.servo, ServoConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[cycle]\ndelay_ms = -5\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[cycle]\nactive_angle = 300\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[cycle]\ndelay_ms = 10__000\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[serial]\nbaudrate = \"fast\"\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_invalid_line() {
        assert_eq!(
            parse_config("[cycle]\ndelay_ms\n"),
            Err(ParseError::InvalidLine)
        );
    }

    #[test]
    fn test_parse_uint_overflow() {
        assert_eq!(
            parse_uint::<u32>("4294967296"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_uint::<u32>("4294967295"), Ok(u32::MAX));
    }

    #[test]
    fn test_pulse_width_beyond_u32_rejected() {
        assert_eq!(
            parse_config("[servo]\nmax_pulse_us = 4_294_967_296\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[servo]\nmin_pulse_us = 4294967296\n"),
            Err(ParseError::InvalidValue)
        );
    }
}
