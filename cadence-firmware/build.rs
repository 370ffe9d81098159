//! Build script for cadence-firmware
//!
//! - Sets up linker search paths and link arguments for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest servo travel accepted in machine.toml
const MAX_SERVO_ANGLE: i64 = 180;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Linker scripts from cortex-m-rt, embassy-rp (boot2) and defmt
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() {
    // Re-run if machine.toml changes
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a machine.toml configuration file.        ║\n\
            ║  Please create one in the cadence-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    validate_sections(&config, &mut errors);
    validate_servo(&config, &mut errors);
    validate_cycle(&config, &mut errors);
    validate_serial(&config, &mut errors);

    report_errors("Invalid configuration in machine.toml", &errors);

    println!("cargo:warning=machine.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors, if there are any
fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only [servo], [cycle] and [serial] are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match name.as_str() {
            "servo" | "cycle" | "serial" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", name));
                }
            }
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

/// Read an optional non-negative integer key, recording type errors
fn get_uint(
    section: &str,
    table: Option<&toml::value::Table>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table?.get(key)? {
        toml::Value::Integer(v) if *v >= 0 => Some(*v),
        _ => {
            errors.push(format!("[{}] {} must be a non-negative integer", section, key));
            None
        }
    }
}

/// Reject keys the firmware parser would silently ignore
fn check_known_keys(
    section: &str,
    table: Option<&toml::value::Table>,
    known: &[&str],
    errors: &mut Vec<String>,
) {
    let Some(table) = table else {
        return;
    };

    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Validate servo signal configuration
fn validate_servo(config: &toml::Value, errors: &mut Vec<String>) {
    let servo = config.get("servo").and_then(|s| s.as_table());
    check_known_keys(
        "servo",
        servo,
        &["frequency_hz", "min_pulse_us", "max_pulse_us", "max_angle"],
        errors,
    );

    let frequency = get_uint("servo", servo, "frequency_hz", errors).unwrap_or(50);
    let min_pulse = get_uint("servo", servo, "min_pulse_us", errors).unwrap_or(500);
    let max_pulse = get_uint("servo", servo, "max_pulse_us", errors).unwrap_or(2500);
    let max_angle = get_uint("servo", servo, "max_angle", errors).unwrap_or(MAX_SERVO_ANGLE);

    if !(8..=400).contains(&frequency) {
        errors.push("[servo] frequency_hz must be 8-400".to_string());
    } else if max_pulse >= 1_000_000 / frequency {
        errors.push("[servo] max_pulse_us must be shorter than one PWM period".to_string());
    }

    for (key, pulse) in [("min_pulse_us", min_pulse), ("max_pulse_us", max_pulse)] {
        if pulse > u32::MAX as i64 {
            errors.push(format!("[servo] {} must be 0-{}", key, u32::MAX));
        }
    }

    if min_pulse >= max_pulse {
        errors.push("[servo] min_pulse_us must be less than max_pulse_us".to_string());
    }

    if !(1..=MAX_SERVO_ANGLE).contains(&max_angle) {
        errors.push(format!("[servo] max_angle must be 1-{}", MAX_SERVO_ANGLE));
    }
}

/// Validate cycle timing and positions
fn validate_cycle(config: &toml::Value, errors: &mut Vec<String>) {
    let cycle = config.get("cycle").and_then(|c| c.as_table());
    check_known_keys(
        "cycle",
        cycle,
        &[
            "delay_ms",
            "hold_ms",
            "rest_angle",
            "active_angle",
            "poll_interval_ms",
        ],
        errors,
    );

    let max_angle = config
        .get("servo")
        .and_then(|s| s.get("max_angle"))
        .and_then(|a| a.as_integer())
        .unwrap_or(MAX_SERVO_ANGLE);

    for key in ["rest_angle", "active_angle"] {
        if let Some(angle) = get_uint("cycle", cycle, key, errors) {
            if angle > max_angle {
                errors.push(format!("[cycle] {} must be 0-{}", key, max_angle));
            }
        }
    }

    let mut hold = 5_000;
    for key in ["delay_ms", "hold_ms"] {
        if let Some(ms) = get_uint("cycle", cycle, key, errors) {
            if ms == 0 || ms > u32::MAX as i64 {
                errors.push(format!("[cycle] {} must be 1-{}", key, u32::MAX));
            } else if key == "hold_ms" {
                hold = ms;
            }
        }
    }

    if let Some(poll) = get_uint("cycle", cycle, "poll_interval_ms", errors) {
        if poll == 0 || poll > hold {
            errors.push("[cycle] poll_interval_ms must be 1..=hold_ms".to_string());
        }
    }
}

/// Validate status serial configuration
fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let serial = config.get("serial").and_then(|s| s.as_table());
    check_known_keys("serial", serial, &["baudrate"], errors);

    if let Some(baud) = get_uint("serial", serial, "baudrate", errors) {
        if baud == 0 || baud > 921_600 {
            errors.push("[serial] baudrate must be 1-921600".to_string());
        }
    }
}
