//! Configuration type definitions

use super::parse::ParseError;

/// Largest angle a standard hobby servo accepts
pub const SERVO_MAX_ANGLE: u8 = 180;

/// Default delay before the servo is activated (ms)
pub const DEFAULT_DELAY_MS: u32 = 10_000;

/// Default time the servo is held at the activated angle (ms)
pub const DEFAULT_HOLD_MS: u32 = 5_000;

/// Servo signal configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// PWM frequency in Hz (50 Hz is the classic servo frame rate)
    pub frequency_hz: u32,
    /// Pulse width at 0 degrees (µs)
    pub min_pulse_us: u32,
    /// Pulse width at `max_angle` (µs)
    pub max_pulse_us: u32,
    /// Mechanical travel of the servo in degrees
    pub max_angle: u8,
}

impl ServoConfig {
    /// PWM period in microseconds
    pub fn period_us(&self) -> u32 {
        1_000_000 / self.frequency_hz.max(1)
    }
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50,
            min_pulse_us: 500,
            max_pulse_us: 2500,
            max_angle: SERVO_MAX_ANGLE,
        }
    }
}

/// Cycle timing and positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleConfig {
    /// Time at rest before activation, measured from cycle start (ms)
    pub delay_ms: u32,
    /// Time held at the activated angle (ms)
    pub hold_ms: u32,
    /// Rest position (degrees)
    pub rest_angle: u8,
    /// Activated position (degrees)
    pub active_angle: u8,
    /// How often the firmware polls the controller (ms)
    pub poll_interval_ms: u32,
}

impl CycleConfig {
    /// Elapsed time since cycle start at which the servo returns to rest
    ///
    /// Saturates rather than wrapping so an absurd config cannot produce a
    /// return threshold earlier than the activation threshold.
    pub fn return_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.hold_ms)
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            hold_ms: DEFAULT_HOLD_MS,
            rest_angle: 0,
            active_angle: 90,
            poll_interval_ms: 10,
        }
    }
}

/// Status serial port configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    pub servo: ServoConfig,
    pub cycle: CycleConfig,
    pub serial: SerialConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML subset could not be parsed
    Parse(ParseError),
    /// Servo travel is 0 or beyond 180 degrees
    InvalidServoTravel,
    /// A cycle angle is beyond the servo travel
    AngleOutOfRange,
    /// PWM frequency is 0 Hz
    ZeroFrequency,
    /// Minimum pulse is not shorter than maximum pulse
    InvalidPulseRange,
    /// Maximum pulse does not fit in one PWM period
    PulseExceedsPeriod,
    /// Activation delay or hold time is 0
    ZeroDelay,
    /// Poll interval is 0 or longer than the hold time
    InvalidPollInterval,
    /// Serial baud rate is 0
    ZeroBaudrate,
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

impl MachineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the hardware cannot honor
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let servo = &self.servo;
        if servo.max_angle == 0 || servo.max_angle > SERVO_MAX_ANGLE {
            return Err(ConfigError::InvalidServoTravel);
        }
        if servo.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if servo.min_pulse_us >= servo.max_pulse_us {
            return Err(ConfigError::InvalidPulseRange);
        }
        if servo.max_pulse_us >= servo.period_us() {
            return Err(ConfigError::PulseExceedsPeriod);
        }

        let cycle = &self.cycle;
        if cycle.rest_angle > servo.max_angle || cycle.active_angle > servo.max_angle {
            return Err(ConfigError::AngleOutOfRange);
        }
        if cycle.delay_ms == 0 || cycle.hold_ms == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        if cycle.poll_interval_ms == 0 || cycle.poll_interval_ms > cycle.hold_ms {
            return Err(ConfigError::InvalidPollInterval);
        }

        if self.serial.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MachineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.cycle.delay_ms, 10_000);
        assert_eq!(config.cycle.return_ms(), 15_000);
        assert_eq!(config.cycle.rest_angle, 0);
        assert_eq!(config.cycle.active_angle, 90);
        assert_eq!(config.serial.baudrate, 115_200);
    }

    #[test]
    fn test_servo_period() {
        assert_eq!(ServoConfig::default().period_us(), 20_000);

        let fast = ServoConfig {
            frequency_hz: 333,
            ..Default::default()
        };
        assert_eq!(fast.period_us(), 3003);
    }

    #[test]
    fn test_return_ms_saturates() {
        let cycle = CycleConfig {
            delay_ms: u32::MAX - 10,
            hold_ms: 100,
            ..Default::default()
        };
        assert_eq!(cycle.return_ms(), u32::MAX);
    }

    #[test]
    fn test_angle_out_of_range() {
        let mut config = MachineConfig::default();
        config.cycle.active_angle = 181;
        assert_eq!(config.validate(), Err(ConfigError::AngleOutOfRange));

        let mut config = MachineConfig::default();
        config.servo.max_angle = 120;
        config.cycle.rest_angle = 150;
        assert_eq!(config.validate(), Err(ConfigError::AngleOutOfRange));
    }

    #[test]
    fn test_invalid_servo_travel() {
        let mut config = MachineConfig::default();
        config.servo.max_angle = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidServoTravel));

        config.servo.max_angle = 200;
        assert_eq!(config.validate(), Err(ConfigError::InvalidServoTravel));
    }

    #[test]
    fn test_pulse_checks() {
        let mut config = MachineConfig::default();
        config.servo.min_pulse_us = 2500;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPulseRange));

        // 400 Hz leaves a 2.5ms period, no room for a 2.5ms pulse
        let mut config = MachineConfig::default();
        config.servo.frequency_hz = 400;
        assert_eq!(config.validate(), Err(ConfigError::PulseExceedsPeriod));

        let mut config = MachineConfig::default();
        config.servo.frequency_hz = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrequency));
    }

    #[test]
    fn test_timing_checks() {
        let mut config = MachineConfig::default();
        config.cycle.hold_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDelay));

        let mut config = MachineConfig::default();
        config.cycle.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPollInterval));

        let mut config = MachineConfig::default();
        config.cycle.poll_interval_ms = 6_000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPollInterval));
    }

    #[test]
    fn test_zero_baudrate() {
        let mut config = MachineConfig::default();
        config.serial.baudrate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBaudrate));
    }
}
