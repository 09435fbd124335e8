//! Error types for plotter-motion.
//!
//! Provides unified error handling across configuration, homing, calibration,
//! and persistence. Ordinary axis motion never fails: rejected steps and
//! out-of-range targets are reported through return values and log events.

use core::fmt;

use crate::axis::AxisLabel;
use crate::calibration::Phase;
use crate::motor::MotorId;
use crate::switches::LimitMask;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all plotter-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor or homing error
    Motor(MotorError),
    /// Discovery or measurement error
    Calibration(CalibrationError),
    /// Calibration record could not be read or written
    Storage(StorageError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Travel bound of zero
    InvalidMaxTravel(AxisLabel),
    /// Steps per millimetre must be > 0
    InvalidStepsPerMm {
        /// Axis being validated
        axis: AxisLabel,
        /// Offending value
        value: f32,
    },
    /// Expected calibration length of zero
    InvalidExpectedLength(AxisLabel),
    /// Expected length plus tolerance does not fit in the axis travel bound
    BudgetExceedsTravel {
        /// Axis being validated
        axis: AxisLabel,
        /// Expected length plus tolerance
        budget: u32,
        /// Configured travel bound
        max_travel: u32,
    },
    /// Escape probe is zero or as long as an axis
    InvalidEscapeSteps {
        /// Motor the probe belongs to
        motor: MotorId,
        /// Offending value
        steps: u32,
    },
    /// Builder is missing a required part
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor and homing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// A homing seek used its whole budget without reaching the switch
    LimitNotReached {
        /// Axis that was homing
        axis: AxisLabel,
        /// Steps taken before giving up
        steps: u32,
    },
}

/// Discovery and measurement errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// A seek exceeded expected travel plus tolerance. The engine is halted.
    Jammed {
        /// Axis whose budget ran out
        axis: AxisLabel,
        /// Pass that was running
        phase: Phase,
        /// Steps counted on that axis
        steps: u32,
    },
    /// The engine halted after a jam and refuses further motion.
    Halted,
    /// A probe changed more than one switch.
    AmbiguousProbe {
        /// Motor being probed
        motor: MotorId,
        /// Switches that opened during the probe
        released: LimitMask,
        /// Switches that closed during the probe
        triggered: LimitMask,
    },
    /// Both motors resolved to the same axis.
    ConflictingAssignment,
    /// An axis sat on its switch without a seek that could reveal its polarity.
    PolarityUnresolvable(AxisLabel),
}

/// Persistence errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Backing store failed to read
    ReadFailed,
    /// Backing store failed to write
    WriteFailed,
    /// Stored record has an unknown layout
    Corrupt,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Calibration(e) => write!(f, "Calibration error: {}", e),
            Error::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMaxTravel(axis) => {
                write!(f, "Invalid max travel for {} axis: must be > 0", axis)
            }
            ConfigError::InvalidStepsPerMm { axis, value } => {
                write!(f, "Invalid steps/mm for {} axis: {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidExpectedLength(axis) => {
                write!(f, "Invalid expected length for {} axis: must be > 0", axis)
            }
            ConfigError::BudgetExceedsTravel { axis, budget, max_travel } => write!(
                f,
                "{} axis budget {} exceeds max travel {}",
                axis, budget, max_travel
            ),
            ConfigError::InvalidEscapeSteps { motor, steps } => write!(
                f,
                "Invalid escape steps for motor {}: {}. Must be > 0 and shorter than both axes",
                motor, steps
            ),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::LimitNotReached { axis, steps } => {
                write!(f, "{} axis did not reach its limit after {} steps", axis, steps)
            }
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::Jammed { axis, phase, steps } => write!(
                f,
                "{} axis jammed during {:?} after {} steps",
                axis, phase, steps
            ),
            CalibrationError::Halted => write!(f, "Calibration halted after a jam, reset required"),
            CalibrationError::AmbiguousProbe {
                motor,
                released,
                triggered,
            } => write!(
                f,
                "Probe of motor {} changed several switches (released {:#06b}, triggered {:#06b})",
                motor,
                released.bits(),
                triggered.bits()
            ),
            CalibrationError::ConflictingAssignment => {
                write!(f, "Both motors resolved to the same axis")
            }
            CalibrationError::PolarityUnresolvable(axis) => {
                write!(f, "Cannot determine polarity of {} axis", axis)
            }
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed => write!(f, "read failed"),
            StorageError::WriteFailed => write!(f, "write failed"),
            StorageError::Corrupt => write!(f, "stored calibration is corrupt"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CalibrationError> for Error {
    fn from(e: CalibrationError) -> Self {
        Error::Calibration(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CalibrationError {}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}
