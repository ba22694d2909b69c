//! Error types for step-ticker.
//!
//! The tick handlers themselves never return errors — a real-time stepping
//! core has nothing useful to do with one mid-pulse. Everything that *can*
//! fail does so at configuration or registration time, before `start()`.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all step-ticker operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis registration error
    Registration(RegistrationError),
    /// Motion segment validation error
    Segment(SegmentError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Timer input clock is zero
    InvalidTimerClock(u32),
    /// Tick frequency must be > 0
    InvalidTickFrequency(f32),
    /// Pulse width must be > 0
    InvalidPulseWidth(f32),
    /// Pulse width must be well below the tick period, or trailing edges
    /// race the next leading edge
    PulseWidthExceedsTickPeriod {
        /// Configured pulse width in microseconds
        pulse_us: f32,
        /// Tick period in microseconds implied by the tick frequency
        tick_period_us: f32,
    },
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis registration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationError {
    /// All axis slots are taken; capacity is fixed at compile time
    CapacityExceeded {
        /// Maximum number of registerable axes
        capacity: usize,
    },
}

/// Motion segment validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentError {
    /// Every axis has a zero step count
    NoSteps,
    /// Phase boundaries must satisfy accelerate_until <= decelerate_after <= total_move_ticks
    PhaseOutOfOrder {
        /// Tick index at which acceleration ends
        accelerate_until: u32,
        /// Tick index at which deceleration begins
        decelerate_after: u32,
        /// Total segment duration in ticks
        total_move_ticks: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Registration(e) => write!(f, "Registration error: {}", e),
            Error::Segment(e) => write!(f, "Segment error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimerClock(v) => {
                write!(f, "Invalid timer input clock: {} Hz. Must be > 0", v)
            }
            ConfigError::InvalidTickFrequency(v) => {
                write!(f, "Invalid tick frequency: {} Hz. Must be > 0", v)
            }
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid pulse width: {} us. Must be > 0", v)
            }
            ConfigError::PulseWidthExceedsTickPeriod {
                pulse_us,
                tick_period_us,
            } => write!(
                f,
                "Pulse width {} us is not below the tick period {} us",
                pulse_us, tick_period_us
            ),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::CapacityExceeded { capacity } => {
                write!(f, "Axis capacity ({}) exceeded", capacity)
            }
        }
    }
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::NoSteps => write!(f, "Segment has no steps on any axis"),
            SegmentError::PhaseOutOfOrder {
                accelerate_until,
                decelerate_after,
                total_move_ticks,
            } => write!(
                f,
                "Phase boundaries out of order: accelerate_until {} <= decelerate_after {} <= total_move_ticks {} violated",
                accelerate_until, decelerate_after, total_move_ticks
            ),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<RegistrationError> for Error {
    fn from(e: RegistrationError) -> Self {
        Error::Registration(e)
    }
}

impl From<SegmentError> for Error {
    fn from(e: SegmentError) -> Self {
        Error::Segment(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for RegistrationError {}

#[cfg(feature = "std")]
impl std::error::Error for SegmentError {}
