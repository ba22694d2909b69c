//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::TimingConfig;

/// Validate a timing configuration.
///
/// Checks:
/// - Timer input clock is non-zero
/// - Tick frequency is positive
/// - Pulse width is positive
/// - Pulse width is below the tick period
///
/// The last check matters: the pulse trailer fires once per armed period, and
/// if a pulse is still pending when the next tick asserts new steps, trailing
/// edges can be shortened or lost. The stepping core tolerates this only when
/// the pulse width is well below the tick period, so a configuration that
/// violates it is rejected outright.
pub fn validate_config(config: &TimingConfig) -> Result<()> {
    if config.timer_clock_hz == 0 {
        return Err(Error::Config(ConfigError::InvalidTimerClock(
            config.timer_clock_hz,
        )));
    }

    if config.tick_frequency_hz <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidTickFrequency(
            config.tick_frequency_hz,
        )));
    }

    if config.pulse_width_us <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidPulseWidth(
            config.pulse_width_us,
        )));
    }

    let tick_period_us = config.tick_period_us();
    if config.pulse_width_us >= tick_period_us {
        return Err(Error::Config(ConfigError::PulseWidthExceedsTickPeriod {
            pulse_us: config.pulse_width_us,
            tick_period_us,
        }));
    }

    Ok(())
}
