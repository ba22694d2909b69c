//! Timing configuration for the stepping core.

use serde::Deserialize;

/// Timing parameters for the tick and pulse-trailer timers.
///
/// These are trusted boot-time values; [`validate_config`](super::validate_config)
/// checks them once before the ticker is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct TimingConfig {
    /// Input clock of the hardware timers in Hz.
    ///
    /// On an LPC1768 this is `SystemCoreClock / 4` = 25 MHz.
    pub timer_clock_hz: u32,

    /// Step tick frequency in Hz (ticks per second of the primary handler).
    pub tick_frequency_hz: f32,

    /// Step pulse width in microseconds, measured from the leading edge of
    /// the most recent step assertion.
    pub pulse_width_us: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            timer_clock_hz: 25_000_000,
            tick_frequency_hz: 100_000.0,
            pulse_width_us: 1.0,
        }
    }
}

impl TimingConfig {
    /// Tick period in microseconds implied by the tick frequency.
    #[inline]
    pub fn tick_period_us(&self) -> f32 {
        1_000_000.0 / self.tick_frequency_hz
    }
}
