//! Hardware timer boundary and reload math.

use libm::floorf;

/// Capability boundary over one hardware match timer.
///
/// The engine owns two of these: the primary tick timer (free-running, fires
/// every step tick) and the pulse-trailer timer (armed reactively, fires once
/// per arming to clear asserted step lines). Implementations wrap the MCU's
/// timer peripheral; all four operations are register writes and must not
/// block.
pub trait TickTimer {
    /// Install the match/reload value in timer counts.
    fn set_reload(&mut self, counts: u32);

    /// Current counter value.
    fn current_count(&self) -> u32;

    /// Reset the counter to zero and (re)start counting. Arming the trailer
    /// timer is a restart: its period measures from the most recent call.
    fn restart(&mut self);

    /// Enable the timer's interrupt source. Before this, the timer never
    /// fires.
    fn enable(&mut self);
}

/// Reload value for a timer that must fire `hz` times per second.
#[inline]
pub(crate) fn reload_for_frequency(timer_clock_hz: u32, hz: f32) -> u32 {
    floorf(timer_clock_hz as f32 / hz) as u32
}

/// Reload value for a timer that must fire once after `microseconds`.
#[inline]
pub(crate) fn reload_for_pulse_width(timer_clock_hz: u32, microseconds: f32) -> u32 {
    floorf(timer_clock_hz as f32 * (microseconds / 1_000_000.0)) as u32
}
