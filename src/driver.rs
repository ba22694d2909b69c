//! Actuator driver boundary.
//!
//! The stepping engine talks to hardware through the [`StepDriver`] trait.
//! [`StepDirPins`] is the stock implementation over an embedded-hal 1.0
//! STEP/DIR pin pair.

use embedded_hal::digital::OutputPin;

/// Per-axis actuator driver consumed by the stepping engine.
///
/// All three operations run inside interrupt handlers and must be
/// non-blocking and sub-microsecond. They are infallible by contract: an
/// error here would manifest as wrong physical motion, and the tick handler
/// has no way to recover mid-pulse.
pub trait StepDriver {
    /// Assert the step line (leading edge of a step pulse).
    fn step(&mut self);

    /// Deassert the step line (trailing edge of a step pulse).
    fn unstep(&mut self);

    /// Set the direction line. `forward` is the positive step direction.
    fn set_direction(&mut self, forward: bool);
}

/// [`StepDriver`] over a STEP/DIR pin pair.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
///
/// Pin errors are discarded: MCU GPIO writes are infallible in practice, and
/// the engine's interrupt context has nowhere to report one.
pub struct StepDirPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (high = pulse asserted).
    step_pin: STEP,

    /// DIR pin (high = forward, or inverted).
    dir_pin: DIR,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,
}

impl<STEP, DIR> StepDirPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create a driver over a STEP/DIR pin pair.
    pub fn new(step_pin: STEP, dir_pin: DIR) -> Self {
        Self {
            step_pin,
            dir_pin,
            invert_direction: false,
        }
    }

    /// Invert the direction pin logic (low = forward).
    pub fn with_inverted_direction(mut self) -> Self {
        self.invert_direction = true;
        self
    }

    /// Release the underlying pins.
    pub fn release(self) -> (STEP, DIR) {
        (self.step_pin, self.dir_pin)
    }
}

impl<STEP, DIR> StepDriver for StepDirPins<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    #[inline]
    fn step(&mut self) {
        let _ = self.step_pin.set_high();
    }

    #[inline]
    fn unstep(&mut self) {
        let _ = self.step_pin.set_low();
    }

    #[inline]
    fn set_direction(&mut self, forward: bool) {
        let pin_high = forward != self.invert_direction;
        if pin_high {
            let _ = self.dir_pin.set_high();
        } else {
            let _ = self.dir_pin.set_low();
        }
    }
}
