//! Per-axis DDA state and the active segment snapshot.

/// Per-axis digital-differential-analyzer state.
///
/// One of these exists per registered axis. It is owned exclusively by the
/// stepping engine and mutated only inside the primary tick handler or during
/// segment handoff.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisTickState {
    /// Remaining step count for this axis in the active segment.
    /// Zero means the axis is inactive this segment.
    pub steps_to_move: u32,

    /// Current rate in steps per tick. Always >= 0.
    pub rate: f32,

    /// Fractional position. A step fires when it reaches 1.0; after each
    /// tick's update it is back in `[0, 1)`.
    pub accumulator: f32,

    /// This axis's step count divided by the dominant axis's step count.
    /// In `(0, 1]` for active axes.
    pub axis_ratio: f32,

    /// Steps emitted so far this segment. Never exceeds `steps_to_move`;
    /// equals it exactly when the axis goes inactive.
    pub steps_done: u32,

    /// Tick index of the next acceleration-phase transition.
    pub next_rate_change_tick: u32,

    /// Signed per-tick rate change currently in effect: positive while
    /// accelerating, negative while decelerating, zero while cruising.
    pub rate_delta_per_tick: f32,
}

/// Profile snapshot of the active segment.
///
/// Copied wholesale from the staged [`Segment`](crate::Segment) at handoff
/// and replaced at the next handoff. Rates refer to the dominant axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentInfo {
    /// Tick index at which acceleration ends.
    pub accelerate_until: u32,

    /// Tick index at which deceleration begins.
    pub decelerate_after: u32,

    /// Cruise rate of the dominant axis in steps per second.
    pub maximum_rate: f32,

    /// Magnitude of the per-tick rate decrease for the dominant axis.
    pub deceleration_per_tick: f32,

    /// Total duration of the segment in ticks.
    pub total_move_ticks: u32,
}
