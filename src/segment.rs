//! Planned motion segments.
//!
//! A [`Segment`] is one fully-planned multi-axis move with a trapezoidal
//! velocity profile, expressed in per-axis step counts and tick-indexed phase
//! boundaries. Segments are produced by a motion planner, handed to the
//! stepping engine exactly once, and copied by value at handoff — the engine
//! never retains a reference past the copy.

use crate::error::{Result, SegmentError};

/// One fully-planned multi-axis move.
///
/// The profile is defined in terms of the *dominant axis* — the axis with
/// the largest step count. All rates (`initial_rate`, `maximum_rate`) and
/// per-tick deltas refer to the dominant axis; every other axis is scaled by
/// the ratio of its step count to the dominant one at handoff.
///
/// Tick-indexed phase boundaries partition the move:
/// accelerate for ticks `< accelerate_until`, cruise for ticks in
/// `[accelerate_until, decelerate_after)`, decelerate for ticks in
/// `[decelerate_after, total_move_ticks)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment<const MAX_AXES: usize> {
    /// Step count for each axis slot. Zero means the axis sits this move out.
    pub steps: [u32; MAX_AXES],

    /// Direction bit for each axis slot (`true` = forward).
    pub directions: [bool; MAX_AXES],

    /// Entry rate of the dominant axis in steps per second.
    pub initial_rate: f32,

    /// Rate increase per tick for the dominant axis during acceleration.
    pub acceleration_per_tick: f32,

    /// Tick index at which acceleration ends.
    pub accelerate_until: u32,

    /// Tick index at which deceleration begins.
    pub decelerate_after: u32,

    /// Cruise rate of the dominant axis in steps per second.
    pub maximum_rate: f32,

    /// Magnitude of the rate decrease per tick for the dominant axis during
    /// deceleration.
    pub deceleration_per_tick: f32,

    /// Total duration of the segment in ticks.
    pub total_move_ticks: u32,
}

impl<const MAX_AXES: usize> Segment<MAX_AXES> {
    /// Create a validated segment.
    ///
    /// # Errors
    ///
    /// Returns an error if every axis has a zero step count, or if the phase
    /// boundaries violate
    /// `accelerate_until <= decelerate_after <= total_move_ticks`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        steps: [u32; MAX_AXES],
        directions: [bool; MAX_AXES],
        initial_rate: f32,
        acceleration_per_tick: f32,
        accelerate_until: u32,
        decelerate_after: u32,
        maximum_rate: f32,
        deceleration_per_tick: f32,
        total_move_ticks: u32,
    ) -> Result<Self> {
        let segment = Self {
            steps,
            directions,
            initial_rate,
            acceleration_per_tick,
            accelerate_until,
            decelerate_after,
            maximum_rate,
            deceleration_per_tick,
            total_move_ticks,
        };
        segment.validate()?;
        Ok(segment)
    }

    /// Create a cruise-only segment: constant rate from the first tick to
    /// the last, no acceleration or deceleration phase.
    ///
    /// # Errors
    ///
    /// Returns an error if every axis has a zero step count.
    pub fn constant_rate(
        steps: [u32; MAX_AXES],
        directions: [bool; MAX_AXES],
        rate_steps_per_sec: f32,
        total_move_ticks: u32,
    ) -> Result<Self> {
        Self::new(
            steps,
            directions,
            rate_steps_per_sec,
            0.0,
            0,
            total_move_ticks,
            rate_steps_per_sec,
            0.0,
            total_move_ticks,
        )
    }

    /// Check the segment invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if every axis has a zero step count, or if the phase
    /// boundaries are out of order.
    pub fn validate(&self) -> Result<()> {
        if self.dominant_step_count() == 0 {
            return Err(SegmentError::NoSteps.into());
        }

        if self.accelerate_until > self.decelerate_after
            || self.decelerate_after > self.total_move_ticks
        {
            return Err(SegmentError::PhaseOutOfOrder {
                accelerate_until: self.accelerate_until,
                decelerate_after: self.decelerate_after,
                total_move_ticks: self.total_move_ticks,
            }
            .into());
        }

        Ok(())
    }

    /// The largest per-axis step count.
    ///
    /// Derived rather than stored: a stored value that disagreed with
    /// `steps` would silently corrupt every axis ratio.
    #[inline]
    pub fn dominant_step_count(&self) -> u32 {
        self.steps.iter().copied().max().unwrap_or(0)
    }
}
