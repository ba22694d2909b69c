//! Multi-axis DDA stepping engine.

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::Vec;

use crate::config::TimingConfig;
use crate::driver::StepDriver;
use crate::error::{Error, RegistrationError};
use crate::segment::Segment;

use super::axis::{AxisTickState, SegmentInfo};
use super::pending::UnstepSet;
use super::timer::{reload_for_frequency, reload_for_pulse_width, TickTimer};

/// The per-tick multi-axis stepping engine.
///
/// Generic over:
/// - `P`: primary tick timer (must implement [`TickTimer`])
/// - `U`: pulse-trailer timer (must implement [`TickTimer`])
/// - `D`: per-axis actuator driver (must implement [`StepDriver`])
/// - `MAX_AXES`: axis capacity, fixed at compile time (at most 32)
///
/// One instance is constructed at startup and owns everything: both hardware
/// timers, the registered drivers, and one DDA accumulator per axis. The
/// interrupt vector trampolines hold a handle to it and forward to
/// [`tick`](Self::tick), [`unstep_tick`](Self::unstep_tick), and
/// [`completion_tick`](Self::completion_tick) — highest priority first. All
/// three are run-to-completion: no locks, no allocation, no unbounded work.
///
/// Per-axis state is mutated only inside `tick()`. The pending-unstep set and
/// the completion counter are the two points shared across priority levels
/// and each is a single atomic word.
pub struct StepTicker<P, U, D, const MAX_AXES: usize>
where
    P: TickTimer,
    U: TickTimer,
    D: StepDriver,
{
    /// Primary tick timer: fires once per step tick.
    primary: P,

    /// Pulse-trailer timer: armed reactively, fires once per arming.
    trailer: U,

    /// Input clock of both timers in Hz.
    timer_clock_hz: u32,

    /// Step tick frequency in Hz.
    frequency: f32,

    /// Registered axis drivers, in registration order.
    drivers: Vec<D, MAX_AXES>,

    /// Per-axis DDA state, indexed like `drivers`.
    tick_info: [AxisTickState; MAX_AXES],

    /// Profile snapshot of the active segment.
    segment_info: SegmentInfo,

    /// Tick counter within the active segment. Reset to zero at handoff.
    current_tick: u32,

    /// Whether a segment is currently being executed.
    move_active: bool,

    /// Staged-next-segment slot, capacity one, last-writer-wins.
    staged: Option<Segment<MAX_AXES>>,

    /// Axes stepped this tick, awaiting their trailing edge.
    pending_unstep: UnstepSet,

    /// Completions raised but not yet delivered by `completion_tick`.
    completions: AtomicU32,

    /// Planner callback invoked once per finished segment.
    completion_callback: Option<fn()>,
}

impl<P, U, D, const MAX_AXES: usize> StepTicker<P, U, D, MAX_AXES>
where
    P: TickTimer,
    U: TickTimer,
    D: StepDriver,
{
    const AXES_FIT_BITMASK: () = assert!(MAX_AXES <= 32, "at most 32 axes per ticker");

    /// Create the engine and install the configured timer periods.
    ///
    /// No ticking happens until [`start`](Self::start). The configuration is
    /// trusted here; run [`validate_config`](crate::config::validate_config)
    /// on it first.
    pub fn new(primary: P, trailer: U, config: &TimingConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::AXES_FIT_BITMASK;

        let mut ticker = Self {
            primary,
            trailer,
            timer_clock_hz: config.timer_clock_hz,
            frequency: config.tick_frequency_hz,
            drivers: Vec::new(),
            tick_info: [AxisTickState::default(); MAX_AXES],
            segment_info: SegmentInfo::default(),
            current_tick: 0,
            move_active: false,
            staged: None,
            pending_unstep: UnstepSet::new(),
            completions: AtomicU32::new(0),
            completion_callback: None,
        };
        ticker.set_tick_frequency(config.tick_frequency_hz);
        ticker.set_pulse_width(config.pulse_width_us);
        ticker
    }

    /// Register an axis driver, returning its index.
    ///
    /// Configuration-time only. Axes are processed in registration order each
    /// tick.
    ///
    /// # Errors
    ///
    /// Once all `MAX_AXES` slots are taken, returns
    /// [`RegistrationError::CapacityExceeded`] together with the rejected
    /// driver, so the caller keeps its hardware handles. This is a fatal
    /// startup condition, not something to retry at runtime.
    pub fn register_axis(&mut self, driver: D) -> core::result::Result<usize, (D, Error)> {
        match self.drivers.push(driver) {
            Ok(()) => Ok(self.drivers.len() - 1),
            Err(driver) => Err((
                driver,
                RegistrationError::CapacityExceeded { capacity: MAX_AXES }.into(),
            )),
        }
    }

    /// Set the step tick frequency in Hz.
    ///
    /// Installs `floor(timer_clock / hz)` as the primary timer's reload
    /// value. If the timer has already counted past the new reload, it is
    /// force-restarted so the new period takes effect now instead of after a
    /// stale wraparound.
    pub fn set_tick_frequency(&mut self, hz: f32) {
        self.frequency = hz;
        let period = reload_for_frequency(self.timer_clock_hz, hz);
        self.primary.set_reload(period);
        if self.primary.current_count() > period {
            self.primary.restart();
        }
    }

    /// Set the step pulse width in microseconds.
    pub fn set_pulse_width(&mut self, microseconds: f32) {
        self.trailer
            .set_reload(reload_for_pulse_width(self.timer_clock_hz, microseconds));
    }

    /// Enable both timer interrupt sources. Irreversible.
    pub fn start(&mut self) {
        self.primary.enable();
        self.trailer.enable();
    }

    /// Stage a segment for execution.
    ///
    /// Callable from any context the integrator's handle discipline allows,
    /// including the completion callback. The slot holds exactly one segment:
    /// a second call before the engine consumes the first overwrites it,
    /// last-writer-wins.
    pub fn submit_next_segment(&mut self, segment: Segment<MAX_AXES>) {
        self.staged = Some(segment);
    }

    /// Register the callback invoked by [`completion_tick`](Self::completion_tick)
    /// once per finished segment.
    pub fn on_segment_complete(&mut self, callback: fn()) {
        self.completion_callback = Some(callback);
    }

    /// Primary tick handler. Runs once per primary timer period at the
    /// highest priority level.
    ///
    /// For every active axis: applies the rate delta, handles phase
    /// transitions at the axis's `next_rate_change_tick`, advances the DDA
    /// accumulator, and emits a step pulse when it crosses 1.0. Axes that
    /// reach their step target go inactive individually. When no axis
    /// remains active, the staged segment (if any) is promoted in the same
    /// invocation so no tick is lost between segments.
    ///
    /// Returns `true` when a deferred completion was raised; the trampoline
    /// must then pend its lowest-priority software interrupt to run
    /// [`completion_tick`](Self::completion_tick).
    #[must_use]
    pub fn tick(&mut self) -> bool {
        if !self.move_active {
            // idle pickup: stepping begins on the next tick
            if let Some(segment) = self.staged.take() {
                self.copy_in(&segment);
            }
            return false;
        }

        self.current_tick += 1;
        let current_tick = self.current_tick;

        let mut still_moving = false;

        for m in 0..self.drivers.len() {
            let state = &mut self.tick_info[m];
            if state.steps_to_move == 0 {
                continue;
            }

            still_moving = true;
            state.rate += state.rate_delta_per_tick;

            if current_tick == state.next_rate_change_tick {
                if current_tick == self.segment_info.accelerate_until {
                    // done accelerating: plateau
                    state.rate_delta_per_tick = 0.0;
                    if self.segment_info.decelerate_after < self.segment_info.total_move_ticks {
                        state.next_rate_change_tick = self.segment_info.decelerate_after;
                        if current_tick != self.segment_info.decelerate_after {
                            state.rate =
                                (self.segment_info.maximum_rate * state.axis_ratio) / self.frequency;
                        }
                    }
                }

                if current_tick == self.segment_info.decelerate_after {
                    state.rate_delta_per_tick =
                        -self.segment_info.deceleration_per_tick * state.axis_ratio;
                }
            }

            // a rate that rounds below zero still owes its in-flight step
            if state.rate <= 0.0 {
                state.accumulator = 1.0;
                state.rate = 0.0;
            }

            state.accumulator += state.rate;

            if state.accumulator >= 1.0 {
                state.accumulator -= 1.0;
                state.steps_done += 1;

                self.drivers[m].step();
                self.pending_unstep.insert(m);

                if state.steps_done == state.steps_to_move {
                    state.steps_to_move = 0;
                }
            }
        }

        // the trailing edge measures from the most recent step assertion
        if !self.pending_unstep.is_empty() {
            self.trailer.restart();
        }

        if still_moving {
            return false;
        }

        // segment boundary: promote the staged segment here so there is no
        // gap in ticks
        self.current_tick = 0;
        if let Some(segment) = self.staged.take() {
            self.copy_in(&segment);
        } else {
            self.move_active = false;
        }

        self.completions.fetch_add(1, Ordering::Release);
        true
    }

    /// Pulse-trailer handler. Runs once per armed trailer period at the
    /// middle priority level.
    ///
    /// Deasserts the step line of every pending axis and clears the set.
    ///
    /// Known race: if the next primary tick fires before this handler has,
    /// the pending set is drained late and a pulse can be shortened or lost.
    /// This is acceptable only while the pulse width is well below the tick
    /// period — [`validate_config`](crate::config::validate_config) rejects
    /// configurations that violate it.
    pub fn unstep_tick(&mut self) {
        let mask = self.pending_unstep.take();
        if mask == 0 {
            return;
        }
        for (m, driver) in self.drivers.iter_mut().enumerate() {
            if mask & (1 << m) != 0 {
                driver.unstep();
            }
        }
    }

    /// Deferred completion handler. Runs at the lowest priority level, only
    /// after the primary handler has exited.
    ///
    /// Consumes one pending completion and, if one was pending, invokes the
    /// registered callback. Completions that pile up before this runs are
    /// coalesced into the counter and delivered one per invocation — never
    /// lost, never over-delivered.
    pub fn completion_tick(&mut self) {
        if self.completions.load(Ordering::Acquire) > 0 {
            self.completions.fetch_sub(1, Ordering::AcqRel);
            if let Some(callback) = self.completion_callback {
                callback();
            }
        }
    }

    /// Abort the active move immediately.
    ///
    /// Deactivates every axis mid-segment, drops the active and staged
    /// segments, and deasserts any step line still pending its trailing
    /// edge. Steps already emitted stay emitted; no completion notification
    /// is raised. Must be called with the same handle discipline as the tick
    /// handlers.
    pub fn abort(&mut self) {
        self.staged = None;
        self.move_active = false;
        self.current_tick = 0;
        for state in self.tick_info.iter_mut() {
            state.steps_to_move = 0;
            state.rate = 0.0;
            state.rate_delta_per_tick = 0.0;
        }
        self.unstep_tick();
    }

    /// Snapshot a staged segment into the per-axis tick states and mark it
    /// active. Runs inside the promoting tick, never from external callers.
    fn copy_in(&mut self, segment: &Segment<MAX_AXES>) {
        self.segment_info = SegmentInfo {
            accelerate_until: segment.accelerate_until,
            decelerate_after: segment.decelerate_after,
            maximum_rate: segment.maximum_rate,
            deceleration_per_tick: segment.deceleration_per_tick,
            total_move_ticks: segment.total_move_ticks,
        };

        let dominant = segment.dominant_step_count();
        if dominant == 0 {
            // an all-zero segment would poison every axis ratio; stay idle
            for state in self.tick_info.iter_mut() {
                state.steps_to_move = 0;
            }
            self.move_active = false;
            return;
        }
        let inv = 1.0 / dominant as f32;

        for m in 0..self.drivers.len() {
            let steps = segment.steps[m];
            let state = &mut self.tick_info[m];
            state.steps_to_move = steps;
            if steps == 0 {
                continue;
            }

            self.drivers[m].set_direction(segment.directions[m]);

            let aratio = inv * steps as f32;
            state.rate = (segment.initial_rate * aratio) / self.frequency;
            state.accumulator = 0.0;
            state.axis_ratio = aratio;
            state.steps_done = 0;

            state.next_rate_change_tick = segment.total_move_ticks + 1;
            state.rate_delta_per_tick = 0.0;
            if segment.accelerate_until != 0 {
                // next rate event is the end of acceleration
                state.next_rate_change_tick = segment.accelerate_until;
                state.rate_delta_per_tick = segment.acceleration_per_tick;
            } else if segment.decelerate_after == 0 {
                // we start off decelerating
                state.rate_delta_per_tick = -segment.deceleration_per_tick;
            } else if segment.decelerate_after != segment.total_move_ticks {
                state.next_rate_change_tick = segment.decelerate_after;
            }
            state.rate_delta_per_tick *= aratio;
        }

        self.move_active = true;
    }

    /// Whether a segment is currently being executed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.move_active
    }

    /// Tick counter within the active segment.
    #[inline]
    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    /// Configured step tick frequency in Hz.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Number of registered axes.
    #[inline]
    pub fn axis_count(&self) -> usize {
        self.drivers.len()
    }

    /// DDA state of a registered axis.
    #[inline]
    pub fn axis_state(&self, index: usize) -> Option<&AxisTickState> {
        if index < self.drivers.len() {
            self.tick_info.get(index)
        } else {
            None
        }
    }

    /// Profile snapshot of the active segment.
    #[inline]
    pub fn segment_info(&self) -> &SegmentInfo {
        &self.segment_info
    }

    /// Driver of a registered axis.
    #[inline]
    pub fn driver(&self, index: usize) -> Option<&D> {
        self.drivers.get(index)
    }

    /// Completions raised but not yet delivered.
    #[inline]
    pub fn pending_completions(&self) -> u32 {
        self.completions.load(Ordering::Acquire)
    }
}
