//! # step-ticker
//!
//! Deterministic multi-axis step pulse generation with embedded-hal 1.0
//! support.
//!
//! This crate is the timing-critical heart of a motion controller: a
//! fixed-rate stepping engine that, on every timer tick, runs one
//! digital-differential-analyzer accumulator per axis, applies the active
//! segment's trapezoidal acceleration profile, emits step pulses, schedules
//! their trailing edges, and hands off between queued segments without
//! losing a tick. Path planning, G-code parsing, and homing live elsewhere —
//! the engine only executes fully-planned [`Segment`]s.
//!
//! ## Features
//!
//! - **Allocation-free**: fixed axis capacity, `heapless` collections, no
//!   locks in any handler
//! - **embedded-hal 1.0**: `OutputPin`-based STEP/DIR driver included
//! - **no_std compatible**: core library works without the standard library
//! - **Multi-axis synchronization**: every axis finishes its step count in
//!   the same tick budget, scaled by its ratio to the dominant axis
//! - **Checked configuration**: timing and axis-capacity mistakes fail at
//!   startup, not mid-move
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use step_ticker::{Segment, StepDirPins, StepTicker, TimingConfig};
//!
//! let config = step_ticker::load_config("ticker.toml")?;
//! step_ticker::validate_config(&config)?;
//!
//! let mut ticker: StepTicker<_, _, _, 4> =
//!     StepTicker::new(tick_timer, trailer_timer, &config);
//! let x = ticker
//!     .register_axis(StepDirPins::new(x_step, x_dir))
//!     .map_err(|(_, e)| e)?;
//! ticker.on_segment_complete(|| planner_wake());
//! ticker.start();
//!
//! // from the planner:
//! ticker.submit_next_segment(segment);
//!
//! // from the interrupt trampolines, highest priority first:
//! if ticker.tick() { pend_completion_irq(); }
//! ticker.unstep_tick();
//! ticker.completion_tick();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod segment;
pub mod ticker;

// Re-exports for ergonomic API
pub use config::{validate_config, TimingConfig};
pub use driver::{StepDirPins, StepDriver};
pub use error::{Error, Result};
pub use segment::Segment;
pub use ticker::{AxisTickState, SegmentInfo, StepTicker, TickTimer};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
