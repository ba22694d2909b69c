//! The per-tick multi-axis stepping core.
//!
//! [`StepTicker`] owns the primary tick timer, the pulse-trailer timer, and
//! one DDA accumulator per registered axis. Its three handler entry points
//! map onto the three interrupt priority levels of the deployment, highest
//! first: [`StepTicker::tick`], [`StepTicker::unstep_tick`],
//! [`StepTicker::completion_tick`].

mod axis;
mod engine;
mod pending;
mod timer;

pub use axis::{AxisTickState, SegmentInfo};
pub use engine::StepTicker;
pub use timer::TickTimer;
