//! Frame analysis - geometry, smoothing, validation, counting
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod counter;
mod smoothing;
mod validator;

pub use angles::{angle_at, distance, line_offset_ratio};
pub use counter::{MovementDirection, RepCounter, RepCounterState, RepEvent, RepPhase};
pub use smoothing::AngleSmoother;
pub use validator::{validate, ValidityVerdict};
