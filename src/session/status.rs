//! Session status - the per-frame output value
//!
//! Everything the presentation layer needs to render one frame's result:
//! phase, count, form verdict, coaching message, and the raw angles for an
//! optional skeleton overlay. The UI only ever reads this value; counting
//! state never leaves the session's ownership.

use serde::{Deserialize, Serialize};

use crate::analysis::RepPhase;
use crate::profile::{ExerciseProfile, ViolationKind};

/// Snapshot of the session after one processed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Current repetition phase.
    pub phase: RepPhase,
    /// Valid repetitions counted so far.
    pub count: u64,
    /// Whether the latest frame's form passed every structural check.
    pub is_form_valid: bool,
    /// Coaching text: a corrective message while form is broken, the
    /// current phase prompt otherwise.
    pub message: String,
    /// The smoothed primary angle the counter saw, when one was measurable.
    pub primary_angle: Option<f64>,
    /// Per-side raw measurements for overlay rendering.
    pub left_angle: Option<f64>,
    pub right_angle: Option<f64>,
    /// Violated constraints in profile order; empty while form is valid.
    pub violations: Vec<ViolationKind>,
}

impl SessionStatus {
    /// Status before any frame has been processed: at rest, zero count,
    /// prompting the first movement.
    pub fn initial(profile: &ExerciseProfile) -> Self {
        Self {
            phase: profile.rest_phase,
            count: 0,
            is_form_valid: true,
            message: profile.prompt_for(profile.rest_phase).to_string(),
            primary_angle: None,
            left_angle: None,
            right_angle: None,
            violations: Vec::new(),
        }
    }
}
