//! Form validation
//!
//! Turns one frame plus one profile into a verdict: is the body
//! configuration acceptable for this exercise right now, and if not, why.
//! Pure; the caller decides how and whether to surface the violations.

use serde::{Deserialize, Serialize};

use crate::pose::Frame;
use crate::profile::{ExerciseProfile, ViolationKind};

/// Per-frame form verdict. Recomputed every frame, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityVerdict {
    /// Conjunction of every structural constraint (false as well when the
    /// landmark gate short-circuited).
    pub is_valid: bool,
    /// Violated constraints in profile order; empty when valid.
    pub violations: Vec<ViolationKind>,
}

impl ValidityVerdict {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violations: Vec::new(),
        }
    }

    pub fn invalid(violations: Vec<ViolationKind>) -> Self {
        Self {
            is_valid: false,
            violations,
        }
    }

    /// The violation that drives the status message.
    pub fn first_violation(&self) -> Option<ViolationKind> {
        self.violations.first().copied()
    }
}

/// Validate a frame against a profile.
///
/// A required joint that is absent or below the confidence floor
/// short-circuits the whole check: no structural constraint runs on
/// unreliable geometry, and the single reported violation is
/// [`ViolationKind::MissingOrLowConfidenceLandmark`]. Otherwise every
/// constraint is evaluated independently and each failure appends its
/// violation kind.
pub fn validate(frame: &Frame, profile: &ExerciseProfile) -> ValidityVerdict {
    let floor = profile.confidence_floor;

    for &joint in &profile.required {
        if frame.confident_position(joint, floor).is_none() {
            return ValidityVerdict::invalid(vec![
                ViolationKind::MissingOrLowConfidenceLandmark,
            ]);
        }
    }

    let violations: Vec<ViolationKind> = profile
        .constraints
        .iter()
        .filter(|c| !c.rule.is_satisfied(frame, floor))
        .map(|c| c.kind)
        .collect();

    if violations.is_empty() {
        ValidityVerdict::valid()
    } else {
        ValidityVerdict::invalid(violations)
    }
}
