//! Exercise profiles
//!
//! Everything that distinguishes one exercise from another lives here as
//! immutable configuration: which joints must be visible, which angle
//! drives the repetition cycle, where its thresholds sit, and which
//! structural constraints define acceptable form.

use serde::{Deserialize, Serialize};

use crate::analysis::{MovementDirection, RepPhase};
use crate::error::ProfileError;
use crate::pose::Joint;

use super::angle_spec::BilateralAngle;
use super::constraint::{FormConstraint, ViolationKind};

/// Fallback corrective message for violation kinds a profile carries no
/// constraint for.
const GENERIC_FORM_MESSAGE: &str = "Check your form";

/// Immutable configuration for one exercise kind.
///
/// Validated once via [`ExerciseProfile::validate`] before any session
/// starts; the per-frame path assumes a validated profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    pub name: String,

    /// Joints that must be present and above the confidence floor for a
    /// frame to be analyzed at all.
    pub required: Vec<Joint>,

    /// Minimum landmark confidence for any geometric read.
    pub confidence_floor: f64,

    /// The angle whose threshold crossings drive repetition counting.
    pub primary: BilateralAngle,

    /// Which way the primary angle travels when the body contracts.
    pub direction: MovementDirection,

    /// Crossing strictly past this (in the contract direction) enters the
    /// contracted phase.
    pub contract_threshold: f64,

    /// Crossing strictly back past this completes and counts a repetition.
    pub extend_threshold: f64,

    /// Required separation between the two thresholds. Noise smaller than
    /// this margin cannot produce a spurious double transition.
    pub min_threshold_gap: f64,

    /// The phase a rested body starts in.
    pub rest_phase: RepPhase,

    /// A cycle completing faster than this is rejected as degenerate
    /// motion and not counted.
    pub min_cycle_secs: f64,

    /// Moving-average window applied to the primary angle; 1 disables
    /// smoothing.
    pub smoothing_window: usize,

    /// Structural form checks, evaluated in order every frame.
    pub constraints: Vec<FormConstraint>,

    /// Message shown while required landmarks are missing or unreliable.
    pub low_confidence_message: String,

    /// Coaching prompt while extended (what to do next).
    pub extended_prompt: String,

    /// Coaching prompt while contracted.
    pub contracted_prompt: String,
}

impl ExerciseProfile {
    /// Check every construction-time invariant.
    ///
    /// A profile failing any of these could double-count, chatter, or
    /// validate form against unreliable landmarks, so sessions refuse to
    /// start with it.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ProfileError::ConfidenceFloorOutOfRange(
                self.confidence_floor,
            ));
        }

        for value in [self.contract_threshold, self.extend_threshold] {
            if !(0.0..=180.0).contains(&value) {
                return Err(ProfileError::ThresholdOutOfRange { value });
            }
        }

        // The gap is directional: the extend threshold must sit past the
        // contract threshold along the return direction of travel.
        let gap = match self.direction {
            MovementDirection::Decreasing => self.extend_threshold - self.contract_threshold,
            MovementDirection::Increasing => self.contract_threshold - self.extend_threshold,
        };
        if gap <= 0.0 || gap < self.min_threshold_gap {
            return Err(ProfileError::HysteresisGapTooNarrow {
                extend: self.extend_threshold,
                contract: self.contract_threshold,
                actual: gap,
                required: self.min_threshold_gap,
            });
        }

        for constraint in &self.constraints {
            for joint in constraint.rule.joints() {
                if !self.required.contains(&joint) {
                    return Err(ProfileError::ConstraintJointNotRequired { joint });
                }
            }
        }

        if self.smoothing_window == 0 {
            return Err(ProfileError::SmoothingWindowZero);
        }

        if self.min_cycle_secs < 0.0 {
            return Err(ProfileError::NegativeMinCycle(self.min_cycle_secs));
        }

        Ok(())
    }

    /// Corrective message for a violation kind.
    pub fn message_for(&self, kind: ViolationKind) -> &str {
        if kind == ViolationKind::MissingOrLowConfidenceLandmark {
            return &self.low_confidence_message;
        }
        self.constraints
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.message.as_str())
            .unwrap_or(GENERIC_FORM_MESSAGE)
    }

    /// Coaching prompt for the current phase.
    pub fn prompt_for(&self, phase: RepPhase) -> &str {
        match phase {
            RepPhase::Extended => &self.extended_prompt,
            RepPhase::Contracted => &self.contracted_prompt,
        }
    }

    /// The same exercise with every joint swapped to the opposite side,
    /// for subjects filmed from the other profile.
    pub fn mirrored(&self) -> Self {
        Self {
            name: self.name.clone(),
            required: self.required.iter().map(Joint::mirrored).collect(),
            primary: self.primary.mirrored(),
            constraints: self.constraints.iter().map(FormConstraint::mirrored).collect(),
            ..self.clone()
        }
    }
}
