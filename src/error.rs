//! Profile configuration errors
//!
//! The only fallible path in the crate. Profiles are validated once, before
//! a session accepts its first frame; the per-frame path never errors.

use thiserror::Error;

use crate::pose::Joint;

/// Rejected profile configurations, reported at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// The extend/contract thresholds are closer than the profile's own
    /// hysteresis margin, so frame noise could oscillate across both.
    #[error(
        "hysteresis gap of {actual:.1}° between extend {extend:.1}° and contract {contract:.1}° is below the {required:.1}° margin"
    )]
    HysteresisGapTooNarrow {
        extend: f64,
        contract: f64,
        actual: f64,
        required: f64,
    },

    /// A threshold lies outside the measurable angle range.
    #[error("threshold {value:.1}° is outside the 0–180° angle range")]
    ThresholdOutOfRange { value: f64 },

    /// Confidence floor must be a proportion.
    #[error("confidence floor {0} is outside [0, 1]")]
    ConfidenceFloorOutOfRange(f64),

    /// A form constraint reads a joint the profile never requires, so the
    /// constraint could run on landmarks that skipped the confidence gate.
    #[error("constraint references {joint} which is not in the required joint set")]
    ConstraintJointNotRequired { joint: Joint },

    /// Smoothing over zero frames is undefined; window 1 disables smoothing.
    #[error("smoothing window must be at least 1")]
    SmoothingWindowZero,

    /// Negative rep spacing would reject every repetition.
    #[error("minimum cycle duration {0}s is negative")]
    NegativeMinCycle(f64),
}
