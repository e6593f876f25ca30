//! Form constraints as data
//!
//! Structural correctness checks an exercise imposes on the body beyond the
//! primary movement angle. Each constraint is a data value; adding an
//! exercise means writing new values, never new code paths.

use serde::{Deserialize, Serialize};

use crate::analysis::{distance, line_offset_ratio};
use crate::pose::{Frame, Joint};

use super::angle_spec::JointTriple;

/// Categories of form failure reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A required joint was absent from the frame or below the confidence
    /// floor. Always reported alone; no structural checks run without
    /// reliable landmarks.
    MissingOrLowConfidenceLandmark,
    /// A secondary angle left its valid range (e.g. sagging or piked body
    /// line, over- or under-bent knees).
    SecondaryAngleOutOfRange,
    /// A joint sits too close to its reference (e.g. hips dropped to the
    /// floor).
    InsufficientElevation,
    /// A joint drifted off its alignment line (e.g. craned neck).
    AlignmentOutOfTolerance,
}

/// One structural rule, evaluated independently per frame.
///
/// All distance-like parameters are ratios against a body-scale segment, so
/// rules hold at any image resolution or subject distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConstraintRule {
    /// The triple's angle must lie within [min_degrees, max_degrees].
    AngleWithin {
        triple: JointTriple,
        min_degrees: f64,
        max_degrees: f64,
    },

    /// `joint` must sit above `reference` (image y grows downward) by more
    /// than `min_ratio` times the length of the `scale` segment.
    MinElevation {
        joint: Joint,
        reference: Joint,
        scale: (Joint, Joint),
        min_ratio: f64,
    },

    /// `joint` must lie within `max_offset_ratio` line-lengths of the line
    /// through the two `line` joints.
    LineAlignment {
        joint: Joint,
        line: (Joint, Joint),
        max_offset_ratio: f64,
    },
}

impl ConstraintRule {
    /// Whether the frame satisfies this rule.
    ///
    /// Runs only after the validator has confirmed every required joint, so
    /// landmark reads cannot fail here; an unreadable or degenerate input
    /// counts as satisfied rather than inventing a violation.
    pub fn is_satisfied(&self, frame: &Frame, floor: f64) -> bool {
        match *self {
            ConstraintRule::AngleWithin {
                triple,
                min_degrees,
                max_degrees,
            } => match triple.resolve(frame, floor) {
                Some(angle) => angle >= min_degrees && angle <= max_degrees,
                None => true,
            },

            ConstraintRule::MinElevation {
                joint,
                reference,
                scale,
                min_ratio,
            } => {
                let (Some(joint_p), Some(ref_p), Some(a), Some(b)) = (
                    frame.confident_position(joint, floor),
                    frame.confident_position(reference, floor),
                    frame.confident_position(scale.0, floor),
                    frame.confident_position(scale.1, floor),
                ) else {
                    return true;
                };

                let scale_len = distance(a, b);
                if scale_len <= 0.0 {
                    return true;
                }
                // y grows downward: elevated means a smaller y than the
                // reference.
                (ref_p.1 - joint_p.1) / scale_len > min_ratio
            }

            ConstraintRule::LineAlignment {
                joint,
                line,
                max_offset_ratio,
            } => {
                let (Some(point), Some(a), Some(b)) = (
                    frame.confident_position(joint, floor),
                    frame.confident_position(line.0, floor),
                    frame.confident_position(line.1, floor),
                ) else {
                    return true;
                };

                match line_offset_ratio(point, a, b) {
                    Some(ratio) => ratio <= max_offset_ratio,
                    None => true,
                }
            }
        }
    }

    /// Every joint this rule reads. Profile validation checks these against
    /// the required set.
    pub fn joints(&self) -> Vec<Joint> {
        match *self {
            ConstraintRule::AngleWithin { triple, .. } => {
                vec![triple.first, triple.vertex, triple.last]
            }
            ConstraintRule::MinElevation {
                joint,
                reference,
                scale,
                ..
            } => vec![joint, reference, scale.0, scale.1],
            ConstraintRule::LineAlignment { joint, line, .. } => {
                vec![joint, line.0, line.1]
            }
        }
    }

    pub fn mirrored(&self) -> Self {
        match *self {
            ConstraintRule::AngleWithin {
                triple,
                min_degrees,
                max_degrees,
            } => ConstraintRule::AngleWithin {
                triple: triple.mirrored(),
                min_degrees,
                max_degrees,
            },
            ConstraintRule::MinElevation {
                joint,
                reference,
                scale,
                min_ratio,
            } => ConstraintRule::MinElevation {
                joint: joint.mirrored(),
                reference: reference.mirrored(),
                scale: (scale.0.mirrored(), scale.1.mirrored()),
                min_ratio,
            },
            ConstraintRule::LineAlignment {
                joint,
                line,
                max_offset_ratio,
            } => ConstraintRule::LineAlignment {
                joint: joint.mirrored(),
                line: (line.0.mirrored(), line.1.mirrored()),
                max_offset_ratio,
            },
        }
    }
}

/// A rule plus how its failure is reported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormConstraint {
    pub rule: ConstraintRule,
    pub kind: ViolationKind,
    /// Corrective message surfaced while this constraint is violated.
    pub message: String,
}

impl FormConstraint {
    pub fn new(rule: ConstraintRule, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            rule,
            kind,
            message: message.into(),
        }
    }

    pub fn mirrored(&self) -> Self {
        Self {
            rule: self.rule.mirrored(),
            kind: self.kind,
            message: self.message.clone(),
        }
    }
}
