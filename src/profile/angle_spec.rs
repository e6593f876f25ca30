//! Primary-angle specification
//!
//! Describes *which* angle drives repetition counting for an exercise, as
//! data. Measurement happens against a [`Frame`] with the profile's
//! confidence floor applied to every landmark read.

use serde::{Deserialize, Serialize};

use crate::analysis::angle_at;
use crate::pose::{Frame, Joint};

/// Three joints forming an angle at `vertex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub first: Joint,
    pub vertex: Joint,
    pub last: Joint,
}

impl JointTriple {
    pub fn new(first: Joint, vertex: Joint, last: Joint) -> Self {
        Self { first, vertex, last }
    }

    /// Measure the angle, or `None` when any of the three joints is absent
    /// or below the confidence floor.
    pub fn resolve(&self, frame: &Frame, floor: f64) -> Option<f64> {
        let first = frame.confident_position(self.first, floor)?;
        let vertex = frame.confident_position(self.vertex, floor)?;
        let last = frame.confident_position(self.last, floor)?;
        Some(angle_at(first, vertex, last))
    }

    pub fn mirrored(&self) -> Self {
        Self {
            first: self.first.mirrored(),
            vertex: self.vertex.mirrored(),
            last: self.last.mirrored(),
        }
    }
}

/// How to measure one side's primary angle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AngleSpec {
    /// Angle at the vertex of a joint triple (e.g. shoulder–elbow–wrist).
    Joints(JointTriple),

    /// Angle of the base→tip segment against the horizontal, measured from
    /// the horizontal direction pointing away from `facing`.
    ///
    /// For a torso this reads ~0° lying flat, 90° upright, and past 90°
    /// when the trunk folds forward over the hips, independent of which
    /// way the subject faces and of image resolution.
    Incline {
        base: Joint,
        tip: Joint,
        facing: Joint,
    },
}

impl AngleSpec {
    /// Measure this angle on `frame`, gating every landmark read by
    /// `floor`. `None` when any needed joint is unavailable.
    pub fn resolve(&self, frame: &Frame, floor: f64) -> Option<f64> {
        match *self {
            AngleSpec::Joints(triple) => triple.resolve(frame, floor),
            AngleSpec::Incline { base, tip, facing } => {
                let base_p = frame.confident_position(base, floor)?;
                let tip_p = frame.confident_position(tip, floor)?;
                let facing_p = frame.confident_position(facing, floor)?;

                // Horizontal probe pointing away from the facing joint, so
                // the reading grows monotonically as the segment sweeps
                // from flat through vertical and beyond.
                let away = if base_p.0 >= facing_p.0 { 1.0 } else { -1.0 };
                let probe = (base_p.0 + away, base_p.1);
                Some(angle_at(tip_p, base_p, probe))
            }
        }
    }

    pub fn mirrored(&self) -> Self {
        match *self {
            AngleSpec::Joints(triple) => AngleSpec::Joints(triple.mirrored()),
            AngleSpec::Incline { base, tip, facing } => AngleSpec::Incline {
                base: base.mirrored(),
                tip: tip.mirrored(),
                facing: facing.mirrored(),
            },
        }
    }
}

/// Left/right pair of primary-angle specs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BilateralAngle {
    pub left: AngleSpec,
    pub right: AngleSpec,
}

/// Per-side measurements plus the value the counter consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngleReading {
    pub left: Option<f64>,
    pub right: Option<f64>,
    /// Average of both sides when visible, otherwise whichever side
    /// resolved; `None` when neither did.
    pub combined: Option<f64>,
}

impl BilateralAngle {
    pub fn new(left: AngleSpec, right: AngleSpec) -> Self {
        Self { left, right }
    }

    /// Measure both sides and combine them.
    pub fn resolve(&self, frame: &Frame, floor: f64) -> AngleReading {
        let left = self.left.resolve(frame, floor);
        let right = self.right.resolve(frame, floor);

        let combined = match (left, right) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        };

        AngleReading {
            left,
            right,
            combined,
        }
    }

    pub fn mirrored(&self) -> Self {
        Self {
            left: self.left.mirrored(),
            right: self.right.mirrored(),
        }
    }
}
