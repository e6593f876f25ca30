//! Landmark frames
//!
//! One time-stamped snapshot of the joints the pose source could see.
//! Frames are built once per analyzed camera frame, read by the validator
//! and session, and discarded; nothing here is mutated after construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::joint::Joint;

/// One tracked point: image-space position plus detection confidence.
///
/// Positions may be raw pixels or pre-scaled to a normalized space; the
/// analysis is scale-invariant either way.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSample {
    /// (x, y) with y growing downward, as delivered by the pose source.
    pub position: (f64, f64),
    /// Detection confidence in [0, 1].
    pub confidence: f64,
}

impl LandmarkSample {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            position: (x, y),
            confidence,
        }
    }
}

/// A partial mapping from joint to sample at one instant.
///
/// Joints the pose source lost (out of frame, occluded) are simply absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Capture time in seconds, monotonic within a session.
    pub timestamp_secs: f64,
    samples: HashMap<Joint, LandmarkSample>,
}

impl Frame {
    /// Empty frame at the given capture time.
    pub fn new(timestamp_secs: f64) -> Self {
        Self {
            timestamp_secs,
            samples: HashMap::new(),
        }
    }

    /// Record a joint sample. Last write per joint wins during construction.
    pub fn set(&mut self, joint: Joint, sample: LandmarkSample) {
        self.samples.insert(joint, sample);
    }

    /// Builder-style variant of [`Frame::set`] for test and caller ergonomics.
    pub fn with(mut self, joint: Joint, x: f64, y: f64, confidence: f64) -> Self {
        self.set(joint, LandmarkSample::new(x, y, confidence));
        self
    }

    /// Raw sample for a joint, if the pose source saw it at all.
    pub fn sample(&self, joint: Joint) -> Option<&LandmarkSample> {
        self.samples.get(&joint)
    }

    pub fn has(&self, joint: Joint) -> bool {
        self.samples.contains_key(&joint)
    }

    /// Position of a joint, gated by the confidence floor.
    ///
    /// Returns `None` when the joint is absent or its confidence is below
    /// `floor`. This is the single gate every geometric read goes through.
    pub fn confident_position(&self, joint: Joint, floor: f64) -> Option<(f64, f64)> {
        self.samples
            .get(&joint)
            .filter(|s| s.confidence >= floor)
            .map(|s| s.position)
    }

    /// Number of joints present in this frame.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
