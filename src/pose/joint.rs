//! Joint identifiers and skeleton topology
//!
//! The closed set of anatomical points delivered by the pose source,
//! plus the connection table used for skeleton overlay rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named anatomical point tracked by the pose source.
///
/// The set is fixed: pose providers emit these 17 points (or a subset per
/// frame when parts of the body leave view).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// Every joint, in pose-source order.
pub const ALL_JOINTS: [Joint; 17] = [
    Joint::Nose,
    Joint::LeftEye,
    Joint::RightEye,
    Joint::LeftEar,
    Joint::RightEar,
    Joint::LeftShoulder,
    Joint::RightShoulder,
    Joint::LeftElbow,
    Joint::RightElbow,
    Joint::LeftWrist,
    Joint::RightWrist,
    Joint::LeftHip,
    Joint::RightHip,
    Joint::LeftKnee,
    Joint::RightKnee,
    Joint::LeftAnkle,
    Joint::RightAnkle,
];

/// Skeleton connections (pairs of joints) for overlay rendering.
pub const SKELETON_EDGES: [(Joint, Joint); 14] = [
    // Arms
    (Joint::LeftShoulder, Joint::LeftElbow),
    (Joint::LeftElbow, Joint::LeftWrist),
    (Joint::RightShoulder, Joint::RightElbow),
    (Joint::RightElbow, Joint::RightWrist),
    // Torso
    (Joint::LeftShoulder, Joint::RightShoulder),
    (Joint::LeftShoulder, Joint::LeftHip),
    (Joint::RightShoulder, Joint::RightHip),
    (Joint::LeftHip, Joint::RightHip),
    // Legs
    (Joint::LeftHip, Joint::LeftKnee),
    (Joint::LeftKnee, Joint::LeftAnkle),
    (Joint::RightHip, Joint::RightKnee),
    (Joint::RightKnee, Joint::RightAnkle),
    // Head
    (Joint::Nose, Joint::LeftEye),
    (Joint::Nose, Joint::RightEye),
];

impl Joint {
    /// Short label for logs and status text.
    pub fn name(&self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEye => "left eye",
            Joint::RightEye => "right eye",
            Joint::LeftEar => "left ear",
            Joint::RightEar => "right ear",
            Joint::LeftShoulder => "left shoulder",
            Joint::RightShoulder => "right shoulder",
            Joint::LeftElbow => "left elbow",
            Joint::RightElbow => "right elbow",
            Joint::LeftWrist => "left wrist",
            Joint::RightWrist => "right wrist",
            Joint::LeftHip => "left hip",
            Joint::RightHip => "right hip",
            Joint::LeftKnee => "left knee",
            Joint::RightKnee => "right knee",
            Joint::LeftAnkle => "left ankle",
            Joint::RightAnkle => "right ankle",
        }
    }

    /// The same joint on the opposite side of the body.
    ///
    /// Midline joints (nose) map to themselves. Used to mirror a whole
    /// profile for subjects facing the other way.
    pub fn mirrored(&self) -> Joint {
        match self {
            Joint::Nose => Joint::Nose,
            Joint::LeftEye => Joint::RightEye,
            Joint::RightEye => Joint::LeftEye,
            Joint::LeftEar => Joint::RightEar,
            Joint::RightEar => Joint::LeftEar,
            Joint::LeftShoulder => Joint::RightShoulder,
            Joint::RightShoulder => Joint::LeftShoulder,
            Joint::LeftElbow => Joint::RightElbow,
            Joint::RightElbow => Joint::LeftElbow,
            Joint::LeftWrist => Joint::RightWrist,
            Joint::RightWrist => Joint::LeftWrist,
            Joint::LeftHip => Joint::RightHip,
            Joint::RightHip => Joint::LeftHip,
            Joint::LeftKnee => Joint::RightKnee,
            Joint::RightKnee => Joint::LeftKnee,
            Joint::LeftAnkle => Joint::RightAnkle,
            Joint::RightAnkle => Joint::LeftAnkle,
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_is_involution() {
        for joint in ALL_JOINTS {
            assert_eq!(joint.mirrored().mirrored(), joint);
        }
    }

    #[test]
    fn test_midline_joints_self_mirror() {
        assert_eq!(Joint::Nose.mirrored(), Joint::Nose);
    }

    #[test]
    fn test_skeleton_edges_connect_distinct_joints() {
        for (a, b) in SKELETON_EDGES {
            assert_ne!(a, b);
        }
    }
}
