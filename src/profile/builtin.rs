//! Built-in exercise profiles
//!
//! Tuned profile values for the supported exercises. Left-side joints are
//! the canonical choice for side-on filming; [`ExerciseProfile::mirrored`]
//! covers subjects facing the other way.

use crate::analysis::{MovementDirection, RepPhase};
use crate::pose::Joint;

use super::angle_spec::{AngleSpec, BilateralAngle, JointTriple};
use super::constraint::{ConstraintRule, FormConstraint, ViolationKind};
use super::exercise::ExerciseProfile;

/// Push-up: elbow angle sweeps from straight (~180°) down past 90° and
/// back above 160° for one repetition. Form requires a straight body line
/// with the hips held off the floor.
pub fn push_up() -> ExerciseProfile {
    ExerciseProfile {
        name: "push-up".to_string(),
        required: vec![
            Joint::LeftShoulder,
            Joint::LeftElbow,
            Joint::LeftWrist,
            Joint::LeftHip,
            Joint::LeftKnee,
            Joint::LeftAnkle,
        ],
        confidence_floor: 0.25,
        primary: BilateralAngle::new(
            AngleSpec::Joints(JointTriple::new(
                Joint::LeftShoulder,
                Joint::LeftElbow,
                Joint::LeftWrist,
            )),
            AngleSpec::Joints(JointTriple::new(
                Joint::RightShoulder,
                Joint::RightElbow,
                Joint::RightWrist,
            )),
        ),
        direction: MovementDirection::Decreasing,
        contract_threshold: 90.0,
        extend_threshold: 160.0,
        min_threshold_gap: 70.0,
        rest_phase: RepPhase::Extended,
        min_cycle_secs: 0.4,
        smoothing_window: 3,
        constraints: vec![
            FormConstraint::new(
                ConstraintRule::AngleWithin {
                    triple: JointTriple::new(
                        Joint::LeftShoulder,
                        Joint::LeftHip,
                        Joint::LeftKnee,
                    ),
                    min_degrees: 150.0,
                    max_degrees: 210.0,
                },
                ViolationKind::SecondaryAngleOutOfRange,
                "Keep your body in a straight line",
            ),
            FormConstraint::new(
                ConstraintRule::MinElevation {
                    joint: Joint::LeftHip,
                    reference: Joint::LeftAnkle,
                    scale: (Joint::LeftShoulder, Joint::LeftHip),
                    min_ratio: 0.05,
                },
                ViolationKind::InsufficientElevation,
                "Lift your hips off the floor",
            ),
        ],
        low_confidence_message: "Move into full view of the camera".to_string(),
        extended_prompt: "Lower your chest".to_string(),
        contracted_prompt: "Push back up".to_string(),
    }
}

/// Sit-up: torso incline sweeps from lying (<45°) up past 90° and back
/// for one repetition. Form requires bent knees and the head moving with
/// the torso rather than craning toward the knees.
pub fn sit_up() -> ExerciseProfile {
    ExerciseProfile {
        name: "sit-up".to_string(),
        required: vec![
            Joint::Nose,
            Joint::LeftShoulder,
            Joint::LeftHip,
            Joint::LeftKnee,
            Joint::LeftAnkle,
        ],
        confidence_floor: 0.3,
        primary: BilateralAngle::new(
            AngleSpec::Incline {
                base: Joint::LeftHip,
                tip: Joint::LeftShoulder,
                facing: Joint::LeftAnkle,
            },
            AngleSpec::Incline {
                base: Joint::RightHip,
                tip: Joint::RightShoulder,
                facing: Joint::RightAnkle,
            },
        ),
        direction: MovementDirection::Increasing,
        contract_threshold: 90.0,
        extend_threshold: 45.0,
        min_threshold_gap: 25.0,
        rest_phase: RepPhase::Extended,
        min_cycle_secs: 0.6,
        smoothing_window: 3,
        constraints: vec![
            FormConstraint::new(
                ConstraintRule::AngleWithin {
                    triple: JointTriple::new(Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
                    min_degrees: 60.0,
                    max_degrees: 120.0,
                },
                ViolationKind::SecondaryAngleOutOfRange,
                "Keep your knees bent",
            ),
            FormConstraint::new(
                ConstraintRule::LineAlignment {
                    joint: Joint::Nose,
                    line: (Joint::LeftShoulder, Joint::LeftHip),
                    max_offset_ratio: 0.35,
                },
                ViolationKind::AlignmentOutOfTolerance,
                "Keep your head in line with your torso",
            ),
        ],
        low_confidence_message: "Move into full view of the camera".to_string(),
        extended_prompt: "Sit up".to_string(),
        contracted_prompt: "Lower back down".to_string(),
    }
}
