//! repform - form-validated exercise repetition counting
//!
//! Classifies repeated body motions from a stream of confidence-scored 2D
//! joint positions: per-frame geometric analysis plus a hysteresis state
//! machine that turns noisy landmarks into a monotone valid-rep count and
//! a live form verdict.
//!
//! The external pose source delivers a [`Frame`] per analyzed camera
//! image; an [`ExerciseSession`] built from an [`ExerciseProfile`] consumes
//! it and returns a [`SessionStatus`] for the presentation layer:
//!
//! ```
//! use repform::{builtin, ExerciseSession, Frame, Joint};
//!
//! let mut session = ExerciseSession::new(builtin::push_up()).unwrap();
//! session.start();
//!
//! let frame = Frame::new(0.0).with(Joint::LeftShoulder, 0.2, 0.5, 0.9);
//! let status = session.on_frame(&frame);
//! assert_eq!(status.count, 0);
//! ```
//!
//! Frame acquisition, pose estimation, and rendering are the caller's
//! concern; this crate is pure in-memory analysis.

mod analysis;
mod error;
mod pose;
mod profile;
mod session;

pub use analysis::{
    angle_at, validate, MovementDirection, RepCounter, RepCounterState, RepEvent, RepPhase,
    ValidityVerdict,
};
pub use error::ProfileError;
pub use pose::{Frame, Joint, LandmarkSample, ALL_JOINTS, SKELETON_EDGES};
pub use profile::{
    builtin, AngleReading, AngleSpec, BilateralAngle, ConstraintRule, ExerciseProfile,
    FormConstraint, JointTriple, ViolationKind,
};
pub use session::{ExerciseSession, SessionStatus};
