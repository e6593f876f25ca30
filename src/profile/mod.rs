//! Exercise configuration - profiles, angle specs, form constraints
//!
//! Re-exports only. All logic in submodules.

mod angle_spec;
mod constraint;
mod exercise;

pub mod builtin;

pub use angle_spec::{AngleReading, AngleSpec, BilateralAngle, JointTriple};
pub use constraint::{ConstraintRule, FormConstraint, ViolationKind};
pub use exercise::ExerciseProfile;
