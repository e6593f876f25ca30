//! Exercise session - the per-frame façade
//!
//! Composes the validator, geometry, smoother, and rep counter: one call
//! per incoming frame, one status value out. Owns all mutable state for
//! one subject doing one exercise; the caller drives it frame-synchronously.

use tracing::{debug, info, warn};

use crate::analysis::{validate, AngleSmoother, RepCounter, RepEvent};
use crate::error::ProfileError;
use crate::pose::Frame;
use crate::profile::ExerciseProfile;

use super::status::SessionStatus;

/// One subject, one exercise, one stream of frames.
///
/// Created stopped; [`ExerciseSession::start`] resets the counter and
/// begins accepting frames. The per-frame path is total: `on_frame` always
/// returns a status and never fails, whatever the frame contains.
pub struct ExerciseSession {
    profile: ExerciseProfile,
    counter: RepCounter,
    smoother: AngleSmoother,
    running: bool,
    status: SessionStatus,
}

impl ExerciseSession {
    /// Build a session around a profile, validating it first.
    ///
    /// Profile problems are fatal here, before any frame is accepted,
    /// never at per-frame time.
    pub fn new(profile: ExerciseProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        let counter = RepCounter::new(&profile);
        let smoother = AngleSmoother::new(profile.smoothing_window);
        let status = SessionStatus::initial(&profile);
        Ok(Self {
            profile,
            counter,
            smoother,
            running: false,
            status,
        })
    }

    pub fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin (or restart) counting. Always resets the counter, smoother,
    /// and status.
    pub fn start(&mut self) {
        self.reset();
        self.running = true;
        info!(exercise = %self.profile.name, "session started");
    }

    /// Stop accepting frames. Counting state is preserved until the next
    /// start or reset.
    pub fn stop(&mut self) {
        self.running = false;
        info!(
            exercise = %self.profile.name,
            count = self.status.count,
            "session stopped"
        );
    }

    /// Zero the count and return to the rest phase.
    pub fn reset(&mut self) {
        self.counter.reset();
        self.smoother.clear();
        self.status = SessionStatus::initial(&self.profile);
    }

    /// Latest status without processing anything.
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Process one frame and return the updated status.
    ///
    /// Frames arriving while the session is stopped are ignored; the
    /// previous status is returned unchanged.
    pub fn on_frame(&mut self, frame: &Frame) -> SessionStatus {
        if !self.running {
            return self.status.clone();
        }

        let verdict = validate(frame, &self.profile);
        let reading = self
            .profile
            .primary
            .resolve(frame, self.profile.confidence_floor);

        let mut counter_angle = None;
        if let Some(raw) = reading.combined {
            if raw == 0.0 {
                // 0° from landmarks that passed the confidence gate means
                // degenerate geometry, not a real joint position. Log it
                // and keep it away from the state machine.
                warn!(
                    timestamp_secs = frame.timestamp_secs,
                    "primary angle read 0° despite confident landmarks"
                );
            } else {
                let angle = self.smoother.push(raw);
                let event = self
                    .counter
                    .tick(frame.timestamp_secs, angle, verdict.is_valid);
                if event == RepEvent::RepCompleted {
                    debug!(count = self.counter.count(), "repetition accepted");
                }
                counter_angle = Some(angle);
            }
        }

        let message = match verdict.first_violation() {
            Some(kind) => self.profile.message_for(kind).to_string(),
            None => self.profile.prompt_for(self.counter.phase()).to_string(),
        };

        self.status = SessionStatus {
            phase: self.counter.phase(),
            count: self.counter.count(),
            is_form_valid: verdict.is_valid,
            message,
            primary_angle: counter_angle,
            left_angle: reading.left,
            right_angle: reading.right,
            violations: verdict.violations,
        };
        self.status.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RepPhase;
    use crate::pose::Joint;
    use crate::profile::{builtin, ViolationKind};

    /// Side-on push-up frame with the elbow bent to `elbow_deg`.
    ///
    /// Torso, legs, and ankle stay planked; only the forearm swings.
    fn push_up_frame(t: f64, elbow_deg: f64) -> Frame {
        let alpha = (180.0 - elbow_deg).to_radians();
        let (ex, ey) = (0.2, 0.62);
        let wrist = (ex + 0.12 * alpha.sin(), ey + 0.12 * alpha.cos());
        Frame::new(t)
            .with(Joint::LeftShoulder, 0.2, 0.5, 0.9)
            .with(Joint::LeftElbow, ex, ey, 0.9)
            .with(Joint::LeftWrist, wrist.0, wrist.1, 0.9)
            .with(Joint::LeftHip, 0.5, 0.52, 0.9)
            .with(Joint::LeftKnee, 0.7, 0.535, 0.9)
            .with(Joint::LeftAnkle, 0.9, 0.6, 0.9)
    }

    /// Side-on sit-up frame with the torso inclined `torso_deg` above the
    /// horizontal, head tracking the torso line.
    fn sit_up_frame(t: f64, torso_deg: f64) -> Frame {
        let theta = torso_deg.to_radians();
        let hip = (0.5, 0.6);
        let shoulder = (hip.0 - 0.25 * theta.cos(), hip.1 - 0.25 * theta.sin());
        let nose = (hip.0 - 0.32 * theta.cos(), hip.1 - 0.32 * theta.sin());
        Frame::new(t)
            .with(Joint::Nose, nose.0, nose.1, 0.9)
            .with(Joint::LeftShoulder, shoulder.0, shoulder.1, 0.9)
            .with(Joint::LeftHip, hip.0, hip.1, 0.9)
            .with(Joint::LeftKnee, 0.68, 0.5, 0.9)
            .with(Joint::LeftAnkle, 0.8, 0.62, 0.9)
    }

    fn started(profile: ExerciseProfile) -> ExerciseSession {
        let mut session = ExerciseSession::new(profile).unwrap();
        session.start();
        session
    }

    /// Feed the same angle for several frames so the smoothing window
    /// settles on it.
    fn hold(session: &mut ExerciseSession, t0: &mut f64, elbow_deg: f64, frames: usize) {
        for _ in 0..frames {
            session.on_frame(&push_up_frame(*t0, elbow_deg));
            *t0 += 0.5;
        }
    }

    #[test]
    fn test_push_up_rep_counted_end_to_end() {
        let mut session = started(builtin::push_up());
        let mut t = 0.0;
        hold(&mut session, &mut t, 170.0, 4);
        hold(&mut session, &mut t, 80.0, 4);
        hold(&mut session, &mut t, 170.0, 4);

        let status = session.status();
        assert_eq!(status.count, 1);
        assert_eq!(status.phase, RepPhase::Extended);
        assert!(status.is_form_valid);
        assert_eq!(status.message, "Lower your chest");
    }

    #[test]
    fn test_sit_up_rep_counted_end_to_end() {
        let mut session = started(builtin::sit_up());
        let mut t = 0.0;
        for deg in [20.0, 20.0, 20.0, 100.0, 100.0, 100.0, 20.0, 20.0, 20.0] {
            session.on_frame(&sit_up_frame(t, deg));
            t += 0.5;
        }
        assert_eq!(session.status().count, 1);
        assert_eq!(session.status().phase, RepPhase::Extended);
    }

    #[test]
    fn test_frames_before_start_are_ignored() {
        let mut session = ExerciseSession::new(builtin::push_up()).unwrap();
        let status = session.on_frame(&push_up_frame(0.0, 80.0));
        assert_eq!(status.count, 0);
        assert_eq!(status.primary_angle, None);
        assert!(!session.is_running());
    }

    #[test]
    fn test_frames_after_stop_are_ignored() {
        let mut session = started(builtin::push_up());
        let mut t = 0.0;
        hold(&mut session, &mut t, 170.0, 4);
        session.stop();

        let before = session.status().clone();
        let after = session.on_frame(&push_up_frame(t, 80.0));
        assert_eq!(after, before);
    }

    #[test]
    fn test_missing_landmark_reports_and_freezes() {
        let mut session = started(builtin::push_up());
        let mut t = 0.0;
        hold(&mut session, &mut t, 170.0, 4);

        // Ankle leaves the frame mid-set
        let partial = Frame::new(t)
            .with(Joint::LeftShoulder, 0.2, 0.5, 0.9)
            .with(Joint::LeftElbow, 0.2, 0.62, 0.9)
            .with(Joint::LeftWrist, 0.3, 0.6, 0.9)
            .with(Joint::LeftHip, 0.5, 0.52, 0.9)
            .with(Joint::LeftKnee, 0.7, 0.535, 0.9);

        let status = session.on_frame(&partial);
        assert!(!status.is_form_valid);
        assert_eq!(
            status.violations,
            vec![ViolationKind::MissingOrLowConfidenceLandmark]
        );
        assert_eq!(status.message, "Move into full view of the camera");
        assert_eq!(status.phase, RepPhase::Extended);
        assert_eq!(status.count, 0);
    }

    #[test]
    fn test_sagging_form_blocks_the_whole_rep() {
        let mut session = started(builtin::push_up());
        let mut t = 0.0;
        hold(&mut session, &mut t, 170.0, 4);

        // Bottom of the motion with hips dropped level to the ankles
        for _ in 0..4 {
            let frame = push_up_frame(t, 80.0)
                .with(Joint::LeftHip, 0.5, 0.6, 0.9)
                .with(Joint::LeftKnee, 0.7, 0.6, 0.9);
            let status = session.on_frame(&frame);
            assert!(!status.is_form_valid);
            assert_eq!(status.message, "Lift your hips off the floor");
            t += 0.5;
        }

        hold(&mut session, &mut t, 170.0, 4);
        // The contraction never registered, so nothing was counted
        assert_eq!(session.status().count, 0);
        assert_eq!(session.status().phase, RepPhase::Extended);
    }

    #[test]
    fn test_start_resets_previous_count() {
        let mut session = started(builtin::push_up());
        let mut t = 0.0;
        hold(&mut session, &mut t, 170.0, 4);
        hold(&mut session, &mut t, 80.0, 4);
        hold(&mut session, &mut t, 170.0, 4);
        assert_eq!(session.status().count, 1);

        session.start();
        assert_eq!(session.status().count, 0);
        assert_eq!(session.status().phase, RepPhase::Extended);
        assert_eq!(session.status().message, "Lower your chest");
    }

    #[test]
    fn test_degenerate_zero_angle_is_withheld() {
        let mut session = started(builtin::push_up());
        let mut t = 0.0;
        hold(&mut session, &mut t, 170.0, 2);

        // Wrist folded exactly onto the shoulder: both vectors from the
        // elbow coincide and the kernel reads 0°
        let folded = push_up_frame(t, 170.0).with(Joint::LeftWrist, 0.2, 0.5, 0.9);
        let status = session.on_frame(&folded);
        assert_eq!(status.primary_angle, None);
        assert_eq!(status.phase, RepPhase::Extended);
    }

    #[test]
    fn test_status_serde_round_trip() {
        let mut session = started(builtin::push_up());
        let status = session.on_frame(&push_up_frame(0.0, 170.0));
        let json = serde_json::to_string(&status).unwrap();
        let back: SessionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
