//! Repetition counting state machine
//!
//! Two-phase hysteresis machine driven by (angle, form-validity) pairs in
//! time order. The gap between the contract and extend thresholds is what
//! keeps borderline noise from producing oscillating double counts; the
//! form-validity freeze is what keeps a sloppy motion from ever completing
//! a repetition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::ExerciseProfile;

/// Where the body is in the repetition cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepPhase {
    /// The exercise's resting configuration (arms straight, lying flat).
    Extended,
    /// The peak of the movement (chest lowered, torso sat up).
    Contracted,
}

impl RepPhase {
    pub fn name(&self) -> &'static str {
        match self {
            RepPhase::Extended => "extended",
            RepPhase::Contracted => "contracted",
        }
    }
}

/// Which way the primary angle travels when the body contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    /// Contracting drives the angle down (push-up elbow: 180° → 80°).
    Decreasing,
    /// Contracting drives the angle up (sit-up torso: 20° → 100°).
    Increasing,
}

/// What a single tick did to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepEvent {
    /// No transition: dead zone, frozen on invalid form, or already past
    /// the threshold.
    Unchanged,
    /// Crossed into the contracted phase; no count change.
    ContractionStarted,
    /// Crossed back into the extended phase and counted one repetition.
    RepCompleted,
    /// Crossed back into the extended phase but the cycle completed faster
    /// than the profile's minimum duration; not counted.
    RepRejectedTooFast,
}

/// Mutable counting state, owned exclusively by one counter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepCounterState {
    pub phase: RepPhase,
    /// Valid repetitions this session. Non-decreasing between resets.
    pub count: u64,
    /// Most recent angle fed to the machine, kept for status reporting.
    pub last_angle: Option<f64>,
    /// Timestamp of the last counted repetition.
    pub last_rep_at: Option<f64>,
}

/// Hysteresis repetition counter for one exercise.
pub struct RepCounter {
    direction: MovementDirection,
    contract_threshold: f64,
    extend_threshold: f64,
    rest_phase: RepPhase,
    min_cycle_secs: f64,
    /// When the current contraction began; drives too-fast rejection.
    contracted_at: Option<f64>,
    state: RepCounterState,
}

impl RepCounter {
    /// Build a counter from a validated profile, starting at rest.
    pub fn new(profile: &ExerciseProfile) -> Self {
        Self {
            direction: profile.direction,
            contract_threshold: profile.contract_threshold,
            extend_threshold: profile.extend_threshold,
            rest_phase: profile.rest_phase,
            min_cycle_secs: profile.min_cycle_secs,
            contracted_at: None,
            state: RepCounterState {
                phase: profile.rest_phase,
                count: 0,
                last_angle: None,
                last_rep_at: None,
            },
        }
    }

    pub fn phase(&self) -> RepPhase {
        self.state.phase
    }

    pub fn count(&self) -> u64 {
        self.state.count
    }

    pub fn last_angle(&self) -> Option<f64> {
        self.state.last_angle
    }

    pub fn state(&self) -> &RepCounterState {
        &self.state
    }

    /// Advance the machine by one observation.
    ///
    /// Crossings are strict: an angle exactly on a threshold never
    /// transitions. While `form_valid` is false the phase and count are
    /// frozen regardless of angle; only `last_angle` keeps updating so
    /// status reporting stays live.
    pub fn tick(&mut self, timestamp_secs: f64, angle: f64, form_valid: bool) -> RepEvent {
        self.state.last_angle = Some(angle);

        if !form_valid {
            return RepEvent::Unchanged;
        }

        match self.state.phase {
            RepPhase::Extended => {
                if self.crossed_contract(angle) {
                    self.state.phase = RepPhase::Contracted;
                    self.contracted_at = Some(timestamp_secs);
                    debug!(angle, "entered contracted phase");
                    RepEvent::ContractionStarted
                } else {
                    RepEvent::Unchanged
                }
            }
            RepPhase::Contracted => {
                if self.crossed_extend(angle) {
                    self.state.phase = RepPhase::Extended;
                    let too_fast = self
                        .contracted_at
                        .take()
                        .is_some_and(|start| timestamp_secs - start < self.min_cycle_secs);

                    if too_fast {
                        debug!(angle, "cycle faster than minimum duration, not counted");
                        RepEvent::RepRejectedTooFast
                    } else {
                        self.state.count += 1;
                        self.state.last_rep_at = Some(timestamp_secs);
                        debug!(count = self.state.count, "repetition counted");
                        RepEvent::RepCompleted
                    }
                } else {
                    RepEvent::Unchanged
                }
            }
        }
    }

    /// Zero the count and return to the profile's rest phase. Thresholds
    /// and direction are untouched.
    pub fn reset(&mut self) {
        self.contracted_at = None;
        self.state = RepCounterState {
            phase: self.rest_phase,
            count: 0,
            last_angle: None,
            last_rep_at: None,
        };
    }

    fn crossed_contract(&self, angle: f64) -> bool {
        match self.direction {
            MovementDirection::Decreasing => angle < self.contract_threshold,
            MovementDirection::Increasing => angle > self.contract_threshold,
        }
    }

    fn crossed_extend(&self, angle: f64) -> bool {
        match self.direction {
            MovementDirection::Decreasing => angle > self.extend_threshold,
            MovementDirection::Increasing => angle < self.extend_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin;

    /// Push-up counter: contract <90°, extend >160°, decreasing.
    fn push_counter() -> RepCounter {
        RepCounter::new(&builtin::push_up())
    }

    /// Feed angles one second apart, all form-valid.
    fn feed(counter: &mut RepCounter, angles: &[f64]) {
        for (i, &angle) in angles.iter().enumerate() {
            counter.tick(i as f64, angle, true);
        }
    }

    #[test]
    fn test_push_up_cycle_counts_once() {
        let mut counter = push_counter();
        feed(&mut counter, &[170.0, 80.0, 170.0]);
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.phase(), RepPhase::Extended);
    }

    #[test]
    fn test_bad_form_at_bottom_freezes_machine() {
        let mut counter = push_counter();
        counter.tick(0.0, 170.0, true);
        // Sagging hips at the bottom: the machine never enters Contracted
        counter.tick(1.0, 80.0, false);
        counter.tick(2.0, 170.0, true);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.phase(), RepPhase::Extended);
    }

    #[test]
    fn test_invalid_form_through_whole_cycle_counts_nothing() {
        let mut counter = push_counter();
        for (i, angle) in [170.0, 120.0, 80.0, 120.0, 170.0].into_iter().enumerate() {
            counter.tick(i as f64, angle, false);
        }
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.phase(), RepPhase::Extended);
        // last_angle still tracked for status
        assert_eq!(counter.last_angle(), Some(170.0));
    }

    #[test]
    fn test_sit_up_cycle_counts_once() {
        let mut counter = RepCounter::new(&builtin::sit_up());
        feed(&mut counter, &[20.0, 100.0, 20.0]);
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.phase(), RepPhase::Extended);
    }

    #[test]
    fn test_dense_sweep_never_double_counts() {
        let mut counter = push_counter();
        let mut t = 0.0;
        // One continuous sweep 170° → 80° → 170° sampled every degree;
        // dozens of frames land between the thresholds.
        let down = (80..=170).rev().map(|a| a as f64);
        let up = (80..=170).map(|a| a as f64);
        for angle in down.chain(up) {
            counter.tick(t, angle, true);
            t += 0.05;
        }
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.phase(), RepPhase::Extended);
    }

    #[test]
    fn test_dead_zone_updates_last_angle_only() {
        let mut counter = push_counter();
        counter.tick(0.0, 170.0, true);
        let event = counter.tick(1.0, 120.0, true);
        assert_eq!(event, RepEvent::Unchanged);
        assert_eq!(counter.phase(), RepPhase::Extended);
        assert_eq!(counter.last_angle(), Some(120.0));
    }

    #[test]
    fn test_threshold_equality_does_not_transition() {
        let mut counter = push_counter();
        // Exactly on the contract threshold: strictly-below is required
        assert_eq!(counter.tick(0.0, 90.0, true), RepEvent::Unchanged);
        assert_eq!(counter.phase(), RepPhase::Extended);

        counter.tick(1.0, 80.0, true);
        assert_eq!(counter.phase(), RepPhase::Contracted);

        // Exactly on the extend threshold: strictly-above is required
        assert_eq!(counter.tick(2.0, 160.0, true), RepEvent::Unchanged);
        assert_eq!(counter.phase(), RepPhase::Contracted);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_count_is_monotonic() {
        let mut counter = push_counter();
        let mut previous = 0;
        let mut t = 0.0;
        for _ in 0..4 {
            for angle in [170.0, 80.0, 170.0] {
                counter.tick(t, angle, true);
                assert!(counter.count() >= previous);
                previous = counter.count();
                t += 1.0;
            }
        }
        assert_eq!(counter.count(), 4);
    }

    #[test]
    fn test_too_fast_cycle_is_rejected() {
        let mut counter = push_counter();
        counter.tick(0.00, 170.0, true);
        counter.tick(0.05, 80.0, true);
        // Bounce back up 50ms later: degenerate motion, not a push-up
        let event = counter.tick(0.10, 170.0, true);
        assert_eq!(event, RepEvent::RepRejectedTooFast);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.phase(), RepPhase::Extended);

        // A properly paced cycle afterwards still counts
        counter.tick(1.0, 80.0, true);
        let event = counter.tick(2.0, 170.0, true);
        assert_eq!(event, RepEvent::RepCompleted);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_form_regained_mid_cycle_resumes() {
        let mut counter = push_counter();
        counter.tick(0.0, 170.0, true);
        counter.tick(1.0, 80.0, true);
        // Form breaks on the way up; those frames change nothing
        counter.tick(2.0, 120.0, false);
        counter.tick(3.0, 150.0, false);
        assert_eq!(counter.phase(), RepPhase::Contracted);
        // Form returns before the extend threshold is crossed
        let event = counter.tick(4.0, 170.0, true);
        assert_eq!(event, RepEvent::RepCompleted);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_reset_restores_rest_state() {
        let mut counter = push_counter();
        let mut t = 0.0;
        for _ in 0..3 {
            for angle in [170.0, 80.0, 170.0] {
                counter.tick(t, angle, true);
                t += 1.0;
            }
        }
        assert_eq!(counter.count(), 3);

        counter.reset();
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.phase(), RepPhase::Extended);
        assert_eq!(counter.last_angle(), None);
    }
}
