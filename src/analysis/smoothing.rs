//! Angle smoothing with a short moving average
//!
//! Averages the last N primary-angle readings to keep single-frame jitter
//! from reaching the repetition state machine. Window 1 is the identity.

use std::collections::VecDeque;

/// Moving-average smoother over the last `window` angle readings.
pub struct AngleSmoother {
    history: VecDeque<f64>,
    window: usize,
}

impl AngleSmoother {
    /// `window` must be at least 1; profile validation enforces this before
    /// a smoother is ever built.
    pub fn new(window: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Push a reading, returning the average over the filled part of the
    /// window.
    ///
    /// During warm-up the average covers however many readings exist, so
    /// the first frames are reported raw rather than dragged toward zero.
    pub fn push(&mut self, angle: f64) -> f64 {
        self.history.push_back(angle);
        if self.history.len() > self.window {
            self.history.pop_front();
        }

        let sum: f64 = self.history.iter().sum();
        sum / self.history.len() as f64
    }

    /// Drop all history (session start or reset).
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
