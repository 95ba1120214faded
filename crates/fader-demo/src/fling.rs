//! Inertial wheel ("fling") detection.
//!
//! Touchpads keep emitting decaying wheel events after the fingers lift.
//! The detector compares the average magnitude of the older and newer half
//! of the recent per-direction history: a gesture that is still speeding up
//! or holding steady is intentional, a decaying tail is inertial.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FlingDetector {
    stability: usize,
    delay: Duration,
    tolerance: f32,
    sensitivity: f32,

    up: VecDeque<f32>,
    down: VecDeque<f32>,
    last_event: Option<Instant>,
}

impl Default for FlingDetector {
    fn default() -> Self {
        Self::new(8, Duration::from_millis(150), 1.1, 100.0)
    }
}

impl FlingDetector {
    /// `stability` is the half-window length and is raised to at least 1.
    pub fn new(stability: usize, delay: Duration, tolerance: f32, sensitivity: f32) -> Self {
        let stability = stability.max(1);
        Self {
            stability,
            delay,
            tolerance,
            sensitivity,
            up: VecDeque::with_capacity(stability * 2),
            down: VecDeque::with_capacity(stability * 2),
            last_event: None,
        }
    }

    /// Classifies one wheel delta (positive = rolled up).
    ///
    /// Returns the direction (`1` up, `-1` down) for intentional movement and
    /// `None` for inertial or empty events.
    pub fn check(&mut self, delta: f32, now: Instant) -> Option<i8> {
        if !delta.is_finite() || delta == 0.0 {
            return None;
        }

        let recent = self
            .last_event
            .is_some_and(|t| now.saturating_duration_since(t) <= self.delay);
        if !recent {
            self.up.clear();
            self.down.clear();
        }
        self.last_event = Some(now);

        let (direction, history) = if delta > 0.0 {
            (1, &mut self.up)
        } else {
            (-1, &mut self.down)
        };

        let window = self.stability * 2;
        history.push_back(delta);
        while history.len() > window {
            history.pop_front();
        }

        if history.len() < window {
            return Some(direction);
        }

        // A constant stream inside the delay window is a stalled repeat.
        if history.front() == history.back() {
            return None;
        }

        let old_avg = history.iter().take(self.stability).sum::<f32>() / self.stability as f32;
        let new_avg = history.iter().skip(self.stability).sum::<f32>() / self.stability as f32;

        let intentional =
            old_avg.abs() < (new_avg * self.tolerance).abs() && new_avg.abs() > self.sensitivity;
        log::trace!("fling check: old {old_avg:.1} new {new_avg:.1} -> {intentional}");

        intentional.then_some(direction)
    }
}
