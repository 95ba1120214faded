//! Scroll-driven fade state.
//!
//! A single scalar `s` in `[0, N)` accumulates wheel movement. Everything the
//! renderer needs is derived from it: `current = floor(s)`,
//! `next = (current + 1) mod N`, `progress = s - floor(s)`.

/// Wheel pixels per unit of the scroll scalar.
pub const DEFAULT_SCROLL_SCALE: f32 = 4000.0;

/// Largest progress a direct write can set without rolling over to `next`.
const PROGRESS_MAX: f32 = 0.9999;

/// Which two scenes to show and how far between them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Blend {
    pub current: usize,
    pub next: usize,
    /// In `[0, 1)`; 0 shows `current` only.
    pub progress: f32,
}

#[derive(Debug, Clone)]
pub struct FadeState {
    scalar: f32,
    scene_count: usize,
    scale: f32,
}

impl FadeState {
    /// `scene_count` is raised to at least 1; a non-positive or non-finite
    /// `scale` falls back to [`DEFAULT_SCROLL_SCALE`].
    pub fn new(scene_count: usize, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_SCROLL_SCALE
        };
        Self {
            scalar: 0.0,
            scene_count: scene_count.max(1),
            scale,
        }
    }

    #[cfg(test)]
    pub fn scene_count(&self) -> usize {
        self.scene_count
    }

    #[cfg(test)]
    pub fn scalar(&self) -> f32 {
        self.scalar
    }

    #[cfg(test)]
    /// Sets the scalar directly, wrapping it into range.
    pub fn set_scalar(&mut self, s: f32) {
        if s.is_finite() {
            self.scalar = wrap(s, self.scene_count);
        }
    }

    /// Folds one vertical wheel delta (logical pixels, positive = rolled
    /// up) into the scalar. Rolling down advances.
    ///
    /// Returns `false` if the delta was ignored.
    pub fn apply_wheel(&mut self, delta_px: f32) -> bool {
        if !delta_px.is_finite() {
            return false;
        }
        self.scalar = wrap(self.scalar - delta_px / self.scale, self.scene_count);
        true
    }

    /// Replaces the fractional part, keeping `current`.
    pub fn set_progress(&mut self, progress: f32) {
        if !progress.is_finite() {
            return;
        }
        let current = self.scalar.floor();
        self.scalar = wrap(current + progress.clamp(0.0, PROGRESS_MAX), self.scene_count);
    }

    pub fn blend(&self) -> Blend {
        let floor = self.scalar.floor();
        let current = (floor as usize).min(self.scene_count - 1);
        Blend {
            current,
            next: (current + 1) % self.scene_count,
            progress: self.scalar - floor,
        }
    }
}

/// Wraps `s` into `[0, n)`.
///
/// `rem_euclid` of a tiny negative rounds to exactly `n` in f32; that case
/// maps to 0.
fn wrap(s: f32, n: usize) -> f32 {
    let n = n as f32;
    let w = s.rem_euclid(n);
    if w >= n { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(s: f32) -> FadeState {
        let mut f = FadeState::new(3, DEFAULT_SCROLL_SCALE);
        f.set_scalar(s);
        f
    }

    fn assert_invariants(f: &FadeState) {
        let s = f.scalar();
        assert!((0.0..3.0).contains(&s), "scalar {s} out of range");
        let b = f.blend();
        assert!(b.current < 3);
        assert_eq!(b.next, (b.current + 1) % 3);
        assert!((0.0..1.0).contains(&b.progress), "progress {} out of range", b.progress);
    }

    // ── derivation ────────────────────────────────────────────────────────

    #[test]
    fn zero_shows_first_scene() {
        assert_eq!(
            state_at(0.0).blend(),
            Blend { current: 0, next: 1, progress: 0.0 }
        );
    }

    #[test]
    fn last_scene_wraps_to_first() {
        assert_eq!(
            state_at(2.75).blend(),
            Blend { current: 2, next: 0, progress: 0.75 }
        );
    }

    #[test]
    fn set_scalar_wraps() {
        assert_eq!(state_at(3.5).scalar(), 0.5);
        assert_eq!(state_at(-0.25).scalar(), 2.75);
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn rolling_down_advances() {
        let mut f = FadeState::new(3, 4000.0);
        assert!(f.apply_wheel(-1000.0));
        assert_eq!(f.blend(), Blend { current: 0, next: 1, progress: 0.25 });
    }

    #[test]
    fn rolling_up_from_zero_wraps_backwards() {
        let mut f = FadeState::new(3, 4000.0);
        f.apply_wheel(1000.0);
        assert_eq!(f.blend(), Blend { current: 2, next: 0, progress: 0.75 });
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut f = state_at(1.5);
        assert!(!f.apply_wheel(f32::NAN));
        assert!(!f.apply_wheel(f32::INFINITY));
        assert_eq!(f.scalar(), 1.5);
    }

    #[test]
    fn tiny_negative_never_reaches_n() {
        assert_eq!(wrap(-1e-9, 3), 0.0);
        let mut f = FadeState::new(3, 4000.0);
        f.apply_wheel(1e-6);
        assert_invariants(&f);
    }

    #[test]
    fn invariants_hold_over_long_sequences() {
        let mut f = FadeState::new(3, 4000.0);
        let deltas = [-120.0, 3.0, -0.5, 999.0, -4000.0, 15.0, -7777.7, 1e-4, 12000.0];
        for i in 0..3000 {
            f.apply_wheel(deltas[i % deltas.len()] * if i % 7 == 0 { -1.0 } else { 1.0 });
            assert_invariants(&f);
        }
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut f = state_at(1.25);
        f.apply_wheel(-3.0 * 4000.0);
        assert!((f.scalar() - 1.25).abs() < 1e-4);
    }

    // ── direct writes ─────────────────────────────────────────────────────

    #[test]
    fn set_progress_keeps_current() {
        let mut f = state_at(2.1);
        f.set_progress(0.5);
        assert_eq!(f.blend(), Blend { current: 2, next: 0, progress: 0.5 });
    }

    #[test]
    fn set_progress_at_one_stays_on_current() {
        let mut f = state_at(2.0);
        f.set_progress(1.0);
        let b = f.blend();
        assert_eq!(b.current, 2);
        assert!(b.progress > 0.99 && b.progress < 1.0);
        assert_invariants(&f);
    }

    #[test]
    fn bad_construction_is_sanitized() {
        let f = FadeState::new(0, -1.0);
        assert_eq!(f.scene_count(), 1);
        assert_eq!(f.blend(), Blend { current: 0, next: 0, progress: 0.0 });
    }
}
