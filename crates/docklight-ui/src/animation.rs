//! Time-driven animation primitives.
//!
//! Every animated value in the dock is a pure function of the time elapsed
//! since it was triggered. Nothing integrates per-frame deltas, so dropped or
//! irregular ticks never change where an animation ends up.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use docklight_ui::animation::{EasingFunction, Transient, Tween};
//!
//! let start = Duration::from_millis(1_000);
//! let tween = Tween::new(0.0, 1.0, start, Duration::from_millis(200))
//!     .easing(EasingFunction::CubicOut);
//!
//! assert_eq!(tween.value(start), 0.0);
//! assert_eq!(tween.value(start + Duration::from_millis(200)), 1.0);
//! assert!(tween.is_settled(start + Duration::from_millis(200)));
//! ```

use std::f32::consts::PI;
use std::time::Duration;

/// Something whose value changes over time until it settles.
///
/// The animation pump keeps ticking while any transient is unsettled.
pub trait Transient {
    /// Whether the value has stopped changing at `now`.
    fn is_settled(&self, now: Duration) -> bool;
}

/// Seconds elapsed from `since` to `now`, zero if the clock went backwards.
#[inline]
pub fn elapsed_secs(since: Duration, now: Duration) -> f32 {
    now.saturating_sub(since).as_secs_f32()
}

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EasingFunction {
    /// Linear interpolation
    #[default]
    Linear,
    /// Quadratic ease in
    QuadIn,
    /// Quadratic ease out
    QuadOut,
    /// Cubic ease in (slow start, accelerating)
    CubicIn,
    /// Cubic ease out (fast start, decelerating)
    CubicOut,
    /// Cubic ease in-out
    CubicInOut,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadIn => t * t,
            EasingFunction::QuadOut => t * (2.0 - t),
            EasingFunction::CubicIn => t * t * t,
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingFunction::CubicInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
        }
    }
}

/// Damped bounce: `|sin(n·π·p)|` under a linearly decaying envelope.
///
/// `progress` runs over `0..=1`; `bounces` is the number of arcs. The
/// envelope is clamped so the first arc peaks at exactly 1.0 and the curve
/// returns to 0 at both ends.
pub fn damped_bounce(progress: f32, bounces: u32) -> f32 {
    if !(0.0..1.0).contains(&progress) || bounces == 0 {
        return 0.0;
    }
    let n = bounces as f32;
    let envelope = ((1.0 - progress) * (2.0 * n) / (2.0 * n - 1.0)).min(1.0);
    (n * PI * progress).sin().abs() * envelope
}

/// Half-sine pulse over `0..=1`: rises to 1 at the midpoint and back to 0.
pub fn half_sine(progress: f32) -> f32 {
    if !(0.0..1.0).contains(&progress) {
        return 0.0;
    }
    (PI * progress).sin()
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// A value moving from `from` to `to` over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing: EasingFunction::Linear,
        }
    }

    /// A tween already at rest on `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, Duration::ZERO, Duration::ZERO)
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized time in `0..=1`.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed_secs(self.start, now) / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn value(&self, now: Duration) -> f32 {
        let t = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    /// Restart toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: f32, now: Duration, duration: Duration) {
        if self.to == to {
            return;
        }
        *self = Tween {
            from: self.value(now),
            to,
            start: now,
            duration,
            easing: self.easing,
        };
    }
}

impl Transient for Tween {
    fn is_settled(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

// ---------------------------------------------------------------------------
// Exponential approach
// ---------------------------------------------------------------------------

/// A value approaching a target exponentially: `target + (from - target)·e^(-k·t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpApproach {
    pub from: f32,
    pub target: f32,
    pub since: Duration,
    /// Decay rate per second.
    pub rate: f32,
    /// Distance from the target considered settled.
    pub epsilon: f32,
}

impl ExpApproach {
    pub fn new(value: f32, rate: f32, epsilon: f32) -> Self {
        Self {
            from: value,
            target: value,
            since: Duration::ZERO,
            rate,
            epsilon,
        }
    }

    pub fn value(&self, now: Duration) -> f32 {
        let t = elapsed_secs(self.since, now);
        let v = self.target + (self.from - self.target) * (-self.rate * t).exp();
        if (v - self.target).abs() <= self.epsilon {
            self.target
        } else {
            v
        }
    }

    pub fn set_target(&mut self, target: f32, now: Duration) {
        if self.target == target {
            return;
        }
        self.from = self.value(now);
        self.target = target;
        self.since = now;
    }

    /// Jump by `delta` from the current value, keeping the same target.
    pub fn kick(&mut self, delta: f32, now: Duration) {
        self.from = self.value(now) + delta;
        self.since = now;
    }
}

impl Transient for ExpApproach {
    fn is_settled(&self, now: Duration) -> bool {
        self.value(now) == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn cubic_easings_hit_endpoints() {
        for easing in [
            EasingFunction::CubicIn,
            EasingFunction::CubicOut,
            EasingFunction::CubicInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!(EasingFunction::CubicIn.apply(0.5) < 0.5);
        assert!(EasingFunction::CubicOut.apply(0.5) > 0.5);
    }

    #[test]
    fn bounce_peaks_at_one_and_ends_at_zero() {
        assert!((damped_bounce(0.5, 1) - 1.0).abs() < 1e-6);
        assert!((damped_bounce(0.25, 2) - 1.0).abs() < 1e-6);
        assert!(damped_bounce(0.75, 2) < 1.0);
        assert_eq!(damped_bounce(0.0, 2), 0.0);
        assert_eq!(damped_bounce(1.0, 2), 0.0);
        assert_eq!(damped_bounce(1.5, 2), 0.0);
    }

    #[test]
    fn half_sine_is_a_pulse() {
        assert_eq!(half_sine(0.0), 0.0);
        assert!((half_sine(0.5) - 1.0).abs() < 1e-6);
        assert_eq!(half_sine(1.0), 0.0);
    }

    #[test]
    fn tween_settles_at_target() {
        let tween = Tween::new(2.0, 4.0, ms(100), ms(100));
        assert_eq!(tween.value(ms(50)), 2.0);
        assert!((tween.value(ms(150)) - 3.0).abs() < 1e-6);
        assert_eq!(tween.value(ms(500)), 4.0);
        assert!(!tween.is_settled(ms(150)));
        assert!(tween.is_settled(ms(200)));
    }

    #[test]
    fn tween_retarget_continues_from_current_value() {
        let mut tween = Tween::new(0.0, 1.0, ms(0), ms(100));
        tween.retarget(0.0, ms(50), ms(100));
        assert!((tween.value(ms(50)) - 0.5).abs() < 1e-6);
        assert_eq!(tween.value(ms(150)), 0.0);
    }

    #[test]
    fn exp_approach_converges_and_snaps() {
        let mut fade = ExpApproach::new(0.0, 20.0, 0.001);
        fade.set_target(1.0, ms(0));
        assert!(fade.value(ms(50)) > 0.5);
        assert!(!fade.is_settled(ms(50)));
        assert_eq!(fade.value(ms(2_000)), 1.0);
        assert!(fade.is_settled(ms(2_000)));
    }

    #[test]
    fn backwards_clock_counts_as_no_time() {
        let tween = Tween::new(0.0, 1.0, ms(100), ms(100));
        assert_eq!(tween.value(ms(10)), 0.0);
        assert_eq!(elapsed_secs(ms(100), ms(10)), 0.0);
    }
}
