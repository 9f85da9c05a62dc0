//! Time-driven tweens.
//!
//! A [`Tween`] never schedules anything on its own: the host calls
//! [`Tween::sample`] with the current [`Instant`] on every animation tick.
//! Durations are passed per tween so nothing depends on ambient timing state.

use std::time::{Duration, Instant};

use super::geometry::{DepthPose, Transform, Vec2};

/// Easing curves used by the stack animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInCubic => t * t * t,
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Linear interpolation between two values.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: f32, t: f32) -> f32 {
        self + (to - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

impl Lerp for Transform {
    fn lerp(self, to: Transform, t: f32) -> Transform {
        Transform {
            translation: self.translation.lerp(to.translation, t),
            rotation_deg: self.rotation_deg.lerp(to.rotation_deg, t),
        }
    }
}

impl Lerp for DepthPose {
    fn lerp(self, to: DepthPose, t: f32) -> DepthPose {
        DepthPose {
            offset: self.offset.lerp(to.offset, t),
            scale: self.scale.lerp(to.scale, t),
        }
    }
}

/// A value animating from `from` to `to` over `duration`, starting at `start`.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`. A zero duration is complete immediately.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: Instant) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
