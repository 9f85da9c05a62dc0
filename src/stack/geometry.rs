//! Geometry primitives for the card stack.
//!
//! All values are expressed in terminal cells as `f32` so that drag input,
//! animation sampling and rendering share one coordinate space. Rounding to
//! whole cells only happens at render time.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A pointer position in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// A displacement (or velocity) in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len <= f32::EPSILON || !len.is_finite() {
            None
        } else {
            Some(Vec2::new(self.x / len, self.y / len))
        }
    }

    /// Zero out the locked axes.
    pub fn locked(self, lock_x: bool, lock_y: bool) -> Vec2 {
        Vec2::new(
            if lock_x { 0.0 } else { self.x },
            if lock_y { 0.0 } else { self.y },
        )
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Width and height of a card, used as the reference dimension for the
/// release threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn max_side(self) -> f32 {
        self.width.max(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Which axis a drag is predominantly moving along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Dominant axis of a vector. Ties go to horizontal.
    pub fn dominant(v: Vec2) -> Axis {
        if v.y.abs() > v.x.abs() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

/// The drag/fly-out transform of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translation: Vec2,
    pub rotation_deg: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec2::ZERO,
        rotation_deg: 0.0,
    };

    pub const fn new(dx: f32, dy: f32, rotation_deg: f32) -> Self {
        Self {
            translation: Vec2::new(dx, dy),
            rotation_deg,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }
}

/// Rotation derived from horizontal drag distance.
///
/// Proportional to `dx / reference_width`, carries the sign of `dx` and never
/// exceeds `max_rotation_deg` in magnitude. A non-positive reference width
/// yields no rotation.
pub fn rotation_for(dx: f32, reference_width: f32, max_rotation_deg: f32) -> f32 {
    if reference_width <= 0.0 || !dx.is_finite() {
        return 0.0;
    }
    let max = max_rotation_deg.abs();
    (dx / reference_width * max).clamp(-max, max)
}

/// Resting placement of a card derived from its depth in the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthPose {
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for DepthPose {
    fn default() -> Self {
        Self::FRONT
    }
}

impl DepthPose {
    pub const FRONT: DepthPose = DepthPose {
        offset: Vec2::ZERO,
        scale: 1.0,
    };
}

/// How strongly each step back in the stack shifts and shrinks a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthStyle {
    /// Offset added per depth step. Negative `y` makes back cards peek out above.
    pub offset_step: Vec2,
    /// Scale removed per depth step.
    pub scale_step: f32,
    /// Lower bound for the scale of deep cards.
    pub min_scale: f32,
}

impl Default for DepthStyle {
    fn default() -> Self {
        Self {
            offset_step: Vec2::new(0.0, -1.0),
            scale_step: 0.08,
            min_scale: 0.5,
        }
    }
}

/// Resting pose for a card at `depth` (0 = front).
pub fn depth_pose(depth: usize, style: &DepthStyle) -> DepthPose {
    let d = depth as f32;
    let min_scale = style.min_scale.clamp(0.0, 1.0);
    DepthPose {
        offset: style.offset_step * d,
        scale: (1.0 - style.scale_step.max(0.0) * d).clamp(min_scale, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_sign_follows_drag_direction() {
        assert!(rotation_for(5.0, 40.0, 12.0) > 0.0);
        assert!(rotation_for(-5.0, 40.0, 12.0) < 0.0);
        assert_eq!(rotation_for(0.0, 40.0, 12.0), 0.0);
    }

    #[test]
    fn test_rotation_is_clamped() {
        assert_eq!(rotation_for(400.0, 40.0, 12.0), 12.0);
        assert_eq!(rotation_for(-400.0, 40.0, 12.0), -12.0);
    }

    #[test]
    fn test_rotation_without_reference_width() {
        assert_eq!(rotation_for(10.0, 0.0, 12.0), 0.0);
    }

    #[test]
    fn test_depth_pose_is_monotonic() {
        let style = DepthStyle::default();
        let mut prev = depth_pose(0, &style);
        assert_eq!(prev, DepthPose::FRONT);
        for depth in 1..12 {
            let pose = depth_pose(depth, &style);
            assert!(pose.scale <= prev.scale);
            assert!(pose.offset.length() >= prev.offset.length());
            assert!(pose.scale >= style.min_scale);
            prev = pose;
        }
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(Axis::dominant(Vec2::new(3.0, -1.0)), Axis::Horizontal);
        assert_eq!(Axis::dominant(Vec2::new(1.0, -3.0)), Axis::Vertical);
        assert_eq!(Axis::dominant(Vec2::new(2.0, 2.0)), Axis::Horizontal);
    }

    #[test]
    fn test_normalized_zero_vector() {
        assert!(Vec2::ZERO.normalized().is_none());
        let unit = Vec2::new(3.0, 4.0).normalized().unwrap();
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }
}
