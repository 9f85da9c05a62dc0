//! Stack configuration.
//!
//! The configuration is read when the window is rebuilt and when a drag
//! begins. A running drag keeps the settings it started with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::geometry::DepthStyle;
use super::gesture::ReleasePolicy;
use super::source::OverlayHost;

/// Default number of materialized cards.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 3;

/// Default fly-out and reflow duration.
pub const DEFAULT_SHUFFLE_DURATION: Duration = Duration::from_millis(320);

/// Default snap-back duration after a release below the threshold.
pub const DEFAULT_SNAP_BACK_DURATION: Duration = Duration::from_millis(180);

/// Default upper bound for drag rotation, in degrees.
pub const DEFAULT_MAX_ROTATION_DEG: f32 = 12.0;

/// Upper bound for `max_rotation_deg`; the renderer's skew turns over at 90.
pub const MAX_ROTATION_LIMIT_DEG: f32 = 45.0;

/// Serialize a [`Duration`] as whole milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Configuration surface of the card stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Cards materialized at once (at least one).
    pub max_visible_items: usize,
    /// Lock horizontal dragging.
    pub prevent_x: bool,
    /// Lock vertical dragging.
    pub prevent_y: bool,
    /// Duration of both the fly-out and the reflow phase.
    #[serde(rename = "shuffle_animation_ms", with = "duration_ms")]
    pub shuffle_animation_duration: Duration,
    #[serde(rename = "snap_back_ms", with = "duration_ms")]
    pub snap_back_duration: Duration,
    /// Fraction of the card extent along the drag axis that commits a release.
    pub release_fraction: f32,
    /// Fling speed in cells per second that commits a release.
    pub release_velocity: f32,
    pub max_rotation_deg: f32,
    pub depth_style: DepthStyle,
    /// Layer the dragged card is lifted into. Runtime only.
    #[serde(skip)]
    pub overlay_host: Option<OverlayHost>,
}

impl Default for StackConfig {
    fn default() -> Self {
        let release = ReleasePolicy::default();
        Self {
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            prevent_x: false,
            prevent_y: false,
            shuffle_animation_duration: DEFAULT_SHUFFLE_DURATION,
            snap_back_duration: DEFAULT_SNAP_BACK_DURATION,
            release_fraction: release.fraction,
            release_velocity: release.velocity,
            max_rotation_deg: DEFAULT_MAX_ROTATION_DEG,
            depth_style: DepthStyle::default(),
            overlay_host: None,
        }
    }
}

impl StackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count;
        self
    }

    pub fn with_prevent_x(mut self, prevent: bool) -> Self {
        self.prevent_x = prevent;
        self
    }

    pub fn with_prevent_y(mut self, prevent: bool) -> Self {
        self.prevent_y = prevent;
        self
    }

    pub fn with_shuffle_animation_duration(mut self, duration: Duration) -> Self {
        self.shuffle_animation_duration = duration;
        self
    }

    pub fn with_snap_back_duration(mut self, duration: Duration) -> Self {
        self.snap_back_duration = duration;
        self
    }

    pub fn with_overlay_host(mut self, host: Option<OverlayHost>) -> Self {
        self.overlay_host = host;
        self
    }

    pub fn release_policy(&self) -> ReleasePolicy {
        ReleasePolicy {
            fraction: self.release_fraction,
            velocity: self.release_velocity,
        }
    }

    /// Clamp out-of-range values instead of rejecting them.
    ///
    /// Each adjustment is logged at warn level.
    pub fn validated(mut self) -> Self {
        let defaults = StackConfig::default();

        if self.max_visible_items == 0 {
            tracing::warn!("max_visible_items of 0 is invalid, clamping to 1");
            self.max_visible_items = 1;
        }
        if !(self.release_fraction > 0.0 && self.release_fraction <= 1.0) {
            tracing::warn!(
                value = self.release_fraction,
                "release_fraction outside (0, 1], using default"
            );
            self.release_fraction = defaults.release_fraction;
        }
        if !self.release_velocity.is_finite() || self.release_velocity < 0.0 {
            tracing::warn!(
                value = self.release_velocity,
                "release_velocity must be a non-negative number, using default"
            );
            self.release_velocity = defaults.release_velocity;
        }
        if !self.max_rotation_deg.is_finite() || self.max_rotation_deg < 0.0 {
            tracing::warn!(
                value = self.max_rotation_deg,
                "max_rotation_deg must be a non-negative number, using default"
            );
            self.max_rotation_deg = defaults.max_rotation_deg;
        } else if self.max_rotation_deg > MAX_ROTATION_LIMIT_DEG {
            tracing::warn!(
                value = self.max_rotation_deg,
                limit = MAX_ROTATION_LIMIT_DEG,
                "max_rotation_deg clamped"
            );
            self.max_rotation_deg = MAX_ROTATION_LIMIT_DEG;
        }
        let style = &mut self.depth_style;
        if !style.scale_step.is_finite() || style.scale_step < 0.0 {
            tracing::warn!(value = style.scale_step, "depth scale_step clamped to 0");
            style.scale_step = 0.0;
        }
        if !(0.0..=1.0).contains(&style.min_scale) {
            tracing::warn!(value = style.min_scale, "depth min_scale clamped into [0, 1]");
            style.min_scale = if style.min_scale.is_nan() {
                defaults.depth_style.min_scale
            } else {
                style.min_scale.clamp(0.0, 1.0)
            };
        }
        if !style.offset_step.x.is_finite() || !style.offset_step.y.is_finite() {
            tracing::warn!("depth offset_step must be finite, using default");
            style.offset_step = defaults.depth_style.offset_step;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StackConfig::default();
        assert_eq!(config.max_visible_items, 3);
        assert!(!config.prevent_x);
        assert!(!config.prevent_y);
        assert!(config.overlay_host.is_none());
        assert_eq!(config.clone().validated(), config);
    }

    #[test]
    fn test_zero_visible_items_is_clamped() {
        let config = StackConfig::default().with_max_visible_items(0).validated();
        assert_eq!(config.max_visible_items, 1);
    }

    #[test]
    fn test_bad_release_values_fall_back_to_defaults() {
        let mut config = StackConfig::default();
        config.release_fraction = 0.0;
        config.release_velocity = f32::NAN;
        config.max_rotation_deg = -4.0;
        let config = config.validated();
        let defaults = StackConfig::default();
        assert_eq!(config.release_fraction, defaults.release_fraction);
        assert_eq!(config.release_velocity, defaults.release_velocity);
        assert_eq!(config.max_rotation_deg, defaults.max_rotation_deg);
    }

    #[test]
    fn test_large_rotation_is_clamped() {
        let mut config = StackConfig::default();
        config.max_rotation_deg = 170.0;
        assert_eq!(config.validated().max_rotation_deg, MAX_ROTATION_LIMIT_DEG);

        let mut config = StackConfig::default();
        config.max_rotation_deg = 30.0;
        assert_eq!(config.validated().max_rotation_deg, 30.0);
    }

    #[test]
    fn test_json_uses_millisecond_fields() {
        let config = StackConfig::default()
            .with_shuffle_animation_duration(Duration::from_millis(450))
            .with_overlay_host(Some(OverlayHost::new(7)));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["shuffle_animation_ms"], 450);
        assert!(json.get("overlay_host").is_none());

        let parsed: StackConfig =
            serde_json::from_str(r#"{ "max_visible_items": 5, "prevent_y": true }"#).unwrap();
        assert_eq!(parsed.max_visible_items, 5);
        assert!(parsed.prevent_y);
        assert_eq!(parsed.shuffle_animation_duration, DEFAULT_SHUFFLE_DURATION);
    }
}
