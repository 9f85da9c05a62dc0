//! Drag tracking for the front card.
//!
//! State machine:
//!
//! ```text
//! Idle ──begin──▶ Dragging ──end (over threshold)──▶ Idle  (hand-off to the shuffle)
//!                   │  ▲ update
//!                   │  └─┘
//!                   ├──end (under threshold)──▶ SnappingBack ──advance──▶ Idle
//!                   └──cancel──▶ Idle
//! ```
//!
//! Only one drag session exists at a time; `begin` outside `Idle` is ignored.

use std::time::{Duration, Instant};

use super::animation::{Easing, Tween};
use super::card::CardId;
use super::geometry::{rotation_for, Axis, Point, Size, Transform, Vec2};

/// Samples older than this at release time are treated as a still pointer.
pub const VELOCITY_STALE_AFTER: Duration = Duration::from_millis(80);

/// Travel in cells a fling needs before its speed counts. One cell of
/// wobble during a click reads as a very fast pointer.
pub const MIN_FLING_DISTANCE: f32 = 2.0;

/// Decides whether a release commits a cycle or snaps back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasePolicy {
    /// Fraction of the card extent along the dominant drag axis.
    pub fraction: f32,
    /// Fling speed along the dominant axis, in cells per second.
    pub velocity: f32,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            fraction: 0.25,
            velocity: 90.0,
        }
    }
}

impl ReleasePolicy {
    /// `true` when the release should commit.
    ///
    /// The dominant axis is taken from the translation, or from the velocity
    /// if the card has not moved. A fling only commits when it points the same
    /// way the card was dragged and the card travelled at least
    /// [`MIN_FLING_DISTANCE`]. An empty `reference` disables the distance
    /// criterion.
    pub fn should_commit(&self, translation: Vec2, velocity: Vec2, reference: Size) -> bool {
        let axis = if translation.is_zero() {
            Axis::dominant(velocity)
        } else {
            Axis::dominant(translation)
        };

        let distance = axis.component(translation);
        let extent = axis.extent(reference);
        if extent > 0.0 && distance.abs() / extent > self.fraction {
            return true;
        }

        if distance.abs() < MIN_FLING_DISTANCE {
            return false;
        }
        let speed = axis.component(velocity);
        speed.abs() > self.velocity && distance.signum() == speed.signum()
    }
}

/// Settings captured when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSettings {
    pub prevent_x: bool,
    pub prevent_y: bool,
    /// Card size used for the release threshold and rotation.
    pub reference: Size,
    pub max_rotation_deg: f32,
    pub release: ReleasePolicy,
    pub snap_back_duration: Duration,
    /// `false` when committing would have nothing to cycle to.
    pub can_commit: bool,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            prevent_x: false,
            prevent_y: false,
            reference: Size::ZERO,
            max_rotation_deg: 12.0,
            release: ReleasePolicy::default(),
            snap_back_duration: Duration::from_millis(180),
            can_commit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    point: Point,
    at: Instant,
}

/// Ephemeral state of one drag, from begin to end or cancel.
#[derive(Debug, Clone)]
pub struct DragSession {
    card: CardId,
    start: Point,
    current: Point,
    translation: Vec2,
    started_at: Instant,
    last: Sample,
    previous: Option<Sample>,
    settings: DragSettings,
}

impl DragSession {
    fn new(card: CardId, start: Point, now: Instant, settings: DragSettings) -> Self {
        Self {
            card,
            start,
            current: start,
            translation: Vec2::ZERO,
            started_at: now,
            last: Sample { point: start, at: now },
            previous: None,
            settings,
        }
    }

    pub fn card(&self) -> CardId {
        self.card
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn current(&self) -> Point {
        self.current
    }

    /// Translation since the start point, with axis locks applied.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn settings(&self) -> &DragSettings {
        &self.settings
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation_deg: rotation_for(
                self.translation.x,
                self.settings.reference.width,
                self.settings.max_rotation_deg,
            ),
        }
    }

    fn record(&mut self, point: Point, now: Instant) {
        if point != self.last.point {
            self.previous = Some(self.last);
            self.last = Sample { point, at: now };
        }
        self.current = point;
        self.translation =
            (point - self.start).locked(self.settings.prevent_x, self.settings.prevent_y);
    }

    /// Instantaneous velocity in cells per second, axis-locked.
    pub fn velocity(&self, now: Instant) -> Vec2 {
        let Some(previous) = self.previous else {
            return Vec2::ZERO;
        };
        if now.saturating_duration_since(self.last.at) > VELOCITY_STALE_AFTER {
            return Vec2::ZERO;
        }
        let dt = self.last.at.saturating_duration_since(previous.at).as_secs_f32();
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        ((self.last.point - previous.point) * (1.0 / dt))
            .locked(self.settings.prevent_x, self.settings.prevent_y)
    }
}

/// Outcome of a drag-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Threshold met: hand the card to the shuffle animator.
    Commit {
        card: CardId,
        transform: Transform,
        velocity: Vec2,
        reference: Size,
    },
    /// Threshold not met: the card animates back to identity.
    SnapBack { card: CardId, from: Transform },
}

/// One frame of a snap-back animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapFrame {
    pub card: CardId,
    pub transform: Transform,
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    SnappingBack {
        card: CardId,
        tween: Tween<Transform>,
    },
}

/// Tracks the single active drag on the front card.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn is_snapping_back(&self) -> bool {
        matches!(self.state, GestureState::SnappingBack { .. })
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Start a drag on `card`. Ignored unless idle.
    pub fn begin(&mut self, card: CardId, point: Point, settings: DragSettings, now: Instant) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = GestureState::Dragging(DragSession::new(card, point, now, settings));
        true
    }

    /// Move the active drag and return the transform to apply.
    pub fn update(&mut self, point: Point, now: Instant) -> Option<(CardId, Transform)> {
        match &mut self.state {
            GestureState::Dragging(session) => {
                session.record(point, now);
                Some((session.card, session.transform()))
            }
            _ => None,
        }
    }

    /// Finish the active drag at `point`.
    ///
    /// The decision uses the final translation and velocity before any
    /// animation is scheduled.
    pub fn end(&mut self, point: Point, now: Instant) -> Option<Release> {
        let GestureState::Dragging(session) = &mut self.state else {
            return None;
        };
        session.record(point, now);

        let card = session.card;
        let transform = session.transform();
        let velocity = session.velocity(now);
        let settings = session.settings;

        let commit = settings.can_commit
            && settings
                .release
                .should_commit(session.translation, velocity, settings.reference);

        if commit {
            self.state = GestureState::Idle;
            Some(Release::Commit {
                card,
                transform,
                velocity,
                reference: settings.reference,
            })
        } else {
            self.state = GestureState::SnappingBack {
                card,
                tween: Tween::new(
                    transform,
                    Transform::IDENTITY,
                    now,
                    settings.snap_back_duration,
                    Easing::EaseOutCubic,
                ),
            };
            Some(Release::SnapBack {
                card,
                from: transform,
            })
        }
    }

    /// Abandon the active drag without animating. Returns the dragged card.
    pub fn cancel(&mut self) -> Option<CardId> {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging(session) => Some(session.card),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Drop any drag or snap-back, whatever the state.
    pub fn abort(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Sample the snap-back animation, if one is running.
    pub fn advance(&mut self, now: Instant) -> Option<SnapFrame> {
        let GestureState::SnappingBack { card, tween } = &self.state else {
            return None;
        };
        let frame = SnapFrame {
            card: *card,
            transform: tween.sample(now),
            finished: tween.is_finished(now),
        };
        if frame.finished {
            self.state = GestureState::Idle;
        }
        Some(frame)
    }
}
