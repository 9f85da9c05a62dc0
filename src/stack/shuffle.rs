//! Post-release sequencing: fly the committed card out, then reflow.
//!
//! 1. **Fly-out**: the card keeps moving along its drag (or fling) direction
//!    until it has left its own bounds, rotating further and fading out.
//! 2. **Reflow**: the model cycles, the recycled slot receives the entering
//!    item and fades in at the back, and every card eases into the pose of its
//!    new depth.
//!
//! Both phases run for the same caller-supplied duration.

use std::time::{Duration, Instant};

use super::animation::{Easing, Tween};
use super::card::{CardId, CardParent};
use super::geometry::{depth_pose, DepthPose, DepthStyle, Size, Transform, Vec2};
use super::model::StackModel;

/// How far past its own size a card travels when flying out.
pub const FLY_OUT_DISTANCE_FACTOR: f32 = 1.5;

/// Rotation bound for the fly-out, in degrees.
pub const MAX_FLY_OUT_ROTATION_DEG: f32 = 30.0;

#[derive(Debug, Clone)]
enum ShufflePhase {
    FlyOut {
        card: CardId,
        motion: Tween<Transform>,
        fade: Tween<f32>,
    },
    Reflow {
        poses: Vec<(CardId, Tween<DepthPose>)>,
        entering: CardId,
        fade_in: Tween<f32>,
    },
}

/// Result of advancing the animator by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleStep {
    /// Nothing is running.
    Idle,
    /// A phase is still in progress.
    Running,
    /// The fly-out reached its target; call [`ShuffleAnimator::begin_reflow`].
    FlyOutComplete,
    /// The reflow settled. Carries the card now at the front.
    Settled { front: Option<CardId> },
}

/// Drives the two-phase shuffle of a committed card.
#[derive(Debug, Clone, Default)]
pub struct ShuffleAnimator {
    phase: Option<ShufflePhase>,
}

impl ShuffleAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_some()
    }

    pub fn is_flying_out(&self) -> bool {
        matches!(self.phase, Some(ShufflePhase::FlyOut { .. }))
    }

    pub fn is_reflowing(&self) -> bool {
        matches!(self.phase, Some(ShufflePhase::Reflow { .. }))
    }

    /// Target transform for a card leaving from `from`.
    ///
    /// Direction comes from the translation, falling back to the fling
    /// velocity and finally to the right.
    pub fn fly_out_target(from: Transform, velocity: Vec2, reference: Size) -> Transform {
        let direction = from
            .translation
            .normalized()
            .or_else(|| velocity.normalized())
            .unwrap_or(Vec2::new(1.0, 0.0));
        let distance = reference.max_side().max(1.0) * FLY_OUT_DISTANCE_FACTOR;
        Transform {
            translation: from.translation + direction * distance,
            rotation_deg: (from.rotation_deg * 2.0)
                .clamp(-MAX_FLY_OUT_ROTATION_DEG, MAX_FLY_OUT_ROTATION_DEG),
        }
    }

    /// Start phase one for `card`. Replaces anything already running.
    pub fn start_fly_out(
        &mut self,
        card: CardId,
        from: Transform,
        velocity: Vec2,
        reference: Size,
        now: Instant,
        duration: Duration,
    ) {
        let target = Self::fly_out_target(from, velocity, reference);
        self.phase = Some(ShufflePhase::FlyOut {
            card,
            motion: Tween::new(from, target, now, duration, Easing::EaseInCubic),
            fade: Tween::new(1.0, 0.0, now, duration, Easing::Linear),
        });
    }

    /// Start phase two: cycle the model and ease every card to its new depth.
    ///
    /// `entering` is the external index and content for the recycled slot.
    /// Returns `false` (and stops) if the model could not cycle.
    pub fn begin_reflow<H>(
        &mut self,
        model: &mut StackModel<H>,
        entering: (usize, Option<H>),
        style: &DepthStyle,
        now: Instant,
        duration: Duration,
    ) -> bool {
        let previous: Vec<(CardId, DepthPose)> =
            model.window().iter().map(|card| (card.id(), card.pose())).collect();

        if !model.cycle_front() {
            self.phase = None;
            return false;
        }

        let Some(back) = model.back_mut() else {
            self.phase = None;
            return false;
        };
        let (index, content) = entering;
        back.reset();
        back.dragging = false;
        back.set_parent(CardParent::Stack);
        back.assign(index, content);
        back.set_alpha(0.0);
        back.set_pose(depth_pose(back.depth, style));
        let entering_id = back.id();

        let poses = model
            .window()
            .iter()
            .map(|card| {
                let target = depth_pose(card.depth_index(), style);
                let from = if card.id() == entering_id {
                    target
                } else {
                    previous
                        .iter()
                        .find(|(id, _)| *id == card.id())
                        .map(|(_, pose)| *pose)
                        .unwrap_or(target)
                };
                (
                    card.id(),
                    Tween::new(from, target, now, duration, Easing::EaseOutCubic),
                )
            })
            .collect();

        self.phase = Some(ShufflePhase::Reflow {
            poses,
            entering: entering_id,
            fade_in: Tween::new(0.0, 1.0, now, duration, Easing::Linear),
        });
        true
    }

    /// Apply the current frame to `model`.
    pub fn advance<H>(&mut self, model: &mut StackModel<H>, now: Instant) -> ShuffleStep {
        match &self.phase {
            None => ShuffleStep::Idle,
            Some(ShufflePhase::FlyOut { card, motion, fade }) => {
                if let Some(container) = model.card_mut(*card) {
                    container.set_transform(motion.sample(now));
                    container.set_alpha(fade.sample(now));
                }
                if motion.is_finished(now) {
                    ShuffleStep::FlyOutComplete
                } else {
                    ShuffleStep::Running
                }
            }
            Some(ShufflePhase::Reflow {
                poses,
                entering,
                fade_in,
            }) => {
                for (id, tween) in poses {
                    if let Some(container) = model.card_mut(*id) {
                        container.set_pose(tween.sample(now));
                    }
                }
                if let Some(container) = model.card_mut(*entering) {
                    container.set_alpha(fade_in.sample(now));
                }

                let settled =
                    fade_in.is_finished(now) && poses.iter().all(|(_, t)| t.is_finished(now));
                if settled {
                    self.phase = None;
                    ShuffleStep::Settled {
                        front: model.front().map(|card| card.id()),
                    }
                } else {
                    ShuffleStep::Running
                }
            }
        }
    }

    /// Drop whatever is running. Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.phase.take().is_some()
    }
}
