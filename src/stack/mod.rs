//! Headless card stack.
//!
//! A bounded window of [`CardContainer`]s drawn as an overlapping pile. The
//! front card can be dragged; past the release threshold it flies out, is
//! recycled to the back with the next item from the [`StackDataSource`], and
//! the remaining cards reflow forward.
//!
//! Components, leaf to root:
//!
//! - [`card`]: one materialized slot with its transform
//! - [`model`]: the ordered, fixed-capacity window
//! - [`gesture`]: the drag state machine and release decision
//! - [`shuffle`]: fly-out and reflow sequencing
//! - [`controller`]: the façade hosts talk to
//!
//! Nothing in here renders or reads input devices; see [`crate::ui`] and
//! [`crate::app`] for a terminal host.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use cardstack::stack::{DragOutcome, Point, Size, StackConfig, StackController};
//!
//! let config = StackConfig::default().with_shuffle_animation_duration(Duration::ZERO);
//! let mut stack = StackController::new(vec!["a", "b", "c", "d"], config);
//! stack.set_card_size(Size::new(40.0, 12.0));
//!
//! let now = Instant::now();
//! stack.begin_drag(Point::new(10.0, 5.0), now);
//! stack.drag_to(Point::new(30.0, 5.0), now + Duration::from_millis(200));
//! let outcome = stack.end_drag(Point::new(30.0, 5.0), now + Duration::from_millis(400));
//!
//! assert_eq!(outcome, DragOutcome::Committed);
//! assert_eq!(stack.front().and_then(|card| card.content()), Some(&"b"));
//! ```

pub mod animation;
pub mod card;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod model;
pub mod shuffle;
pub mod source;

pub use animation::{Easing, Lerp, Tween};
pub use card::{CardContainer, CardId, CardParent};
pub use config::StackConfig;
pub use controller::{DragOutcome, StackController};
pub use geometry::{depth_pose, rotation_for, DepthPose, DepthStyle, Point, Size, Transform, Vec2};
pub use gesture::{DragSession, DragSettings, GestureController, Release, ReleasePolicy};
pub use model::StackModel;
pub use shuffle::{ShuffleAnimator, ShuffleStep};
pub use source::{MovedToTop, ObserverRegistry, OverlayHost, StackDataSource, SubscriptionId};
