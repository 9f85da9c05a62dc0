//! The stack façade.
//!
//! [`StackController`] owns the data source, the visible window and the two
//! animation state machines, and is the only thing that mutates them. All
//! calls are expected on one thread; time always comes in as an explicit
//! [`Instant`] so hosts drive animations from their own tick.

use std::fmt;
use std::time::{Duration, Instant};

use super::card::{CardContainer, CardId, CardParent};
use super::config::StackConfig;
use super::geometry::{Point, Size, Transform, Vec2};
use super::gesture::{DragSettings, GestureController, Release};
use super::model::StackModel;
use super::shuffle::{ShuffleAnimator, ShuffleStep};
use super::source::{MovedToTop, ObserverRegistry, OverlayHost, StackDataSource, SubscriptionId};

/// What a drag-end did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was active.
    Ignored,
    /// The front card is flying out and will be cycled to the back.
    Committed,
    /// The front card is animating back to rest.
    SnappedBack,
}

/// Orchestrates the model, gestures and shuffle for one card stack.
pub struct StackController<S: StackDataSource> {
    source: S,
    config: StackConfig,
    model: StackModel<S::Item>,
    /// External index shown by the front card.
    head: usize,
    /// Item count captured at the last reload.
    item_count: usize,
    card_size: Size,
    gesture: GestureController,
    shuffle: ShuffleAnimator,
    observers: ObserverRegistry<S::Item>,
}

impl<S: StackDataSource> fmt::Debug for StackController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackController")
            .field("head", &self.head)
            .field("item_count", &self.item_count)
            .field("window", &self.model.len())
            .field("config", &self.config)
            .field("gesture", &self.gesture)
            .field("shuffle", &self.shuffle)
            .finish_non_exhaustive()
    }
}

impl<S: StackDataSource> StackController<S> {
    /// Create a controller and build the initial window.
    pub fn new(source: S, config: StackConfig) -> Self {
        let config = config.validated();
        let mut controller = Self {
            source,
            model: StackModel::new(config.max_visible_items),
            config,
            head: 0,
            item_count: 0,
            card_size: Size::ZERO,
            gesture: GestureController::new(),
            shuffle: ShuffleAnimator::new(),
            observers: ObserverRegistry::new(),
        };
        controller.reload_data();
        controller
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the data source. Call [`reload_data`](Self::reload_data)
    /// afterwards for changes to show up.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Front-to-back containers of the visible window.
    pub fn window(&self) -> &[CardContainer<S::Item>] {
        self.model.window()
    }

    pub fn front(&self) -> Option<&CardContainer<S::Item>> {
        self.model.front()
    }

    pub fn card(&self, id: CardId) -> Option<&CardContainer<S::Item>> {
        self.model.card(id)
    }

    /// External index of the item at the front of the stack.
    pub fn head_index(&self) -> usize {
        self.head
    }

    /// Item count as of the last reload.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    /// Size of the front card, used as the release-threshold reference.
    /// Read at drag-begin.
    pub fn set_card_size(&mut self, size: Size) {
        self.card_size = size;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// A snap-back or shuffle is in progress.
    pub fn is_animating(&self) -> bool {
        self.gesture.is_snapping_back() || self.shuffle.is_active()
    }

    /// Whether a drag-begin would currently be accepted.
    pub fn is_interactive(&self) -> bool {
        self.gesture.is_idle()
            && !self.shuffle.is_active()
            && self.model.front().is_some_and(|card| card.is_renderable())
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// Re-query the data source and rebuild the window, keeping the current
    /// head index (wrapped into the new count).
    pub fn reload_data(&mut self) {
        self.rebuild();
    }

    /// Rebuild the window starting from the first item.
    pub fn reload_from_start(&mut self) {
        self.head = 0;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        if self.cancel_animations() {
            tracing::debug!("Cancelled in-flight stack animation before rebuild");
        }

        let count = self.source.count();
        self.item_count = count;
        self.head = if count == 0 { 0 } else { self.head % count };

        let source = &self.source;
        self.model.set_capacity(self.config.max_visible_items);
        let len = self
            .model
            .rebuild(count, self.head, |index| source.content_at(index));
        self.model.settle_poses(&self.config.depth_style);

        let empty_slots = self
            .model
            .window()
            .iter()
            .filter(|card| !card.is_renderable())
            .count();
        if empty_slots > 0 {
            tracing::warn!(empty_slots, "Data source returned null content for visible slots");
        }
        tracing::debug!(count, head = self.head, window = len, "Rebuilt card stack");
    }

    /// Cancel the drag, snap-back and shuffle, leaving every card at rest.
    fn cancel_animations(&mut self) -> bool {
        let was_active = !self.gesture.is_idle() || self.shuffle.is_active();
        self.gesture.abort();
        self.shuffle.cancel();
        for card in self.model.cards_mut() {
            card.reset();
            card.dragging = false;
            card.set_parent(CardParent::Stack);
        }
        was_active
    }

    /// Cancel everything, drop the window and forget all observers.
    pub fn teardown(&mut self) {
        self.cancel_animations();
        self.model.clear();
        self.observers.clear();
        self.item_count = 0;
        tracing::debug!("Card stack torn down");
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Validate and apply a configuration.
    ///
    /// A change of `max_visible_items` rebuilds the window. A running drag
    /// keeps the settings it started with.
    pub fn set_configuration(&mut self, config: StackConfig) {
        let config = config.validated();
        let needs_rebuild = config.max_visible_items != self.config.max_visible_items;
        let style_changed = config.depth_style != self.config.depth_style;
        self.config = config;

        if needs_rebuild {
            tracing::info!(
                max_visible_items = self.config.max_visible_items,
                "Visible item count changed"
            );
            self.rebuild();
        } else if style_changed && !self.shuffle.is_active() {
            self.model.settle_poses(&self.config.depth_style);
        }
    }

    pub fn set_max_visible_items(&mut self, count: usize) {
        let config = self.config.clone().with_max_visible_items(count);
        self.set_configuration(config);
    }

    pub fn set_prevent_x(&mut self, prevent: bool) {
        let config = self.config.clone().with_prevent_x(prevent);
        self.set_configuration(config);
    }

    pub fn set_prevent_y(&mut self, prevent: bool) {
        let config = self.config.clone().with_prevent_y(prevent);
        self.set_configuration(config);
    }

    pub fn set_shuffle_animation_duration(&mut self, duration: Duration) {
        let config = self.config.clone().with_shuffle_animation_duration(duration);
        self.set_configuration(config);
    }

    pub fn set_overlay_host(&mut self, host: Option<OverlayHost>) {
        let config = self.config.clone().with_overlay_host(host);
        self.set_configuration(config);
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register a moved-to-top observer. Called synchronously from
    /// [`advance`](Self::advance) when a cycle settles.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&MovedToTop<S::Item>) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Begin dragging the front card. Ignored while another drag, a
    /// snap-back or a shuffle is running, or when the front slot is empty.
    pub fn begin_drag(&mut self, point: Point, now: Instant) -> bool {
        if self.shuffle.is_active() {
            return false;
        }
        let Some(front) = self.model.front() else {
            return false;
        };
        if !front.is_renderable() {
            return false;
        }
        let card = front.id();

        let settings = DragSettings {
            prevent_x: self.config.prevent_x,
            prevent_y: self.config.prevent_y,
            reference: self.card_size,
            max_rotation_deg: self.config.max_rotation_deg,
            release: self.config.release_policy(),
            snap_back_duration: self.config.snap_back_duration,
            can_commit: self.model.len() >= 2,
        };
        if !self.gesture.begin(card, point, settings, now) {
            return false;
        }

        let overlay = self.config.overlay_host;
        if let Some(container) = self.model.card_mut(card) {
            container.dragging = true;
            if let Some(host) = overlay {
                container.set_parent(CardParent::Overlay(host));
            }
        }
        tracing::debug!(x = point.x, y = point.y, "Drag began");
        true
    }

    /// Move the active drag. Returns `false` if no drag is active.
    pub fn drag_to(&mut self, point: Point, now: Instant) -> bool {
        let Some((card, transform)) = self.gesture.update(point, now) else {
            return false;
        };
        if let Some(container) = self.model.card_mut(card) {
            container.set_transform(transform);
        }
        true
    }

    /// Release the active drag at `point`.
    pub fn end_drag(&mut self, point: Point, now: Instant) -> DragOutcome {
        let Some(release) = self.gesture.end(point, now) else {
            return DragOutcome::Ignored;
        };

        let outcome = match release {
            Release::Commit {
                card,
                transform,
                velocity,
                reference,
            } => {
                self.release_card(card);
                if let Some(container) = self.model.card_mut(card) {
                    container.set_transform(transform);
                }
                self.shuffle.start_fly_out(
                    card,
                    transform,
                    velocity,
                    reference,
                    now,
                    self.config.shuffle_animation_duration,
                );
                tracing::info!(
                    dx = transform.translation.x,
                    dy = transform.translation.y,
                    vx = velocity.x,
                    vy = velocity.y,
                    "Release committed, shuffling front card"
                );
                DragOutcome::Committed
            }
            Release::SnapBack { card, from } => {
                self.release_card(card);
                tracing::debug!(
                    dx = from.translation.x,
                    dy = from.translation.y,
                    "Release below threshold, snapping back"
                );
                DragOutcome::SnappedBack
            }
        };

        self.advance(now);
        outcome
    }

    /// Abandon the active drag; the card jumps back without animating.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(card) = self.gesture.cancel() else {
            return false;
        };
        self.release_card(card);
        if let Some(container) = self.model.card_mut(card) {
            container.reset();
        }
        tracing::debug!("Drag cancelled");
        true
    }

    /// Send the front card to the back without a drag, as if it had been
    /// thrown to the right. Works on an empty front slot too, which is the
    /// only way past one other than [`reload_from_start`](Self::reload_from_start).
    ///
    /// Ignored while a gesture or shuffle is running, or with fewer than two
    /// cards in the window.
    pub fn shuffle_front(&mut self, now: Instant) -> bool {
        if !self.gesture.is_idle() || self.shuffle.is_active() || self.model.len() < 2 {
            return false;
        }
        let Some(card) = self.model.front().map(|card| card.id()) else {
            return false;
        };
        self.shuffle.start_fly_out(
            card,
            Transform::IDENTITY,
            Vec2::ZERO,
            self.card_size,
            now,
            self.config.shuffle_animation_duration,
        );
        tracing::info!("Shuffling front card without a drag");
        self.advance(now);
        true
    }

    fn release_card(&mut self, card: CardId) {
        if let Some(container) = self.model.card_mut(card) {
            container.dragging = false;
            container.set_parent(CardParent::Stack);
        }
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Apply the animation frame for `now`. Returns `true` while anything is
    /// still animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        if let Some(frame) = self.gesture.advance(now) {
            if let Some(container) = self.model.card_mut(frame.card) {
                container.set_transform(frame.transform);
            }
        }

        loop {
            match self.shuffle.advance(&mut self.model, now) {
                ShuffleStep::Idle | ShuffleStep::Running => break,
                ShuffleStep::FlyOutComplete => {
                    let entering = self.advance_head();
                    let started = self.shuffle.begin_reflow(
                        &mut self.model,
                        entering,
                        &self.config.depth_style,
                        now,
                        self.config.shuffle_animation_duration,
                    );
                    if !started {
                        tracing::warn!("Shuffle committed on a window too small to cycle");
                        break;
                    }
                }
                ShuffleStep::Settled { .. } => {
                    self.model.settle_poses(&self.config.depth_style);
                    self.notify_moved_to_top();
                    break;
                }
            }
        }

        self.is_animating()
    }

    /// Move the head forward and fetch the item entering at the back.
    fn advance_head(&mut self) -> (usize, Option<S::Item>) {
        let count = self.item_count.max(1);
        self.head = (self.head + 1) % count;
        let index = (self.head + self.model.len().saturating_sub(1)) % count;
        (index, self.source.content_at(index))
    }

    fn notify_moved_to_top(&mut self) {
        let Some(front) = self.model.front() else {
            return;
        };
        let event = MovedToTop {
            item_index: front.item_index().unwrap_or(self.head),
            content: front.content().cloned(),
        };
        tracing::info!(item_index = event.item_index, "Card moved to top");
        self.observers.notify(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(count: usize, visible: usize) -> StackController<Vec<usize>> {
        let config = StackConfig::default()
            .with_max_visible_items(visible)
            .with_shuffle_animation_duration(Duration::from_millis(100))
            .with_snap_back_duration(Duration::from_millis(50));
        let mut controller = StackController::new((0..count).collect(), config);
        controller.set_card_size(Size::new(40.0, 12.0));
        controller
    }

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    fn items(controller: &StackController<Vec<usize>>) -> Vec<usize> {
        controller
            .window()
            .iter()
            .filter_map(|card| card.content().copied())
            .collect()
    }

    fn commit(controller: &mut StackController<Vec<usize>>, now: Instant) {
        assert!(controller.begin_drag(Point::new(20.0, 6.0), now));
        controller.drag_to(Point::new(30.0, 6.0), ms(now, 100));
        let outcome = controller.end_drag(Point::new(35.0, 6.0), ms(now, 300));
        assert_eq!(outcome, DragOutcome::Committed);
    }

    #[test]
    fn test_cycle_advances_head_and_notifies() {
        let now = Instant::now();
        let mut controller = controller(5, 3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        commit(&mut controller, now);
        assert!(!controller.is_interactive());
        assert!(controller.advance(ms(now, 400)));
        assert!(!controller.advance(ms(now, 600)));

        assert_eq!(items(&controller), vec![1, 2, 3]);
        assert_eq!(controller.head_index(), 1);
        assert_eq!(
            *seen.borrow(),
            vec![MovedToTop {
                item_index: 1,
                content: Some(1)
            }]
        );
    }

    #[test]
    fn test_zero_duration_shuffle_completes_on_release() {
        let now = Instant::now();
        let mut controller = controller(4, 2);
        controller.set_shuffle_animation_duration(Duration::ZERO);
        commit(&mut controller, now);
        assert!(!controller.is_animating());
        assert_eq!(items(&controller), vec![1, 2]);
    }

    #[test]
    fn test_head_wraps_around() {
        let now = Instant::now();
        let mut controller = controller(3, 3);
        controller.set_shuffle_animation_duration(Duration::ZERO);
        for round in 0..4u64 {
            commit(&mut controller, ms(now, round * 1000));
        }
        assert_eq!(controller.head_index(), 1);
        assert_eq!(items(&controller), vec![1, 2, 0]);
    }

    #[test]
    fn test_reload_preserves_head() {
        let now = Instant::now();
        let mut controller = controller(6, 3);
        controller.set_shuffle_animation_duration(Duration::ZERO);
        commit(&mut controller, now);
        commit(&mut controller, ms(now, 1000));
        controller.reload_data();
        assert_eq!(items(&controller), vec![2, 3, 4]);

        controller.reload_from_start();
        assert_eq!(items(&controller), vec![0, 1, 2]);
    }

    #[test]
    fn test_reload_wraps_head_into_smaller_source() {
        let now = Instant::now();
        let mut controller = controller(6, 2);
        controller.set_shuffle_animation_duration(Duration::ZERO);
        for round in 0..5u64 {
            commit(&mut controller, ms(now, round * 1000));
        }
        assert_eq!(controller.head_index(), 5);
        controller.source_mut().truncate(4);
        controller.reload_data();
        assert_eq!(controller.head_index(), 1);
        assert_eq!(items(&controller), vec![1, 2]);
    }

    #[test]
    fn test_reload_mid_animation_leaves_consistent_window() {
        let now = Instant::now();
        let mut controller = controller(5, 3);
        commit(&mut controller, now);
        controller.advance(ms(now, 350));
        controller.reload_data();

        assert!(!controller.is_animating());
        assert!(controller.is_interactive());
        for card in controller.window() {
            assert!(card.transform().is_identity());
            assert_eq!(card.alpha(), 1.0);
            assert!(!card.is_dragging());
        }
        // A stale tick after the reload must not touch the new window.
        assert!(!controller.advance(ms(now, 1000)));
        assert_eq!(items(&controller), vec![0, 1, 2]);
    }

    #[test]
    fn test_overlay_reparenting() {
        let now = Instant::now();
        let host = OverlayHost::new(1);
        let mut controller = controller(3, 3);
        controller.set_overlay_host(Some(host));

        controller.begin_drag(Point::new(0.0, 0.0), now);
        assert_eq!(controller.front().unwrap().parent(), CardParent::Overlay(host));
        controller.cancel_drag();
        assert_eq!(controller.front().unwrap().parent(), CardParent::Stack);
        assert!(controller.front().unwrap().transform().is_identity());
    }

    #[test]
    fn test_config_change_does_not_alter_running_drag() {
        let now = Instant::now();
        let mut controller = controller(3, 3);
        controller.begin_drag(Point::new(10.0, 5.0), now);
        controller.set_prevent_x(true);
        controller.drag_to(Point::new(14.0, 5.0), ms(now, 16));
        assert_eq!(controller.front().unwrap().transform().translation.x, 4.0);
    }

    #[test]
    fn test_changing_visible_count_rebuilds() {
        let mut controller = controller(5, 3);
        controller.set_max_visible_items(4);
        assert_eq!(controller.window().len(), 4);
        controller.set_max_visible_items(0);
        assert_eq!(controller.config().max_visible_items, 1);
        assert_eq!(controller.window().len(), 1);
    }

    #[test]
    fn test_shuffle_front_cycles_without_drag() {
        let start = Instant::now();
        let mut stack = controller(4, 3);
        assert!(stack.shuffle_front(start));
        assert!(!stack.shuffle_front(ms(start, 10)));
        assert!(!stack.begin_drag(Point::new(0.0, 0.0), ms(start, 10)));

        let mut now = start;
        while stack.advance(now) {
            now += Duration::from_millis(16);
        }
        assert_eq!(stack.head_index(), 1);
        assert!(!controller(1, 3).shuffle_front(now));
    }

    #[test]
    fn test_teardown_clears_everything() {
        let now = Instant::now();
        let mut controller = controller(4, 3);
        let id = controller.subscribe(|_| {});
        commit(&mut controller, now);
        controller.teardown();
        assert!(controller.window().is_empty());
        assert!(!controller.is_animating());
        assert!(!controller.unsubscribe(id));
        assert!(!controller.begin_drag(Point::new(0.0, 0.0), now));
    }
}
