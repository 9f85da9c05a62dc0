//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::{controller, drag, ms, Recorder};
//!
//! let mut stack = controller(5, 3);
//! let recorder = Recorder::attach(&mut stack);
//! drag(&mut stack, Instant::now(), 20.0, 0.0);
//! ```

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cardstack::stack::{
    DragOutcome, MovedToTop, Point, Size, StackConfig, StackController, StackDataSource,
};

/// Card size used as the release-threshold reference in tests.
pub const CARD_SIZE: Size = Size::new(40.0, 12.0);

/// Where drags start: the middle of the front card.
pub const GRAB: Point = Point::new(20.0, 6.0);

pub fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}

/// Config with short, deterministic animation durations.
pub fn test_config(visible: usize) -> StackConfig {
    StackConfig::default()
        .with_max_visible_items(visible)
        .with_shuffle_animation_duration(Duration::from_millis(100))
        .with_snap_back_duration(Duration::from_millis(50))
}

/// Controller over items `0..count`.
pub fn controller(count: usize, visible: usize) -> StackController<Vec<usize>> {
    let mut stack = StackController::new((0..count).collect(), test_config(visible));
    stack.set_card_size(CARD_SIZE);
    stack
}

/// Content of the visible window, front to back.
pub fn window_items<S>(stack: &StackController<S>) -> Vec<Option<S::Item>>
where
    S: StackDataSource,
{
    stack
        .window()
        .iter()
        .map(|card| card.content().cloned())
        .collect()
}

/// Drag from [`GRAB`] by `(dx, dy)` slowly enough that only distance counts,
/// then release. Returns the outcome and the release time.
pub fn drag<S: StackDataSource>(
    stack: &mut StackController<S>,
    start: Instant,
    dx: f32,
    dy: f32,
) -> (DragOutcome, Instant) {
    let to = Point::new(GRAB.x + dx, GRAB.y + dy);
    stack.begin_drag(GRAB, start);
    stack.drag_to(to, ms(start, 200));
    let released = ms(start, 400);
    (stack.end_drag(to, released), released)
}

/// Run animations until nothing moves, stepping one 16ms frame at a time.
/// Returns the time at which the stack came to rest.
pub fn settle<S: StackDataSource>(stack: &mut StackController<S>, from: Instant) -> Instant {
    let mut now = from;
    for _ in 0..1000 {
        if !stack.advance(now) {
            return now;
        }
        now += Duration::from_millis(16);
    }
    panic!("stack never came to rest");
}

/// Collects moved-to-top notifications.
#[derive(Clone)]
pub struct Recorder<H> {
    events: Rc<RefCell<Vec<MovedToTop<H>>>>,
}

impl<H: Clone + 'static> Recorder<H> {
    pub fn attach<S>(stack: &mut StackController<S>) -> Self
    where
        S: StackDataSource<Item = H>,
    {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        stack.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        Self { events }
    }

    pub fn events(&self) -> Vec<MovedToTop<H>> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }
}

/// Source whose `None` entries have no content.
#[derive(Debug, Clone)]
pub struct SparseSource(pub Vec<Option<&'static str>>);

impl StackDataSource for SparseSource {
    type Item = &'static str;

    fn count(&self) -> usize {
        self.0.len()
    }

    fn content_at(&self, index: usize) -> Option<&'static str> {
        self.0.get(index).copied().flatten()
    }
}
