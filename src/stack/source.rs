//! Contracts between the stack and its host.
//!
//! - [`StackDataSource`] is required: it supplies the item count and content.
//! - Moved-to-top notifications are optional: hosts register closures in an
//!   [`ObserverRegistry`] and get a [`SubscriptionId`] back for unsubscribing.
//! - [`OverlayHost`] names a layer the dragged card is lifted into.

use std::fmt;

/// Supplies items for the stack.
///
/// Both methods are called synchronously from the controller's thread.
/// `content_at` returning `None` is the null handle: the slot is left empty
/// and non-interactive while the rest of the window still builds.
pub trait StackDataSource {
    /// Opaque content handle. Cloned when a notification is emitted.
    type Item: Clone;

    fn count(&self) -> usize;

    fn content_at(&self, index: usize) -> Option<Self::Item>;
}

impl<T: Clone> StackDataSource for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn content_at(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

/// Identifier of an overlay layer owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHost(u32);

impl OverlayHost {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// Emitted once per completed cycle, after the reflow animation settles.
#[derive(Debug, Clone, PartialEq)]
pub struct MovedToTop<H> {
    /// External index of the item now at the front.
    pub item_index: usize,
    /// Its content, or `None` if the data source returned a null handle.
    pub content: Option<H>,
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<H> = Box<dyn FnMut(&MovedToTop<H>)>;

/// Moved-to-top observers, keyed by subscription id.
pub struct ObserverRegistry<H> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<H>)>,
}

impl<H> Default for ObserverRegistry<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }
}

impl<H> fmt::Debug for ObserverRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<H> ObserverRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&MovedToTop<H>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the id was unknown (already removed or cleared).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer, in subscription order.
    pub fn notify(&mut self, event: &MovedToTop<H>) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }
}
