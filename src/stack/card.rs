//! Card containers: one materialized slot of the visible window.

use super::geometry::{DepthPose, Transform};
use super::source::OverlayHost;

/// Stable identity of a container slot. Survives cycles and content
/// reassignment; a rebuild issues fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub(crate) u64);

impl CardId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Where a container's content is currently drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardParent {
    /// Drawn inside the stack's own area (clipped to it).
    #[default]
    Stack,
    /// Temporarily reparented into an overlay layer while being dragged.
    Overlay(OverlayHost),
}

/// A lightweight wrapper around one content handle.
///
/// Owns the drag transform, depth pose and fade of its slot. Content is
/// swapped in place when the slot is recycled to the back of the stack.
#[derive(Debug, Clone)]
pub struct CardContainer<H> {
    id: CardId,
    content: Option<H>,
    item_index: Option<usize>,
    pub(crate) depth: usize,
    transform: Transform,
    pose: DepthPose,
    alpha: f32,
    pub(crate) dragging: bool,
    parent: CardParent,
}

impl<H> CardContainer<H> {
    pub(crate) fn new(id: CardId, depth: usize) -> Self {
        Self {
            id,
            content: None,
            item_index: None,
            depth,
            transform: Transform::IDENTITY,
            pose: DepthPose::FRONT,
            alpha: 1.0,
            dragging: false,
            parent: CardParent::Stack,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    /// Depth in the window, 0 being the front card.
    pub fn depth_index(&self) -> usize {
        self.depth
    }

    pub fn content(&self) -> Option<&H> {
        self.content.as_ref()
    }

    /// Index into the external item sequence this slot currently shows.
    pub fn item_index(&self) -> Option<usize> {
        self.item_index
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn pose(&self) -> DepthPose {
        self.pose
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn parent(&self) -> CardParent {
        self.parent
    }

    /// An empty container has nothing to draw and cannot be dragged.
    pub fn is_renderable(&self) -> bool {
        self.content.is_some()
    }

    /// Replace the displayed content without touching transform state.
    ///
    /// `None` clears the container; it stays empty until reassigned.
    pub fn set_content(&mut self, content: Option<H>) {
        self.content = content;
    }

    pub(crate) fn assign(&mut self, item_index: usize, content: Option<H>) {
        self.item_index = Some(item_index);
        self.set_content(content);
    }

    /// Detach the content so the host can reuse it elsewhere.
    pub fn take_content(&mut self) -> Option<H> {
        self.content.take()
    }

    pub fn apply_transform(&mut self, dx: f32, dy: f32, rotation_deg: f32) {
        self.transform = Transform::new(dx, dy, rotation_deg);
    }

    pub(crate) fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub(crate) fn set_pose(&mut self, pose: DepthPose) {
        self.pose = pose;
    }

    pub(crate) fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub(crate) fn set_parent(&mut self, parent: CardParent) {
        self.parent = parent;
    }

    /// Zero the transform and restore full opacity.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
        self.alpha = 1.0;
    }
}
