//! The visible window: a fixed-capacity, front-to-back ring of containers.

use super::card::{CardContainer, CardId};
use super::geometry::{depth_pose, DepthStyle};

/// Ordered containers for the materialized part of the item sequence.
///
/// Invariant: the container at position `i` has `depth_index() == i`, so
/// depths are always exactly `0..len` with the front card first.
#[derive(Debug, Clone)]
pub struct StackModel<H> {
    cards: Vec<CardContainer<H>>,
    capacity: usize,
    next_id: u64,
}

impl<H> StackModel<H> {
    /// `capacity` of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vec::new(),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the window capacity. Takes effect on the next [`rebuild`](Self::rebuild).
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
    }

    /// Front-to-back view for rendering.
    pub fn window(&self) -> &[CardContainer<H>] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn front(&self) -> Option<&CardContainer<H>> {
        self.cards.first()
    }

    pub fn back(&self) -> Option<&CardContainer<H>> {
        self.cards.last()
    }

    pub(crate) fn back_mut(&mut self) -> Option<&mut CardContainer<H>> {
        self.cards.last_mut()
    }

    pub fn card(&self, id: CardId) -> Option<&CardContainer<H>> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut CardContainer<H>> {
        self.cards.iter_mut().find(|card| card.id() == id)
    }

    pub(crate) fn cards_mut(&mut self) -> impl Iterator<Item = &mut CardContainer<H>> {
        self.cards.iter_mut()
    }

    /// Send the front container to the back.
    ///
    /// Every other container moves one step forward. Returns `false` and does
    /// nothing when fewer than two containers are materialized.
    pub fn cycle_front(&mut self) -> bool {
        if self.cards.len() < 2 {
            return false;
        }
        self.cards.rotate_left(1);
        self.renumber();
        true
    }

    /// Drop every container and rematerialize the window.
    ///
    /// Materializes `min(capacity, count)` containers, assigning content for
    /// external indices `head, head + 1, ...` (modulo `count`). Returns the new
    /// window length.
    pub fn rebuild<F>(&mut self, count: usize, head: usize, mut provider: F) -> usize
    where
        F: FnMut(usize) -> Option<H>,
    {
        self.cards.clear();
        if count == 0 {
            return 0;
        }

        let len = self.capacity.min(count);
        for depth in 0..len {
            let index = (head + depth) % count;
            let mut card = CardContainer::new(self.issue_id(), depth);
            card.assign(index, provider(index));
            self.cards.push(card);
        }
        len
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Snap every container to the resting pose of its depth.
    pub fn settle_poses(&mut self, style: &DepthStyle) {
        for card in self.cards.iter_mut() {
            card.set_pose(depth_pose(card.depth, style));
        }
    }

    fn renumber(&mut self) {
        for (depth, card) in self.cards.iter_mut().enumerate() {
            card.depth = depth;
        }
    }

    fn issue_id(&mut self) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(model: &StackModel<String>) -> Vec<String> {
        model
            .window()
            .iter()
            .map(|card| card.content().cloned().unwrap_or_default())
            .collect()
    }

    fn build(capacity: usize, count: usize, head: usize) -> StackModel<String> {
        let mut model = StackModel::new(capacity);
        model.rebuild(count, head, |index| Some(format!("item-{}", index)));
        model
    }

    fn assert_depths_are_dense(model: &StackModel<String>) {
        let depths: Vec<usize> = model.window().iter().map(|c| c.depth_index()).collect();
        let expected: Vec<usize> = (0..model.len()).collect();
        assert_eq!(depths, expected);
    }

    #[test]
    fn test_window_length_is_min_of_capacity_and_count() {
        for capacity in 1..6 {
            for count in 0..8 {
                let model = build(capacity, count, 0);
                assert_eq!(model.len(), capacity.min(count));
                assert_depths_are_dense(&model);
            }
        }
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let model = build(0, 4, 0);
        assert_eq!(model.capacity(), 1);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_rebuild_starts_at_head_and_wraps() {
        let model = build(3, 5, 4);
        assert_eq!(labels(&model), vec!["item-4", "item-0", "item-1"]);
        let indices: Vec<_> = model.window().iter().map(|c| c.item_index()).collect();
        assert_eq!(indices, vec![Some(4), Some(0), Some(1)]);
    }

    #[test]
    fn test_cycle_front_moves_front_to_back() {
        let mut model = build(4, 6, 0);
        let front_id = model.front().unwrap().id();
        let before: Vec<_> = model.window().iter().map(|c| (c.id(), c.depth_index())).collect();

        assert!(model.cycle_front());

        let moved = model.card(front_id).unwrap();
        assert_eq!(moved.depth_index(), model.len() - 1);
        for (id, depth) in before.into_iter().skip(1) {
            assert_eq!(model.card(id).unwrap().depth_index(), depth - 1);
        }
        assert_depths_are_dense(&model);
    }

    #[test]
    fn test_cycle_front_is_noop_for_small_windows() {
        let mut single = build(3, 1, 0);
        assert!(!single.cycle_front());
        assert_eq!(single.front().unwrap().depth_index(), 0);

        let mut empty = build(3, 0, 0);
        assert!(!empty.cycle_front());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_null_handles_do_not_abort_rebuild() {
        let mut model: StackModel<String> = StackModel::new(3);
        let len = model.rebuild(5, 0, |index| {
            if index == 1 {
                None
            } else {
                Some(index.to_string())
            }
        });
        assert_eq!(len, 3);
        let renderable: Vec<bool> = model.window().iter().map(|c| c.is_renderable()).collect();
        assert_eq!(renderable, vec![true, false, true]);
    }

    #[test]
    fn test_rebuild_issues_fresh_ids() {
        let mut model = build(2, 2, 0);
        let old: Vec<CardId> = model.window().iter().map(|c| c.id()).collect();
        model.rebuild(2, 0, |i| Some(i.to_string()));
        for card in model.window() {
            assert!(!old.contains(&card.id()));
        }
    }

    #[test]
    fn test_settle_poses_follows_depth() {
        let style = DepthStyle::default();
        let mut model = build(3, 3, 0);
        model.settle_poses(&style);
        for card in model.window() {
            assert_eq!(card.pose(), depth_pose(card.depth_index(), &style));
        }
    }
}
