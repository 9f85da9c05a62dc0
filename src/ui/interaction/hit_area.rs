//! Clickable regions.
//!
//! Components register hit areas while rendering; the event loop asks the
//! registry what lies under a mouse press. Later registrations sit on top.

use ratatui::layout::Rect;
use ratatui::style::Style;

/// What a press on a hit area does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Press on the front card: starts a drag.
    FrontCard,
    /// Shuffle the front card away without a drag.
    SkipFront,
    ToggleLockX,
    ToggleLockY,
    ToggleOverlay,
    Reload,
    ReloadFromStart,
    MoreVisible,
    FewerVisible,
}

/// A clickable region with an associated action.
#[derive(Debug, Clone)]
pub struct HitArea {
    pub rect: Rect,
    pub action: ClickAction,
    pub hover_style: Option<Style>,
}

impl HitArea {
    pub fn new(rect: Rect, action: ClickAction) -> Self {
        Self {
            rect,
            action,
            hover_style: None,
        }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x + self.rect.width
            && y >= self.rect.y
            && y < self.rect.y + self.rect.height
    }
}

/// Hit areas registered during the last render.
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    /// Last pointer position seen by [`update_hover`](Self::update_hover)
    pointer: Option<(u16, u16)>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all areas. Call at the start of each render.
    ///
    /// The pointer position is kept, so hover styling carries over to the
    /// areas registered by the next render.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, action: ClickAction, hover_style: Option<Style>) {
        self.areas.push(HitArea {
            hover_style,
            ..HitArea::new(rect, action)
        });
    }

    /// Topmost action under `(x, y)`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.find_index(x, y).map(|idx| self.areas[idx].action)
    }

    /// Track the pointer. Returns `true` if the hovered action changed.
    pub fn update_hover(&mut self, x: u16, y: u16) -> bool {
        let before = self.hovered_action();
        self.pointer = Some((x, y));
        before != self.hovered_action()
    }

    fn find_index(&self, x: u16, y: u16) -> Option<usize> {
        self.areas
            .iter()
            .enumerate()
            .rev()
            .find(|(_, area)| area.contains(x, y))
            .map(|(i, _)| i)
    }

    fn hovered_index(&self) -> Option<usize> {
        let (x, y) = self.pointer?;
        self.find_index(x, y)
    }

    /// Hover style for `rect` if the pointer is over it.
    pub fn hover_style(&self, rect: Rect) -> Option<Style> {
        let area = self.areas.get(self.hovered_index()?)?;
        if area.rect == rect {
            area.hover_style
        } else {
            None
        }
    }

    pub fn hovered_action(&self) -> Option<ClickAction> {
        self.hovered_index().map(|idx| self.areas[idx].action)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn make_rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
        Rect::new(x, y, width, height)
    }

    #[test]
    fn test_hit_area_contains() {
        let area = HitArea::new(make_rect(10, 10, 20, 10), ClickAction::FrontCard);

        assert!(area.contains(10, 10)); // Top-left corner
        assert!(area.contains(29, 19)); // Bottom-right corner
        assert!(!area.contains(9, 10));
        assert!(!area.contains(30, 10)); // x + width is exclusive
        assert!(!area.contains(10, 20)); // y + height is exclusive
    }

    #[test]
    fn test_hit_area_zero_size() {
        let area = HitArea::new(make_rect(5, 5, 0, 0), ClickAction::Reload);
        assert!(!area.contains(5, 5));
    }

    #[test]
    fn test_hit_test_overlapping_areas() {
        let mut registry = HitAreaRegistry::new();
        registry.register(make_rect(0, 0, 20, 20), ClickAction::FrontCard, None);
        registry.register(make_rect(5, 5, 10, 10), ClickAction::ToggleOverlay, None);

        assert_eq!(registry.hit_test(10, 10), Some(ClickAction::ToggleOverlay));
        assert_eq!(registry.hit_test(2, 2), Some(ClickAction::FrontCard));
        assert_eq!(registry.hit_test(50, 50), None);
    }

    #[test]
    fn test_hover_tracking() {
        let mut registry = HitAreaRegistry::new();
        let style = Style::default().bg(Color::Blue);
        registry.register(make_rect(0, 0, 10, 1), ClickAction::ToggleLockX, Some(style));
        registry.register(make_rect(12, 0, 10, 1), ClickAction::ToggleLockY, None);

        assert!(registry.update_hover(3, 0));
        assert!(!registry.update_hover(4, 0));
        assert_eq!(registry.hovered_action(), Some(ClickAction::ToggleLockX));
        assert_eq!(registry.hover_style(make_rect(0, 0, 10, 1)), Some(style));
        assert_eq!(registry.hover_style(make_rect(12, 0, 10, 1)), None);

        assert!(registry.update_hover(40, 5));
        assert_eq!(registry.hovered_action(), None);
    }

    #[test]
    fn test_registry_clear_keeps_pointer() {
        let mut registry = HitAreaRegistry::new();
        registry.register(make_rect(0, 0, 10, 10), ClickAction::FrontCard, None);
        registry.update_hover(1, 1);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.hovered_action(), None);

        registry.register(make_rect(0, 0, 10, 10), ClickAction::Reload, None);
        assert_eq!(registry.hovered_action(), Some(ClickAction::Reload));
    }
}
