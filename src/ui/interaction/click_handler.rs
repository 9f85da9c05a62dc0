//! Click action handler.
//!
//! Processes actions returned by the hit area registry, translating them
//! into App state mutations.

use std::time::Instant;

use super::hit_area::ClickAction;
use crate::app::App;
use crate::stack::Point;

/// Handle a press on a hit area at `point`.
pub fn handle_click_action(app: &mut App, action: ClickAction, point: Point, now: Instant) {
    app.mark_dirty();
    tracing::debug!(?action, "Click");

    match action {
        ClickAction::FrontCard => app.begin_drag(point, now),
        ClickAction::SkipFront => app.skip_front(now),
        ClickAction::ToggleLockX => app.toggle_lock_x(),
        ClickAction::ToggleLockY => app.toggle_lock_y(),
        ClickAction::ToggleOverlay => app.toggle_overlay(),
        ClickAction::Reload => app.reload(),
        ClickAction::ReloadFromStart => app.reload_from_start(),
        ClickAction::MoreVisible => app.change_visible(1),
        ClickAction::FewerVisible => app.change_visible(-1),
    }
}
