//! Tick and configuration toggles for the App.

use std::time::Instant;

use super::{App, OVERLAY_HOST};

impl App {
    /// Advance animations. Called from the event loop every frame.
    pub fn tick(&mut self, now: Instant) {
        let was_animating = self.stack.is_animating();
        let still_animating = self.stack.advance(now);
        // The settling frame ends the animation but still has to be drawn.
        if was_animating || still_animating {
            self.mark_dirty();
        }
    }

    /// Shuffle the front card away without dragging it. The only way past an
    /// empty card short of reloading from the start.
    pub fn skip_front(&mut self, now: Instant) {
        if self.stack.shuffle_front(now) {
            self.status = None;
            self.mark_dirty();
        }
    }

    /// Write the current settings to the config file, if there is one.
    pub fn save_config(&mut self) {
        let Some(manager) = &self.config_manager else {
            self.set_status("No config file to save to");
            return;
        };
        let path = manager.config_path().display().to_string();
        match manager.save(&self.config) {
            Ok(()) => {
                tracing::info!(path = %path, "Saved settings");
                self.set_status(format!("Saved to {}", path));
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), error = %e, "Failed to save settings");
                self.set_status(e.to_string());
            }
        }
    }

    pub fn reload(&mut self) {
        self.stack.reload_data();
        self.set_status("Reloaded");
    }

    pub fn reload_from_start(&mut self) {
        self.stack.reload_from_start();
        self.set_status("Reloaded from the first card");
    }

    /// Grow or shrink the visible window by `delta` cards.
    pub fn change_visible(&mut self, delta: isize) {
        let current = self.stack.config().max_visible_items;
        let target = current.saturating_add_signed(delta).max(1);
        if target != current {
            self.stack.set_max_visible_items(target);
            self.config.stack.max_visible_items = target;
            self.set_status(format!("{} visible", target));
        }
    }

    pub fn add_card(&mut self) {
        self.stack.source_mut().push_card();
        self.config.deck_size = self.stack.source().len();
        self.stack.reload_data();
        self.set_status(format!("{} cards", self.config.deck_size));
    }

    pub fn remove_card(&mut self) {
        if self.stack.source_mut().pop_card() {
            self.config.deck_size = self.stack.source().len();
            self.stack.reload_data();
            self.set_status(format!("{} cards", self.config.deck_size));
        }
    }

    pub fn toggle_lock_x(&mut self) {
        let prevent = !self.stack.config().prevent_x;
        self.stack.set_prevent_x(prevent);
        self.config.stack.prevent_x = prevent;
        self.set_status(if prevent { "Horizontal drag locked" } else { "Horizontal drag unlocked" });
    }

    pub fn toggle_lock_y(&mut self) {
        let prevent = !self.stack.config().prevent_y;
        self.stack.set_prevent_y(prevent);
        self.config.stack.prevent_y = prevent;
        self.set_status(if prevent { "Vertical drag locked" } else { "Vertical drag unlocked" });
    }

    /// Switch between dragging inside the stack area and above everything.
    pub fn toggle_overlay(&mut self) {
        self.config.use_overlay = !self.config.use_overlay;
        let host = self.config.use_overlay.then_some(OVERLAY_HOST);
        self.stack.set_overlay_host(host);
        self.set_status(if host.is_some() { "Overlay on" } else { "Overlay off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::stack::Point;
    use std::time::Duration;

    fn app(deck_size: usize) -> App {
        let mut config = AppConfig::default();
        config.deck_size = deck_size;
        let mut app = App::new(config);
        app.set_front_rect(ratatui::layout::Rect::new(0, 0, 20, 8));
        app
    }

    #[test]
    fn test_tick_redraws_until_settled() {
        let now = Instant::now();
        let mut app = app(4);
        app.begin_drag(Point::new(5.0, 4.0), now);
        app.stack.drag_to(Point::new(15.0, 4.0), now + Duration::from_millis(100));
        app.end_drag(Point::new(15.0, 4.0), now + Duration::from_millis(200));

        app.needs_redraw = false;
        app.tick(now + Duration::from_millis(300));
        assert!(app.needs_redraw);

        // Both phases are over well before this.
        app.needs_redraw = false;
        app.tick(now + Duration::from_secs(5));
        assert!(app.needs_redraw);
        app.tick(now + Duration::from_secs(6));
        app.needs_redraw = false;
        app.tick(now + Duration::from_secs(7));
        assert!(!app.needs_redraw);
        assert_eq!(app.stack.head_index(), 1);
    }

    #[test]
    fn test_change_visible_clamps() {
        let mut app = app(6);
        app.change_visible(2);
        assert_eq!(app.stack.window().len(), 5);
        app.change_visible(-10);
        assert_eq!(app.stack.config().max_visible_items, 1);
        assert_eq!(app.config.stack.max_visible_items, 1);
    }

    #[test]
    fn test_add_and_remove_cards() {
        let mut app = app(1);
        assert_eq!(app.stack.window().len(), 1);
        app.add_card();
        assert_eq!(app.stack.item_count(), 2);
        assert_eq!(app.stack.window().len(), 2);
        app.remove_card();
        app.remove_card();
        assert_eq!(app.stack.item_count(), 0);
        assert!(app.stack.window().is_empty());
        app.remove_card();
        assert_eq!(app.config.deck_size, 0);
    }

    #[test]
    fn test_toggles() {
        let mut app = app(3);
        app.toggle_lock_x();
        assert!(app.stack.config().prevent_x);
        app.toggle_lock_y();
        assert!(app.stack.config().prevent_y);

        assert!(app.config.use_overlay);
        app.toggle_overlay();
        assert_eq!(app.stack.config().overlay_host, None);
        app.toggle_overlay();
        assert_eq!(app.stack.config().overlay_host, Some(OVERLAY_HOST));
    }

    #[test]
    fn test_save_config_writes_toggles() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let manager = crate::config::ConfigManager::with_path(temp_dir.path().join("config.json"));
        let mut app = app(6).with_config_manager(manager.clone());

        app.toggle_lock_y();
        app.change_visible(2);
        app.save_config();
        assert!(app.status.as_deref().unwrap().starts_with("Saved to"));

        let saved = manager.load().unwrap();
        assert!(saved.stack.prevent_y);
        assert_eq!(saved.stack.max_visible_items, 5);
        assert_eq!(saved.deck_size, 6);
    }

    #[test]
    fn test_save_config_without_manager() {
        let mut app = app(3);
        app.save_config();
        assert_eq!(app.status.as_deref(), Some("No config file to save to"));
    }

    #[test]
    fn test_save_config_reports_write_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        // A directory where the file should be makes the write fail.
        let path = temp_dir.path().join("config.json");
        std::fs::create_dir_all(&path).unwrap();
        let mut app = app(3).with_config_manager(crate::config::ConfigManager::with_path(path));

        app.save_config();
        assert!(app
            .status
            .as_deref()
            .unwrap()
            .starts_with("failed to write config file"));
    }
}
