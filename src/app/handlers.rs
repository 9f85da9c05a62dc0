//! Input and message handling for the App.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::{App, AppMessage};
use crate::stack::{DragOutcome, Point};
use crate::ui::handle_click_action;

impl App {
    /// Handle an incoming async message
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::CardMovedToTop(event) => {
                self.cycles += 1;
                tracing::debug!(item_index = event.item_index, "Moved-to-top notification");
                self.status = Some(match &event.content {
                    Some(card) => format!("{} is on top", card.title),
                    None => "Empty card on top, space skips it".to_string(),
                });
                self.last_moved = Some(event);
            }
        }
    }

    /// Handle a terminal event at `now`.
    ///
    /// Animations advance after every event as well as on the frame tick, so
    /// a stream of mouse motion cannot stall them.
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "Terminal resized");
                self.mark_dirty();
            }
            Event::FocusLost => {
                // A release outside the window would never arrive.
                if self.stack.cancel_drag() {
                    self.mark_dirty();
                }
            }
            _ => {}
        }
        self.tick(now);
    }

    /// Handle a key press. Returns `true` if it was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if self.stack.cancel_drag() {
                    self.set_status("Drag cancelled");
                }
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('R') => self.reload_from_start(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_visible(1),
            KeyCode::Char('-') => self.change_visible(-1),
            KeyCode::Char('a') => self.add_card(),
            KeyCode::Char('d') => self.remove_card(),
            KeyCode::Char('x') => self.toggle_lock_x(),
            KeyCode::Char('y') => self.toggle_lock_y(),
            KeyCode::Char('o') => self.toggle_overlay(),
            KeyCode::Char(' ') | KeyCode::Char('n') => self.skip_front(Instant::now()),
            KeyCode::Char('w') => self.save_config(),
            _ => return false,
        }
        self.mark_dirty();
        true
    }

    /// Handle a mouse event at `now`.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let point = Point::new(mouse.column as f32, mouse.row as f32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.hit_registry.hit_test(mouse.column, mouse.row) {
                    handle_click_action(self, action, point, now);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.stack.drag_to(point, now) {
                    self.mark_dirty();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.end_drag(point, now),
            MouseEventKind::Moved => {
                if self.hit_registry.update_hover(mouse.column, mouse.row) {
                    self.mark_dirty();
                }
            }
            _ => {}
        }
    }

    /// Start dragging the front card at `point`.
    pub fn begin_drag(&mut self, point: Point, now: Instant) {
        if self.stack.begin_drag(point, now) {
            self.status = None;
            self.mark_dirty();
        }
    }

    /// Release the current drag at `point`.
    pub fn end_drag(&mut self, point: Point, now: Instant) {
        match self.stack.end_drag(point, now) {
            DragOutcome::Ignored => {}
            DragOutcome::Committed => self.mark_dirty(),
            DragOutcome::SnappedBack => {
                if self.stack.window().len() < 2 {
                    self.set_status("Only one card, nothing to shuffle");
                } else {
                    self.mark_dirty();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        let mut config = AppConfig::default();
        config.deck_size = 5;
        config.stack.shuffle_animation_duration = Duration::ZERO;
        let mut app = App::new(config);
        let front = Rect::new(10, 5, 20, 8);
        app.set_front_rect(front);
        app.hit_registry
            .register(front, crate::ui::ClickAction::FrontCard, None);
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_unknown_key_is_not_consumed() {
        let mut app = app();
        app.needs_redraw = false;
        assert!(!app.handle_key(key(KeyCode::Char('z'))));
        assert!(!app.needs_redraw);
    }

    #[test]
    fn test_mouse_drag_shuffles_and_notifies() {
        let now = Instant::now();
        let mut app = app();
        let mut rx = app.message_rx.take().unwrap();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 8), now);
        assert!(app.stack.is_dragging());
        app.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), 28, 8),
            now + Duration::from_millis(200),
        );
        app.handle_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), 28, 8),
            now + Duration::from_millis(400),
        );

        assert_eq!(app.stack.head_index(), 1);
        let msg = rx.try_recv().unwrap();
        app.handle_message(msg);
        assert_eq!(app.cycles, 1);
        assert_eq!(app.status.as_deref(), Some("Card 2 is on top"));
        assert_eq!(app.last_moved.as_ref().map(|m| m.item_index), Some(1));
    }

    #[test]
    fn test_press_outside_front_card_does_not_drag() {
        let mut app = app();
        app.handle_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), 0, 0),
            Instant::now(),
        );
        assert!(!app.stack.is_dragging());
    }

    #[test]
    fn test_escape_cancels_drag() {
        let now = Instant::now();
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 8), now);
        app.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), 18, 8),
            now + Duration::from_millis(16),
        );
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.stack.is_dragging());
        assert_eq!(app.status.as_deref(), Some("Drag cancelled"));
        assert!(app.stack.front().unwrap().transform().is_identity());
    }

    #[test]
    fn test_mouse_motion_keeps_animation_running() {
        let start = Instant::now();
        let mut config = AppConfig::default();
        config.stack.shuffle_animation_duration = Duration::from_millis(100);
        let mut app = App::new(config);
        app.set_front_rect(Rect::new(10, 5, 20, 8));
        assert!(app.stack.shuffle_front(start));

        // Motion every 5ms, never leaving a gap for the frame tick.
        let mut now = start;
        for step in 0..60u16 {
            now += Duration::from_millis(5);
            let moved = mouse(MouseEventKind::Moved, step % 40, 2);
            app.handle_event(Event::Mouse(moved), now);
        }

        assert!(!app.stack.is_animating());
        assert_eq!(app.stack.head_index(), 1);
        assert!(app.message_rx.as_mut().unwrap().try_recv().is_ok());
    }

    #[test]
    fn test_space_skips_empty_front_card() {
        let mut config = AppConfig::default();
        config.deck_size = 4;
        config.missing_items = vec![0];
        config.stack.shuffle_animation_duration = Duration::ZERO;
        let mut app = App::new(config);
        let mut rx = app.message_rx.take().unwrap();
        assert!(!app.stack.is_interactive());

        assert!(app.handle_key(key(KeyCode::Char(' '))));
        assert_eq!(app.stack.head_index(), 1);
        assert!(app.stack.is_interactive());

        app.handle_message(rx.try_recv().unwrap());
        assert_eq!(app.status.as_deref(), Some("Card 2 is on top"));
    }

    #[test]
    fn test_empty_card_on_top_suggests_skip() {
        let mut config = AppConfig::default();
        config.deck_size = 4;
        config.missing_items = vec![1];
        config.stack.shuffle_animation_duration = Duration::ZERO;
        let mut app = App::new(config);
        let mut rx = app.message_rx.take().unwrap();

        app.handle_key(key(KeyCode::Char('n')));
        app.handle_message(rx.try_recv().unwrap());
        assert_eq!(
            app.status.as_deref(),
            Some("Empty card on top, space skips it")
        );
    }

    #[test]
    fn test_focus_lost_cancels_drag() {
        let now = Instant::now();
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 8), now);
        app.handle_event(Event::FocusLost, now + Duration::from_millis(16));
        assert!(!app.stack.is_dragging());
    }
}
