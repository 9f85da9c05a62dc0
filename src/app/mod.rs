//! Application state for the card stack demo.
//!
//! [`App`] owns a [`StackController`] over a generated [`DemoDeck`] and the
//! bits of UI state the event loop needs between frames. Methods are split
//! across files:
//!
//! - `handlers`: key, mouse and [`AppMessage`] handling
//! - `state_methods`: tick and the configuration toggles

mod deck;
mod handlers;
mod messages;
mod state_methods;

pub use deck::{DemoCard, DemoDeck};
pub use messages::AppMessage;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::config::{AppConfig, ConfigManager};
use crate::stack::{MovedToTop, OverlayHost, Size, StackController};
use crate::ui::HitAreaRegistry;

/// The single overlay layer of the demo: the whole frame.
pub const OVERLAY_HOST: OverlayHost = OverlayHost::new(1);

/// Main application state
pub struct App {
    pub stack: StackController<DemoDeck>,
    pub config: AppConfig,
    /// Clickable regions registered by the last render
    pub hit_registry: HitAreaRegistry,
    /// Set when something visible changed since the last draw
    pub needs_redraw: bool,
    pub should_quit: bool,
    /// One-line feedback shown in the footer
    pub status: Option<String>,
    pub last_moved: Option<MovedToTop<DemoCard>>,
    /// Completed shuffles
    pub cycles: usize,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Resting rectangle of the front card in the last render
    pub front_rect: Rect,
    /// Where `w` saves the settings
    pub config_manager: Option<ConfigManager>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let deck = DemoDeck::new(config.deck_size, &config.missing_items);
        let stack_config = config
            .stack
            .clone()
            .with_overlay_host(config.use_overlay.then_some(OVERLAY_HOST));
        let mut stack = StackController::new(deck, stack_config);

        let tx = message_tx.clone();
        stack.subscribe(move |event| {
            // The receiver only goes away at shutdown.
            let _ = tx.send(AppMessage::CardMovedToTop(event.clone()));
        });

        tracing::info!(
            deck_size = config.deck_size,
            visible = stack.config().max_visible_items,
            overlay = config.use_overlay,
            "App created"
        );

        Self {
            stack,
            config,
            hit_registry: HitAreaRegistry::new(),
            needs_redraw: true,
            should_quit: false,
            status: None,
            last_moved: None,
            cycles: 0,
            message_tx,
            message_rx: Some(message_rx),
            front_rect: Rect::default(),
            config_manager: None,
        }
    }

    /// Save settings through `manager` on request.
    pub fn with_config_manager(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Record where the front card rests. Its size is the release
    /// threshold reference for the next drag.
    pub fn set_front_rect(&mut self, rect: Rect) {
        if rect != self.front_rect {
            self.front_rect = rect;
            self.stack
                .set_card_size(Size::new(rect.width as f32, rect.height as f32));
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.mark_dirty();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
