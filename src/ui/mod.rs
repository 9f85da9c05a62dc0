//! UI rendering for the card stack demo.
//!
//! The frame has three regions from [`LayoutContext::screen_areas`]: a
//! header with deck statistics, the card stack, and a footer with clickable
//! toggles. The stack is drawn last so a card lifted into the overlay is
//! painted over the header and footer.

pub mod card_stack;
pub mod interaction;
pub mod layout;
mod panels;
pub mod theme;

pub use card_stack::{CardFace, CardPlacement, CardStackWidget};
pub use interaction::{handle_click_action, ClickAction, HitArea, HitAreaRegistry};
pub use layout::{LayoutContext, ScreenAreas};

use ratatui::Frame;

use crate::app::App;
use card_stack::card_placement;
use panels::{render_footer, render_header};

/// Rows the cards behind the front card take up above it.
fn depth_rows(app: &App) -> u16 {
    let config = app.stack.config();
    let behind = config.max_visible_items.saturating_sub(1) as f32;
    (config.depth_style.offset_step.y.abs() * behind).ceil().min(u16::MAX as f32) as u16
}

/// Render the whole UI and rebuild the hit areas.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let ctx = LayoutContext::from_rect(area);
    let areas = ctx.screen_areas(area);

    let depth = depth_rows(app).min(areas.stack.height / 2);
    let front = ctx.front_card_rect(areas.stack, depth);
    app.set_front_rect(front);

    app.hit_registry.clear();
    render_header(frame, areas.header, app, &ctx);
    render_footer(frame, areas.footer, app);

    frame.render_widget(
        CardStackWidget::new(app.stack.window(), front).overlay_area(area),
        areas.stack,
    );

    if app.stack.is_interactive() {
        if let Some(card) = app.stack.front() {
            if let Some(rect) = card_placement(front, card).bounds(areas.stack) {
                app.hit_registry.register(rect, ClickAction::FrontCard, None);
            }
        }
    }
}
