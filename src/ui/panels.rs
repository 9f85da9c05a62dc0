//! Header and footer rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

use super::interaction::ClickAction;
use super::layout::LayoutContext;
use super::theme::{COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_HOVER};

// ============================================================================
// Header
// ============================================================================

/// Title plus the position of the stack within the deck.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    if area.is_empty() {
        return;
    }

    let stack = &app.stack;
    let position = if stack.item_count() == 0 {
        "empty deck".to_string()
    } else {
        format!("{}/{}", stack.head_index() + 1, stack.item_count())
    };

    let line = Line::from(vec![
        Span::styled(
            "cardstack",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  ", crate::cli::VERSION),
            Style::default().fg(COLOR_DIM),
        ),
        Span::raw(format!(
            "top {}  visible {}  shuffles {}",
            position,
            stack.window().len(),
            app.cycles
        )),
    ]);

    let paragraph = if ctx.is_compact() {
        Paragraph::new(line)
    } else {
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(COLOR_BORDER)),
        )
    };
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer
// ============================================================================

/// Footer buttons, left to right.
fn footer_buttons(app: &App) -> Vec<(String, ClickAction, bool)> {
    let config = app.stack.config();
    vec![
        ("x-lock".to_string(), ClickAction::ToggleLockX, config.prevent_x),
        ("y-lock".to_string(), ClickAction::ToggleLockY, config.prevent_y),
        (
            "overlay".to_string(),
            ClickAction::ToggleOverlay,
            config.overlay_host.is_some(),
        ),
        ("skip".to_string(), ClickAction::SkipFront, false),
        ("reload".to_string(), ClickAction::Reload, false),
        ("from start".to_string(), ClickAction::ReloadFromStart, false),
        ("+".to_string(), ClickAction::MoreVisible, false),
        ("-".to_string(), ClickAction::FewerVisible, false),
    ]
}

/// Clickable toggles on the first row, status or key hints on the second.
///
/// Buttons are registered as hit areas as they are drawn.
pub fn render_footer(frame: &mut Frame, area: Rect, app: &mut App) {
    if area.is_empty() {
        return;
    }

    let buttons_row = Rect::new(area.x, area.y, area.width, 1);
    let mut x = buttons_row.x;
    for (label, action, active) in footer_buttons(app) {
        let text = format!("[{}]", label);
        let width = text.width() as u16;
        if x + width > buttons_row.right() {
            break;
        }
        let rect = Rect::new(x, buttons_row.y, width, 1);
        let hover = Style::default().bg(COLOR_HOVER);
        app.hit_registry.register(rect, action, Some(hover));

        let mut style = if active {
            Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_HEADER)
        };
        if let Some(hover_style) = app.hit_registry.hover_style(rect) {
            style = style.patch(hover_style);
        }
        frame.render_widget(Paragraph::new(Span::styled(text, style)), rect);
        x += width + 1;
    }

    if area.height < 2 {
        return;
    }
    let hint = match &app.status {
        Some(status) => Span::styled(status.clone(), Style::default().fg(COLOR_HEADER)),
        None => Span::styled(
            "drag the top card · space skip · esc cancel · r reload · w save · q quit",
            Style::default().fg(COLOR_DIM),
        ),
    };
    frame.render_widget(
        Paragraph::new(hint),
        Rect::new(area.x, area.y + 1, area.width, 1),
    );
}
