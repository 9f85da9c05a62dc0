//! Terminal rendering of a card stack window.
//!
//! Cards are drawn back to front. Each card is first rendered upright into
//! a scratch buffer, then copied cell by cell onto the frame with its depth
//! pose and drag transform applied:
//!
//! - scale narrows the card around its center
//! - offset and translation move it, rounded to whole cells
//! - rotation becomes a per-row horizontal skew
//! - low alpha dims the copied cells, near-zero alpha skips the card
//!
//! Stack cards are clipped to the widget area. Cards reparented into an
//! overlay are drawn after every stack card and clipped to the overlay area
//! only, so a dragged card can leave the stack region.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::stack::{CardContainer, CardParent, DepthPose, Transform};
use crate::ui::theme;

/// Below this alpha a card is not drawn at all.
const MIN_VISIBLE_ALPHA: f32 = 0.05;

/// Below this alpha the copied cells are dimmed.
const DIM_ALPHA: f32 = 0.6;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// What a card shows.
pub trait CardFace {
    fn title(&self) -> &str;

    fn body(&self) -> &str {
        ""
    }

    /// Border color while the card is at the front.
    fn accent(&self) -> Color {
        theme::COLOR_HEADER
    }
}

impl CardFace for &str {
    fn title(&self) -> &str {
        self
    }
}

impl CardFace for String {
    fn title(&self) -> &str {
        self.as_str()
    }
}

/// Where a card lands on the frame, before clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    /// Columns of horizontal shift per row above the card's center.
    pub skew: f32,
}

impl CardPlacement {
    /// Apply `pose` and `transform` to the front card's resting rectangle.
    pub fn new(front: Rect, pose: DepthPose, transform: Transform) -> Self {
        let scaled = (front.width as f32 * pose.scale.clamp(0.0, 1.0)).round() as u16;
        let width = scaled.clamp(front.width.min(2), front.width);
        let inset = (front.width - width) as i32 / 2;

        let dx = (pose.offset.x + transform.translation.x).round() as i32;
        let dy = (pose.offset.y + transform.translation.y).round() as i32;

        Self {
            x: front.x as i32 + inset + dx,
            y: front.y as i32 + dy,
            width,
            height: front.height,
            skew: transform.rotation_deg.to_radians().tan() * CELL_ASPECT,
        }
    }

    /// Horizontal shift of `row`. Positive rotation leans the top right.
    pub fn row_shift(&self, row: u16) -> i32 {
        let center = (self.height.saturating_sub(1)) as f32 / 2.0;
        ((center - row as f32) * self.skew).round() as i32
    }

    /// Unskewed bounding box clipped to `clip`.
    pub fn bounds(&self, clip: Rect) -> Option<Rect> {
        let left = self.x.max(clip.x as i32);
        let top = self.y.max(clip.y as i32);
        let right = (self.x + self.width as i32).min(clip.right() as i32);
        let bottom = (self.y + self.height as i32).min(clip.bottom() as i32);
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

/// Placement of `card` for a stack whose front card rests at `front`.
pub fn card_placement<H>(front: Rect, card: &CardContainer<H>) -> CardPlacement {
    CardPlacement::new(front, card.pose(), card.transform())
}

/// Draws the visible window of a card stack.
///
/// ```
/// use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
/// use cardstack::stack::{StackConfig, StackController};
/// use cardstack::ui::card_stack::CardStackWidget;
///
/// let stack = StackController::new(vec!["first", "second"], StackConfig::default());
/// let area = Rect::new(0, 0, 30, 10);
/// let mut buf = Buffer::empty(area);
/// CardStackWidget::new(stack.window(), Rect::new(2, 2, 26, 6)).render(area, &mut buf);
/// ```
pub struct CardStackWidget<'a, H> {
    cards: &'a [CardContainer<H>],
    front: Rect,
    overlay_area: Option<Rect>,
}

impl<'a, H: CardFace> CardStackWidget<'a, H> {
    /// `cards` front to back, as returned by the controller's window.
    pub fn new(cards: &'a [CardContainer<H>], front: Rect) -> Self {
        Self {
            cards,
            front,
            overlay_area: None,
        }
    }

    /// Clip region for cards lifted into an overlay. Defaults to the whole
    /// buffer.
    pub fn overlay_area(mut self, area: Rect) -> Self {
        self.overlay_area = Some(area);
        self
    }
}

impl<H: CardFace> Widget for CardStackWidget<'_, H> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stack_clip = area.intersection(buf.area);
        let overlay_clip = self.overlay_area.unwrap_or(buf.area).intersection(buf.area);

        if self.cards.is_empty() {
            render_empty_stack(stack_clip, buf);
            return;
        }

        let in_stack = |card: &&CardContainer<H>| card.parent() == CardParent::Stack;
        for card in self.cards.iter().rev().filter(in_stack) {
            draw_card(card, self.front, stack_clip, buf);
        }
        for card in self.cards.iter().rev().filter(|card| !in_stack(card)) {
            draw_card(card, self.front, overlay_clip, buf);
        }
    }
}

fn render_empty_stack(area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(Span::styled(
        "No cards",
        Style::default().fg(theme::COLOR_DIM),
    )))
    .alignment(Alignment::Center)
    .render(Rect::new(area.x, y, area.width, 1), buf);
}

fn draw_card<H: CardFace>(card: &CardContainer<H>, front: Rect, clip: Rect, buf: &mut Buffer) {
    let alpha = card.alpha();
    if alpha < MIN_VISIBLE_ALPHA || clip.is_empty() || front.is_empty() {
        return;
    }

    let placement = card_placement(front, card);
    let mut scratch = Buffer::empty(Rect::new(0, 0, placement.width, placement.height));
    render_face(card, *scratch.area(), &mut scratch);

    let dim = alpha < DIM_ALPHA;
    for row in 0..placement.height {
        let y = placement.y + row as i32;
        if y < clip.y as i32 || y >= clip.bottom() as i32 {
            continue;
        }
        let shift = placement.row_shift(row);
        for col in 0..placement.width {
            let x = placement.x + shift + col as i32;
            if x < clip.x as i32 || x >= clip.right() as i32 {
                continue;
            }
            let Some(src) = scratch.cell((col, row)) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((x as u16, y as u16)) {
                *dst = src.clone();
                if dim {
                    dst.set_style(Style::default().add_modifier(Modifier::DIM));
                }
            }
        }
    }
}

fn render_face<H: CardFace>(card: &CardContainer<H>, area: Rect, buf: &mut Buffer) {
    let Some(face) = card.content() else {
        Paragraph::new("empty")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme::COLOR_CARD_EMPTY))
            .block(
                Block::bordered()
                    .border_type(BorderType::Plain)
                    .border_style(Style::default().fg(theme::COLOR_CARD_EMPTY))
                    .style(Style::default().bg(theme::COLOR_CARD_BG)),
            )
            .render(area, buf);
        return;
    };

    let at_front = card.depth_index() == 0;
    let border = if card.is_dragging() {
        theme::COLOR_CARD_DRAGGING
    } else if at_front {
        face.accent()
    } else {
        theme::COLOR_CARD_BACK
    };
    let text = if at_front {
        Style::default().fg(theme::COLOR_CARD_TEXT)
    } else {
        Style::default().fg(theme::COLOR_DIM)
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", face.title()),
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme::COLOR_CARD_BG));

    Paragraph::new(face.body())
        .style(text)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
}
