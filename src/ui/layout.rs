//! Responsive layout for the demo screen.
//!
//! [`LayoutContext`] turns the terminal size into the three screen regions
//! and the resting rectangle of the front card.

use ratatui::layout::Rect;

/// Terminal size breakpoints
pub mod breakpoints {
    /// Narrow terminal (< 60 columns)
    pub const XS_WIDTH: u16 = 60;
    /// Short terminal (< 20 rows)
    pub const XS_HEIGHT: u16 = 20;
}

/// Card width bounds, in columns.
pub const CARD_MIN_WIDTH: u16 = 18;
pub const CARD_MAX_WIDTH: u16 = 50;

/// Card height bounds, in rows.
pub const CARD_MIN_HEIGHT: u16 = 6;
pub const CARD_MAX_HEIGHT: u16 = 14;

/// The three regions of the demo screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub stack: Rect,
    pub footer: Rect,
}

/// Layout context holding terminal dimensions for responsive calculations.
///
/// ```
/// use cardstack::ui::layout::LayoutContext;
///
/// let ctx = LayoutContext::new(100, 40);
/// assert_eq!(ctx.percent_width(50), 50);
/// assert_eq!(ctx.bounded_width(80, 10, 60), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    pub width: u16,
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    // ========================================================================
    // Percentage-Based Calculations
    // ========================================================================

    /// Width as a percentage of the terminal width, minimum 1.
    pub fn percent_width(&self, percentage: u16) -> u16 {
        ((self.width as u32 * percentage as u32) / 100).max(1) as u16
    }

    /// Height as a percentage of the terminal height, minimum 1.
    pub fn percent_height(&self, percentage: u16) -> u16 {
        ((self.height as u32 * percentage as u32) / 100).max(1) as u16
    }

    pub fn bounded_width(&self, percentage: u16, min: u16, max: u16) -> u16 {
        self.percent_width(percentage).clamp(min, max)
    }

    pub fn bounded_height(&self, percentage: u16, min: u16, max: u16) -> u16 {
        self.percent_height(percentage).clamp(min, max)
    }

    /// Narrow or short: the header collapses to one row.
    pub fn is_compact(&self) -> bool {
        self.width < breakpoints::XS_WIDTH || self.height < breakpoints::XS_HEIGHT
    }

    // ========================================================================
    // Regions
    // ========================================================================

    pub fn header_height(&self) -> u16 {
        if self.is_compact() {
            1
        } else {
            3
        }
    }

    pub fn footer_height(&self) -> u16 {
        2
    }

    /// Split `area` (the whole frame) into header, stack and footer.
    pub fn screen_areas(&self, area: Rect) -> ScreenAreas {
        let header_h = self.header_height().min(area.height);
        let footer_h = self.footer_height().min(area.height - header_h);
        let stack_h = area.height - header_h - footer_h;

        ScreenAreas {
            header: Rect::new(area.x, area.y, area.width, header_h),
            stack: Rect::new(area.x, area.y + header_h, area.width, stack_h),
            footer: Rect::new(area.x, area.y + header_h + stack_h, area.width, footer_h),
        }
    }

    /// Card size for this terminal, bounded but never larger than `stack`
    /// minus the rows reserved for cards peeking out behind.
    pub fn card_size(&self, stack: Rect, depth_rows: u16) -> (u16, u16) {
        let width = self
            .bounded_width(45, CARD_MIN_WIDTH, CARD_MAX_WIDTH)
            .min(stack.width.saturating_sub(2));
        let height = self
            .bounded_height(45, CARD_MIN_HEIGHT, CARD_MAX_HEIGHT)
            .min(stack.height.saturating_sub(depth_rows));
        (width, height)
    }

    /// Resting rectangle of the front card: centered in `stack`, shifted
    /// down by half of `depth_rows` so the cards behind stay visible.
    pub fn front_card_rect(&self, stack: Rect, depth_rows: u16) -> Rect {
        let (width, height) = self.card_size(stack, depth_rows);
        let x = stack.x + (stack.width.saturating_sub(width)) / 2;
        let spare = stack.height.saturating_sub(height);
        let y = stack.y + (spare / 2 + depth_rows / 2).min(spare);
        Rect::new(x, y, width, height)
    }
}

impl Default for LayoutContext {
    /// Standard 80x24 terminal.
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}
