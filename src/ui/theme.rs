//! Color theme constants for the card stack demo.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

pub const COLOR_BORDER: Color = Color::DarkGray;

pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Toggles that are switched on
pub const COLOR_ACTIVE: Color = Color::LightGreen;

pub const COLOR_HOVER: Color = Color::Rgb(40, 40, 60);

// ============================================================================
// Cards
// ============================================================================

pub const COLOR_CARD_BG: Color = Color::Rgb(10, 15, 35);

pub const COLOR_CARD_TEXT: Color = Color::Gray;

/// Border for cards behind the front card
pub const COLOR_CARD_BACK: Color = Color::Rgb(70, 70, 90);

/// Border of the card being dragged
pub const COLOR_CARD_DRAGGING: Color = Color::Rgb(0, 122, 204);

/// Placeholder for slots whose content is missing
pub const COLOR_CARD_EMPTY: Color = Color::DarkGray;

/// Accent palette cycled through by generated cards
pub const CARD_ACCENTS: [Color; 6] = [
    Color::Rgb(4, 181, 117),
    Color::Rgb(0, 122, 204),
    Color::Rgb(214, 157, 28),
    Color::Rgb(197, 80, 120),
    Color::Cyan,
    Color::Rgb(150, 110, 220),
];
