//! The generated deck shown by the demo.

use std::collections::BTreeSet;

use ratatui::style::Color;

use crate::stack::StackDataSource;
use crate::ui::card_stack::CardFace;
use crate::ui::theme::CARD_ACCENTS;

const BODIES: [&str; 8] = [
    "Drag this card in any direction and let go past the threshold.",
    "A quick flick works too, even over a short distance.",
    "Release early and the card springs back into place.",
    "The card behind moves up as soon as this one leaves.",
    "Every card you throw away comes back at the bottom.",
    "Press x or y to lock dragging to a single axis.",
    "Press o to lift dragged cards above the rest of the screen.",
    "Use + and - to change how many cards are stacked.",
];

/// One generated card.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoCard {
    pub index: usize,
    pub title: String,
    pub body: String,
    pub accent: Color,
}

impl DemoCard {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            title: format!("Card {}", index + 1),
            body: BODIES[index % BODIES.len()].to_string(),
            accent: CARD_ACCENTS[index % CARD_ACCENTS.len()],
        }
    }
}

impl CardFace for DemoCard {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn accent(&self) -> Color {
        self.accent
    }
}

/// Data source for the demo: `len` generated cards, some of which may be
/// marked missing to show empty slots.
#[derive(Debug, Clone, Default)]
pub struct DemoDeck {
    cards: Vec<DemoCard>,
    missing: BTreeSet<usize>,
}

impl DemoDeck {
    pub fn new(len: usize, missing: &[usize]) -> Self {
        Self {
            cards: (0..len).map(DemoCard::new).collect(),
            missing: missing.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a freshly generated card.
    pub fn push_card(&mut self) {
        self.cards.push(DemoCard::new(self.cards.len()));
    }

    /// Remove the last card. Returns `false` if the deck was empty.
    pub fn pop_card(&mut self) -> bool {
        self.cards.pop().is_some()
    }

    pub fn is_missing(&self, index: usize) -> bool {
        self.missing.contains(&index)
    }
}

impl StackDataSource for DemoDeck {
    type Item = DemoCard;

    fn count(&self) -> usize {
        self.cards.len()
    }

    fn content_at(&self, index: usize) -> Option<DemoCard> {
        if self.is_missing(index) {
            return None;
        }
        self.cards.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_cards() {
        let deck = DemoDeck::new(10, &[]);
        assert_eq!(deck.count(), 10);
        let card = deck.content_at(9).unwrap();
        assert_eq!(card.title, "Card 10");
        assert_eq!(card.body, BODIES[1]);
        assert_eq!(card.accent, CARD_ACCENTS[3]);
    }

    #[test]
    fn test_missing_items_yield_none() {
        let deck = DemoDeck::new(4, &[1, 7]);
        assert!(deck.content_at(0).is_some());
        assert!(deck.content_at(1).is_none());
        assert!(deck.content_at(4).is_none());
    }

    #[test]
    fn test_push_and_pop() {
        let mut deck = DemoDeck::new(1, &[]);
        deck.push_card();
        assert_eq!(deck.content_at(1).unwrap().title, "Card 2");
        assert!(deck.pop_card());
        assert!(deck.pop_card());
        assert!(!deck.pop_card());
        assert!(deck.is_empty());
    }
}
