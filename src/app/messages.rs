//! AppMessage enum for async communication within the application.

use super::deck::DemoCard;
use crate::stack::MovedToTop;

/// Messages delivered to the event loop outside of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// A card settled at the top of the stack after a shuffle.
    CardMovedToTop(MovedToTop<DemoCard>),
}
