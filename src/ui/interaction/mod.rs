//! Mouse interaction: hit areas registered while rendering, and the
//! dispatcher that turns a press on one of them into an App change.

pub mod click_handler;
pub mod hit_area;

pub use click_handler::handle_click_action;
pub use hit_area::{ClickAction, HitArea, HitAreaRegistry};
