//! cardstack - a draggable, self-recycling card stack for terminal UIs
//!
//! The headless widget lives in [`stack`]; [`ui`] draws it with ratatui.
//! The remaining modules make up the demo binary and are exposed for
//! integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod stack;
pub mod terminal;
pub mod ui;
