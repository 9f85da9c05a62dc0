//! Panic hook that gives the terminal back before the message prints.

use super::setup::emergency_restore;
use std::panic;

/// Chain a terminal restore in front of the current panic hook.
///
/// Call before [`TerminalManager::new`](super::TerminalManager::new). When
/// color-eyre is installed, call this afterwards so its hook is the one
/// being wrapped.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
