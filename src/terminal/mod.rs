//! Terminal lifecycle for the demo host.
//!
//! [`TerminalManager`] puts the terminal into raw mode on the alternate
//! screen with mouse capture (the stack is driven by mouse drags) and puts
//! it back when dropped. [`setup_panic_hook`] covers the panic path.
//!
//! ```no_run
//! use cardstack::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> cardstack::error::CardStackResult<()> {
//!     setup_panic_hook();
//!     let mut manager = TerminalManager::new()?;
//!     manager.terminal().draw(|_frame| {})?;
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use crate::error::CardStackResult;

/// Restores the terminal once, on drop or on request.
struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    fn restore<W: io::Write>(&mut self, writer: &mut W) {
        if self.restored {
            return;
        }
        self.restored = true;
        leave_tui_mode(writer);
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore(&mut io::stdout());
    }
}

/// Owns the ratatui terminal for the lifetime of the TUI.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen with mouse capture, and
    /// clear it.
    pub fn new() -> CardStackResult<Self> {
        enable_raw_mode()?;
        // From here on the guard owns cleanup, including on the error paths.
        let guard = TerminalGuard { restored: false };

        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        tracing::debug!("Entered TUI mode");

        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal before the manager is dropped.
    pub fn restore(&mut self) -> CardStackResult<()> {
        self.guard.restore(self.terminal.backend_mut());
        self.terminal.show_cursor()?;
        tracing::debug!("Left TUI mode");
        Ok(())
    }
}
