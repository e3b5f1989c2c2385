//! Terminal input mode handling
//!
//! Raw mode is held by [`RawModeGuard`]; dropping the guard restores the
//! previous mode, so every exit path out of the countdown puts the terminal
//! back the way it was.

use crossterm::terminal;
use std::io::{IsTerminal, Write};

/// Whether stdin is attached to a terminal that can deliver single keypresses
pub fn stdin_is_terminal() -> bool {
    std::io::stdin().is_terminal()
}

/// Whether stdout is attached to a terminal
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Scoped raw mode. Restores the previous input mode on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        log::trace!("Terminal raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Put the terminal back into its original mode.
///
/// Safe to call when raw mode was never enabled.
pub fn restore() {
    if let Err(e) = terminal::disable_raw_mode() {
        log::debug!("Could not restore terminal mode: {}", e);
    } else {
        log::trace!("Terminal mode restored");
    }
}

/// Clear the whole screen and move the cursor home
pub fn clear_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    use crossterm::{cursor::MoveTo, execute, terminal::Clear, terminal::ClearType};

    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Blank out the current line (progress or countdown) and return to column 0
pub fn clear_line<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "\r{}\r", " ".repeat(CLEAR_WIDTH))?;
    out.flush()
}

const CLEAR_WIDTH: usize = 60;
