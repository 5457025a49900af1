//! Terminal state: size signals and the raw-mode guard.
//!
//! The size signals are the roots of the layout pipeline. Everything else
//! the page shows is derived from them plus the clock.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use spark_signals::{Signal, signal};
use tracing::{debug, warn};

/// Size used when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

// =============================================================================
// Terminal Size Signals
// =============================================================================

/// Reactive terminal dimensions.
#[derive(Clone)]
pub struct TerminalSize {
    width: Signal<u16>,
    height: Signal<u16>,
}

impl TerminalSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: signal(width.max(1)),
            height: signal(height.max(1)),
        }
    }

    /// Query the real terminal, falling back to 80x24.
    pub fn detect() -> Self {
        let (width, height) = crossterm::terminal::size().unwrap_or_else(|err| {
            warn!(%err, "terminal size unavailable, assuming 80x24");
            FALLBACK_SIZE
        });
        Self::new(width, height)
    }

    pub fn width(&self) -> u16 {
        self.width.get()
    }

    pub fn height(&self) -> u16 {
        self.height.get()
    }

    /// Set the size (called on resize events). Zero is clamped to one.
    pub fn set(&self, width: u16, height: u16) {
        self.width.set(width.max(1));
        self.height.set(height.max(1));
    }

    /// Width signal for reactive tracking.
    pub fn width_signal(&self) -> Signal<u16> {
        self.width.clone()
    }

    /// Height signal for reactive tracking.
    pub fn height_signal(&self) -> Signal<u16> {
        self.height.clone()
    }
}

// =============================================================================
// Terminal Guard
// =============================================================================

/// Puts the terminal into fullscreen interactive mode and restores it on drop.
///
/// Raw mode, alternate screen, mouse capture, focus reporting, hidden cursor.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        ) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        debug!("terminal entered fullscreen mode");
        Ok(Self { active: true })
    }

    /// Restore the terminal now. Safe to call more than once.
    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            Show,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = stdout.flush();
        let _ = disable_raw_mode();
        debug!("terminal restored");
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size() {
        let size = TerminalSize::new(120, 40);
        assert_eq!(size.width(), 120);
        assert_eq!(size.height(), 40);
    }

    #[test]
    fn test_set_clamps_zero() {
        let size = TerminalSize::new(80, 24);
        size.set(0, 0);
        assert_eq!((size.width(), size.height()), (1, 1));
    }

    #[test]
    fn test_signals_share_state() {
        let size = TerminalSize::new(80, 24);
        let width = size.width_signal();
        size.set(100, 30);
        assert_eq!(width.get(), 100);
    }
}
