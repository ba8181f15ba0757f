//! Terminal mode management

use std::io::{self, Write, stdout};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, terminal};

/// Raw mode + alternate screen for as long as the guard lives
///
/// Dropping the guard restores the terminal, also on early returns and
/// panics unwinding through the driver.
#[derive(Debug)]
pub struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        if keyboard_enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal ready (keyboard enhancement: {})", keyboard_enhanced);
        Ok(Self { keyboard_enhanced })
    }

    /// Whether key release events will be reported
    pub fn release_events(&self) -> bool {
        self.keyboard_enhanced
    }

    fn restore(&self) -> io::Result<()> {
        let mut out = stdout();
        if self.keyboard_enhanced {
            execute!(out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            out,
            DisableMouseCapture,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )?;
        terminal::disable_raw_mode()?;
        out.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
