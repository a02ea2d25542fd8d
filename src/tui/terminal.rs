use std::io;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Title left behind when the TUI exits
const EXIT_TITLE: &str = "";

/// Manages terminal setup and cleanup
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    restored: bool,
}

impl TerminalManager {
    /// Set up terminal for TUI mode
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, restored: false })
    }

    /// Get mutable reference to terminal
    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
        &mut self.terminal
    }

    /// Restore terminal to normal mode
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, SetTitle(EXIT_TITLE))?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

// Ensure cleanup happens even if dropped (panic, early return, etc.)
impl Drop for TerminalManager {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        // Best effort cleanup - ignore errors since we're already unwinding
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, SetTitle(EXIT_TITLE));
        let _ = self.terminal.show_cursor();
    }
}
