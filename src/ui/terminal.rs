use std::io::Stdout;

use crossterm::{execute, terminal, ExecutableCommand};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::error::Result;

/// Owns the terminal while the settings panel is on screen.
///
/// Creating the guard switches to raw mode and the alternate screen. The
/// previous screen comes back on `restore` or on drop, so an early return or
/// a panic inside the panel loop does not leave the shell unusable.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen with the cursor hidden.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        if let Err(err) = execute!(stdout, terminal::EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }

        let mut guard = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            restored: false,
        };
        guard.terminal.hide_cursor()?;
        Ok(guard)
    }

    /// Render one frame.
    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Give the screen back to the shell. Later calls, including the one from
    /// `Drop`, do nothing.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.terminal.show_cursor()?;
        self.terminal
            .backend_mut()
            .execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
