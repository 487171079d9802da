//! Crossterm-backed terminal session that paints rendered screens.

use std::io::{Stdout, Write};

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use tower_climb_core::GridPos;
use tower_climb_rendering::{Color, Screen};

/// Owns the terminal for the lifetime of a game session.
///
/// Construction switches to the alternate screen in raw mode with a
/// hidden cursor; dropping the value restores the terminal even when the
/// driver unwinds with an error.
pub(crate) struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub(crate) fn new() -> Result<Self> {
        let mut stdout = std::io::stdout();
        terminal::enable_raw_mode()?;
        let _ = stdout.execute(EnterAlternateScreen)?;
        let _ = stdout.execute(Hide)?;
        let _ = stdout.execute(Clear(ClearType::All))?;
        Ok(Self { stdout })
    }

    /// Repaints the whole screen, batching color changes per run.
    pub(crate) fn draw(&mut self, screen: &Screen) -> Result<()> {
        let mut foreground = None;
        let mut background = None;
        for row in 0..screen.rows() {
            let _ = self.stdout.queue(MoveTo(0, row as u16))?;
            for column in 0..screen.columns() {
                let Some(cell) = screen.cell_at(GridPos::new(row, column)) else {
                    continue;
                };
                if foreground != Some(cell.foreground()) {
                    let _ = self
                        .stdout
                        .queue(SetForegroundColor(term_color(cell.foreground())))?;
                    foreground = Some(cell.foreground());
                }
                if background != Some(cell.background()) {
                    let _ = self
                        .stdout
                        .queue(SetBackgroundColor(term_color(cell.background())))?;
                    background = Some(cell.background());
                }
                let _ = self.stdout.queue(Print(cell.symbol()))?;
            }
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Yellow => TermColor::Yellow,
        Color::Magenta => TermColor::Magenta,
        Color::Green => TermColor::Green,
        Color::Cyan => TermColor::Cyan,
    }
}
