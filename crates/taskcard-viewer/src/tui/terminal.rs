/*
[INPUT]:  Crossterm stdout, terminal raw mode, ratatui backends
[OUTPUT]: Screen wrapping either the live terminal or a headless test backend
[POS]:    TUI terminal lifecycle guard
[UPDATE]: When adding draw targets
*/

use std::io;

use anyhow::Result;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, terminal};
use ratatui::Terminal;
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;

pub(super) struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    pub(super) fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        let mut stdout = io::stdout();
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Draw target for the run loop
pub(super) enum Screen {
    Live(TerminalGuard),
    Headless(Terminal<TestBackend>),
}

impl Screen {
    pub(super) fn live() -> Result<Self> {
        Ok(Self::Live(TerminalGuard::new()?))
    }

    pub(super) fn headless(width: u16, height: u16) -> Result<Self> {
        Ok(Self::Headless(Terminal::new(TestBackend::new(width, height))?))
    }

    pub(super) fn is_headless(&self) -> bool {
        matches!(self, Self::Headless(_))
    }

    pub(super) fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        match self {
            Self::Live(guard) => {
                guard.terminal.draw(f)?;
            }
            Self::Headless(terminal) => {
                terminal.draw(f)?;
            }
        }
        Ok(())
    }

    /// Plain text of the last headless frame
    pub(super) fn dump(&self) -> Option<String> {
        match self {
            Self::Live(_) => None,
            Self::Headless(terminal) => Some(buffer_text(terminal.backend().buffer())),
        }
    }
}

pub(super) fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
