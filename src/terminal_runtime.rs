use std::io;

use ratatui::backend::Backend;
use ratatui::{DefaultTerminal, Terminal};

use crate::config::Palette;
use crate::game::GameState;
use crate::renderer;

/// Full-screen terminal for one game session.
///
/// Entering switches to raw mode and the alternate screen and installs a
/// panic hook that undoes both. Dropping the session restores the terminal.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self { terminal })
    }

    /// Draws the current game state.
    pub fn draw(&mut self, state: &GameState, palette: &Palette) -> io::Result<()> {
        draw_state(&mut self.terminal, state, palette)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Renders `state` as one frame on any ratatui backend.
pub fn draw_state<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &GameState,
    palette: &Palette,
) -> io::Result<()> {
    let text = state.frame();
    let status = state.status();
    let glyphs = state.glyphs();

    terminal.draw(|frame| renderer::render(frame, &text, status, glyphs, palette))?;
    Ok(())
}
