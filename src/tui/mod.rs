mod app;
mod help_text;
mod syntax;
pub mod theme;
mod ui;

pub use app::{App, AppMode};
pub use theme::{Theme, ThemeName};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Instant;

/// Run the TUI application.
///
/// Draws, waits for a key or the next scheduled tick (search debounce,
/// status expiry, preview query results), and repeats until the app asks
/// to quit. The caller owns terminal setup and restore.
pub fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        app.tick(Instant::now());

        if app.should_quit {
            tracing::debug!("quit requested");
            return Ok(());
        }
    }
}
