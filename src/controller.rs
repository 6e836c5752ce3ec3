//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - Ticking the planchette and rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::event::{apply_action, handle_event, poll_event};
use crate::model::AppState;
use crate::ui::glyphs::Glyphs;
use crate::ui::render;

/// Poll timeout while nothing on screen moves.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// How long to wait for input before the next frame.
///
/// Frames are only needed at `tick_rate` while the planchette or a reveal is
/// in motion; otherwise the loop just waits for keys.
pub fn poll_timeout(state: &AppState, tick_rate: Duration) -> Duration {
    if state.is_animating() {
        tick_rate
    } else {
        IDLE_POLL.max(tick_rate)
    }
}

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Glyph set used for rendering
    glyphs: Glyphs,
    /// Event poll timeout, which is also the animation frame interval
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, glyphs: Glyphs, tick_rate: Duration) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            glyphs,
            tick_rate,
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        info!(tick_ms = self.tick_rate.as_millis() as u64, "application started");

        loop {
            self.state.tick();

            // Render
            let glyphs = self.glyphs;
            let state = &self.state;
            self.terminal.draw(|frame| {
                render(frame, state, &glyphs);
            })?;

            // Handle events
            let timeout = poll_timeout(&self.state, self.tick_rate);
            if let Some(event) = poll_event(timeout) {
                let action = handle_event(event, self.state.show_help);
                apply_action(&mut self.state, action);

                if self.state.should_quit {
                    break;
                }
            }
        }

        info!("application stopped");
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the interactive board.
pub fn run_app(state: AppState, glyphs: Glyphs, tick_rate: Duration) -> Result<()> {
    let mut app = App::new(state, glyphs, tick_rate)?;
    app.run()
}
