//! Terminal User Interface (TUI) for lastbreath.
//!
//! Shows the breathing circle, the current phase, and the remaining seconds
//! and repetitions. Settings can be adjusted while no session is running.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, SettingRow};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::BreathError;
use crate::features::breathing::{BellFeedback, FeedbackSink, SessionController, SilentFeedback};

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal fails to
/// initialize or draw.
pub fn run(config: &Config) -> Result<(), BreathError> {
    let session = config.session_config()?;
    let feedback: Box<dyn FeedbackSink> = if config.feedback.bell {
        Box::new(BellFeedback::new(io::stdout(), config.feedback.subtle))
    } else {
        Box::new(SilentFeedback)
    };
    let mut app = App::new(
        SessionController::with_feedback(session, feedback),
        config.display.idle_display(),
    );

    // Setup terminal
    enable_raw_mode().map_err(|e| BreathError::terminal("Failed to enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreathError::terminal("Failed to setup terminal", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| BreathError::terminal("Failed to create terminal", e))?;

    tracing::info!("interactive session opened");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, F: FeedbackSink>(
    terminal: &mut Terminal<B>,
    app: &mut App<F>,
) -> Result<(), BreathError> {
    while !app.should_quit {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreathError::terminal("Failed to draw", e))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::ToggleSession => app.toggle_session(),
                event::Action::ToggleSettings => app.toggle_settings(),
                event::Action::Adjust(delta) => app.adjust_selected(delta),
            }
        }

        app.on_frame(Instant::now());
    }

    app.controller.stop();
    Ok(())
}
