//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::BreathError;
use crate::features::breathing::FeedbackSink;
use crate::tui::app::App;

/// How long to wait for input before advancing time.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Help line shown on `?`.
pub const HELP: &str =
    "space:start/stop | s:settings | j/k:select | h/l:adjust | ?:help | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or stop the session.
    ToggleSession,
    /// Show or hide settings.
    ToggleSettings,
    /// Adjust the selected setting.
    Adjust(i32),
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<F: FeedbackSink>(app: &mut App<F>) -> Result<Option<Action>, BreathError> {
    // Poll for events with a small timeout
    if !event::poll(POLL_INTERVAL).map_err(|e| BreathError::terminal("Event poll failed", e))? {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| BreathError::terminal("Event read failed", e))?
    else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    Ok(map_key(app, key.code))
}

/// Translate a key press into an action, applying navigation directly.
pub fn map_key<F: FeedbackSink>(app: &mut App<F>, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleSession),
        KeyCode::Char('s') => Some(Action::ToggleSettings),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }

        KeyCode::Char('l' | '+' | '=') | KeyCode::Right => Some(Action::Adjust(1)),
        KeyCode::Char('h' | '-') | KeyCode::Left => Some(Action::Adjust(-1)),

        // Help
        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
            None
        }

        _ => {
            app.clear_status();
            None
        }
    }
}
