//! Application state for the TUI.

use std::time::Instant;

use crate::features::breathing::{
    Cue, DisplayValues, FeedbackSink, IdleDisplay, PhaseKind, SessionController, SessionSnapshot,
};
use crate::features::breathing::settings::{DURATION_RANGE, REPS_RANGE};

/// A row in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingRow {
    Duration(PhaseKind),
    Reps,
}

impl SettingRow {
    /// Rows in display order.
    pub const ALL: [Self; 5] = [
        Self::Duration(PhaseKind::Inhale),
        Self::Duration(PhaseKind::HoldAfterInhale),
        Self::Duration(PhaseKind::Exhale),
        Self::Duration(PhaseKind::HoldAfterExhale),
        Self::Reps,
    ];

    /// Row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Duration(kind) => kind.display_name(),
            Self::Reps => "Repetitions",
        }
    }
}

/// Application state.
pub struct App<F: FeedbackSink> {
    /// The breathing session.
    pub controller: SessionController<F>,
    /// Idle placeholder policy.
    pub idle: IdleDisplay,
    /// Whether the settings panel is visible.
    pub show_settings: bool,
    /// Currently selected settings row.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<F: FeedbackSink> App<F> {
    /// Create a new app instance.
    pub fn new(controller: SessionController<F>, idle: IdleDisplay) -> Self {
        Self {
            controller,
            idle,
            show_settings: false,
            selected: 0,
            status: Some("Press space to begin, ? for help".to_string()),
            should_quit: false,
        }
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.controller.snapshot()
    }

    /// Seconds and repetitions to render.
    pub fn display_values(&self) -> DisplayValues {
        DisplayValues::from_snapshot(&self.snapshot(), self.controller.config(), &self.idle)
    }

    /// Advance time. Called once per loop iteration.
    pub fn on_frame(&mut self, now: Instant) {
        let was_active = self.controller.is_active();
        self.controller.pump(now);
        if was_active && self.controller.is_completed() {
            self.status = Some("Session complete. Press space to go again".to_string());
        }
    }

    /// Start a session when idle, stop it when running.
    pub fn toggle_session(&mut self) {
        if self.controller.is_active() {
            self.controller.stop();
            self.status = Some("Session stopped".to_string());
        } else {
            self.controller.start();
            self.status = None;
        }
    }

    /// Show or hide the settings panel.
    pub fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected < SettingRow::ALL.len() - 1 {
            self.selected += 1;
        }
    }

    /// The selected settings row.
    pub fn selected_row(&self) -> SettingRow {
        SettingRow::ALL[self.selected.min(SettingRow::ALL.len() - 1)]
    }

    /// Current value of a settings row.
    pub fn row_value(&self, row: SettingRow) -> u32 {
        match row {
            SettingRow::Duration(kind) => self.controller.config().duration(kind),
            SettingRow::Reps => self.controller.config().reps(),
        }
    }

    /// Adjust the selected setting by `delta`.
    ///
    /// Accepted changes give a light cue through the session's feedback sink.
    pub fn adjust_selected(&mut self, delta: i32) {
        if !self.show_settings {
            self.show_settings = true;
            return;
        }
        if self.controller.is_active() {
            self.status = Some("Stop the session to change settings".to_string());
            return;
        }

        let row = self.selected_row();
        let accepted = match row {
            SettingRow::Duration(kind) => self.controller.adjust_duration(kind, delta),
            SettingRow::Reps => self.controller.adjust_reps(delta),
        };

        if accepted {
            self.controller.feedback_mut().cue(Cue::BreathTransition);
        }

        self.status = Some(if accepted {
            format!("{}: {}", row.label(), self.row_value(row))
        } else {
            match row {
                SettingRow::Duration(_) => format!(
                    "{} must be between {} and {} seconds",
                    row.label(),
                    DURATION_RANGE.start(),
                    DURATION_RANGE.end()
                ),
                SettingRow::Reps => format!(
                    "Repetitions must be between {} and {}",
                    REPS_RANGE.start(),
                    REPS_RANGE.end()
                ),
            }
        });
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
