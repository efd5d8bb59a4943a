//! Mapping from session snapshots to what the user sees.
//!
//! Nothing here mutates the session. The idle placeholder policy and the
//! breathing-circle animation live on this side of the boundary so the state
//! machine stays free of presentation concerns.

use serde::{Deserialize, Serialize};

use super::controller::SessionSnapshot;
use super::phase::{Phase, PhaseKind};
use super::settings::SessionConfig;

/// Circle scale at rest (empty lungs).
pub const SCALE_MIN: f64 = 1.0;

/// Circle scale at full lungs.
pub const SCALE_MAX: f64 = 1.4;

/// What to show for seconds and repetitions when no session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdlePlaceholder {
    /// The configured inhale duration and repetition count.
    #[default]
    Preview,
    /// Zeros.
    Zero,
    /// Fixed values from the display configuration.
    Fixed,
}

/// Idle display policy with the values used by [`IdlePlaceholder::Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleDisplay {
    pub placeholder: IdlePlaceholder,
    pub fixed_seconds: u32,
    pub fixed_reps: u32,
}

impl Default for IdleDisplay {
    fn default() -> Self {
        Self {
            placeholder: IdlePlaceholder::Preview,
            fixed_seconds: 4,
            fixed_reps: 12,
        }
    }
}

/// Numbers to render for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayValues {
    pub seconds: u32,
    pub reps: u32,
}

impl DisplayValues {
    /// Pick the values to render, applying the idle policy when inactive.
    #[must_use]
    pub fn from_snapshot(
        snapshot: &SessionSnapshot,
        config: &SessionConfig,
        idle: &IdleDisplay,
    ) -> Self {
        if snapshot.is_active {
            return Self {
                seconds: snapshot.seconds_remaining,
                reps: snapshot.reps_remaining,
            };
        }
        match idle.placeholder {
            IdlePlaceholder::Preview => Self {
                seconds: config.duration(PhaseKind::Inhale),
                reps: config.reps(),
            },
            IdlePlaceholder::Zero => Self { seconds: 0, reps: 0 },
            IdlePlaceholder::Fixed => Self {
                seconds: idle.fixed_seconds,
                reps: idle.fixed_reps,
            },
        }
    }

    /// Seconds as two digits, e.g. `05`.
    #[must_use]
    pub fn seconds_text(&self) -> String {
        format!("{:02}", self.seconds)
    }

    /// Repetitions as two digits.
    #[must_use]
    pub fn reps_text(&self) -> String {
        format!("{:02}", self.reps)
    }
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Fraction of the current phase already elapsed, 0.0 ..= 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn phase_progress(snapshot: &SessionSnapshot) -> f64 {
    if snapshot.phase_duration == 0 {
        return 0.0;
    }
    let elapsed = snapshot.phase_duration.saturating_sub(snapshot.seconds_remaining);
    (f64::from(elapsed) / f64::from(snapshot.phase_duration)).clamp(0.0, 1.0)
}

/// Breathing-circle scale for a snapshot.
///
/// Grows over the inhale, stays large through the first hold, shrinks over
/// the exhale, and stays small through the second hold and while idle.
#[must_use]
pub fn breath_scale(snapshot: &SessionSnapshot) -> f64 {
    let progress = phase_progress(snapshot);
    match snapshot.phase {
        Phase::Idle | Phase::HoldAfterExhale => SCALE_MIN,
        Phase::InhaleNose => SCALE_MIN + (SCALE_MAX - SCALE_MIN) * progress,
        Phase::HoldAfterInhale => SCALE_MAX,
        Phase::ExhaleMouth => SCALE_MAX - (SCALE_MAX - SCALE_MIN) * progress,
    }
}
