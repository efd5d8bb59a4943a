//! Session configuration: phase durations and repetition count.
//!
//! Every value is bounded. Requests that would leave the bounds are rejected
//! and leave the configuration untouched; callers learn about the rejection
//! from the `false` return value.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::phase::PhaseKind;

/// Allowed phase duration in seconds.
pub const DURATION_RANGE: RangeInclusive<u32> = 1..=30;

/// Allowed repetition count.
pub const REPS_RANGE: RangeInclusive<u32> = 1..=10;

/// Default duration of every phase in seconds.
pub const DEFAULT_DURATION: u32 = 5;

/// Default repetition count.
pub const DEFAULT_REPS: u32 = 5;

/// Durations for the four phases plus the repetition count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig")]
pub struct SessionConfig {
    inhale: u32,
    hold_after_inhale: u32,
    exhale: u32,
    hold_after_exhale: u32,
    reps: u32,
}

/// Unchecked wire form; every decoded config goes through [`SessionConfig::new`].
#[derive(Deserialize)]
struct RawSessionConfig {
    inhale: u32,
    hold_after_inhale: u32,
    exhale: u32,
    hold_after_exhale: u32,
    reps: u32,
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = String;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.inhale,
            raw.hold_after_inhale,
            raw.exhale,
            raw.hold_after_exhale,
            raw.reps,
        )
        .ok_or_else(|| {
            format!(
                "durations must be between {} and {} seconds and reps between {} and {}",
                DURATION_RANGE.start(),
                DURATION_RANGE.end(),
                REPS_RANGE.start(),
                REPS_RANGE.end()
            )
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inhale: DEFAULT_DURATION,
            hold_after_inhale: DEFAULT_DURATION,
            exhale: DEFAULT_DURATION,
            hold_after_exhale: DEFAULT_DURATION,
            reps: DEFAULT_REPS,
        }
    }
}

impl SessionConfig {
    /// Build a configuration, returning `None` if any value is out of range.
    #[must_use]
    pub fn new(
        inhale: u32,
        hold_after_inhale: u32,
        exhale: u32,
        hold_after_exhale: u32,
        reps: u32,
    ) -> Option<Self> {
        let durations = [inhale, hold_after_inhale, exhale, hold_after_exhale];
        if !durations.iter().all(|d| DURATION_RANGE.contains(d)) || !REPS_RANGE.contains(&reps) {
            return None;
        }
        Some(Self {
            inhale,
            hold_after_inhale,
            exhale,
            hold_after_exhale,
            reps,
        })
    }

    /// Same duration for every phase.
    #[must_use]
    pub fn uniform(seconds: u32, reps: u32) -> Option<Self> {
        Self::new(seconds, seconds, seconds, seconds, reps)
    }

    /// Configured duration of a phase in seconds.
    #[must_use]
    pub const fn duration(&self, kind: PhaseKind) -> u32 {
        match kind {
            PhaseKind::Inhale => self.inhale,
            PhaseKind::HoldAfterInhale => self.hold_after_inhale,
            PhaseKind::Exhale => self.exhale,
            PhaseKind::HoldAfterExhale => self.hold_after_exhale,
        }
    }

    /// Configured repetition count.
    #[must_use]
    pub const fn reps(&self) -> u32 {
        self.reps
    }

    /// Set a phase duration. Rejected if outside [`DURATION_RANGE`].
    pub fn set_duration(&mut self, kind: PhaseKind, seconds: u32) -> bool {
        if !DURATION_RANGE.contains(&seconds) {
            return false;
        }
        *self.slot(kind) = seconds;
        true
    }

    /// Set the repetition count. Rejected if outside [`REPS_RANGE`].
    pub fn set_reps(&mut self, reps: u32) -> bool {
        if !REPS_RANGE.contains(&reps) {
            return false;
        }
        self.reps = reps;
        true
    }

    /// Move a duration by `delta` seconds, rejected at the bounds.
    pub fn adjust_duration(&mut self, kind: PhaseKind, delta: i32) -> bool {
        match self.duration(kind).checked_add_signed(delta) {
            Some(value) => self.set_duration(kind, value),
            None => false,
        }
    }

    /// Move the repetition count by `delta`, rejected at the bounds.
    pub fn adjust_reps(&mut self, delta: i32) -> bool {
        match self.reps.checked_add_signed(delta) {
            Some(value) => self.set_reps(value),
            None => false,
        }
    }

    /// Seconds in one full repetition.
    #[must_use]
    pub fn cycle_seconds(&self) -> u32 {
        PhaseKind::ALL.iter().map(|k| self.duration(*k)).sum()
    }

    /// Seconds in the whole session.
    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        self.cycle_seconds() * self.reps
    }

    fn slot(&mut self, kind: PhaseKind) -> &mut u32 {
        match kind {
            PhaseKind::Inhale => &mut self.inhale,
            PhaseKind::HoldAfterInhale => &mut self.hold_after_inhale,
            PhaseKind::Exhale => &mut self.exhale,
            PhaseKind::HoldAfterExhale => &mut self.hold_after_exhale,
        }
    }
}
