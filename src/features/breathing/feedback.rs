//! Feedback cues emitted on phase transitions.
//!
//! The controller hands every transition to a [`FeedbackSink`]. Sinks decide
//! how a cue is felt or heard; any follow-up timing they need (such as the
//! second pulse after a completed session) is their own business and is
//! driven by [`FeedbackSink::poll`].

use std::io::Write;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Delay between the two pulses that mark a completed session.
pub const FOLLOW_UP_DELAY: Duration = Duration::from_millis(150);

const BELL: &[u8] = b"\x07";

/// A discrete notification raised by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Entered an inhale or exhale.
    PhaseTransition,
    /// Entered a hold.
    BreathTransition,
    /// Finished one repetition, another follows.
    RepCompletion,
    /// Finished the last repetition.
    SessionComplete,
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PhaseTransition => "phase transition",
            Self::BreathTransition => "breath transition",
            Self::RepCompletion => "repetition complete",
            Self::SessionComplete => "session complete",
        };
        write!(f, "{name}")
    }
}

/// Receiver of feedback cues.
#[cfg_attr(test, mockall::automock)]
pub trait FeedbackSink {
    /// Handle a cue. Called synchronously from within the transition.
    fn cue(&mut self, cue: Cue);

    /// Give the sink a chance to run delayed work.
    fn poll(&mut self, _now: Instant) {}
}

impl<T: FeedbackSink + ?Sized> FeedbackSink for Box<T> {
    fn cue(&mut self, cue: Cue) {
        (**self).cue(cue);
    }

    fn poll(&mut self, now: Instant) {
        (**self).poll(now);
    }
}

/// Ignores every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn cue(&mut self, _cue: Cue) {}
}

/// Keeps every cue in order of arrival.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    cues: Vec<Cue>,
}

impl RecordingFeedback {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { cues: Vec::new() }
    }

    /// Cues recorded so far.
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

impl FeedbackSink for RecordingFeedback {
    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Rings the terminal bell.
///
/// Inhale, exhale and repetition cues ring once. Holds ring once unless the
/// sink is `subtle`. A completed session rings twice, the second time
/// [`FOLLOW_UP_DELAY`] later.
#[derive(Debug)]
pub struct BellFeedback<W: Write> {
    out: W,
    subtle: bool,
    follow_up_at: Option<Instant>,
}

impl<W: Write> BellFeedback<W> {
    /// Create a bell sink writing to `out`.
    pub const fn new(out: W, subtle: bool) -> Self {
        Self {
            out,
            subtle,
            follow_up_at: None,
        }
    }

    /// Whether a follow-up pulse is still pending.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.follow_up_at.is_some()
    }

    /// Consume the sink and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self) {
        let result = self.out.write_all(BELL).and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to ring terminal bell");
        }
    }
}

impl<W: Write> FeedbackSink for BellFeedback<W> {
    fn cue(&mut self, cue: Cue) {
        match cue {
            Cue::BreathTransition if self.subtle => {}
            Cue::SessionComplete => {
                self.ring();
                self.follow_up_at = Some(Instant::now() + FOLLOW_UP_DELAY);
            }
            _ => self.ring(),
        }
    }

    fn poll(&mut self, now: Instant) {
        if self.follow_up_at.is_some_and(|due| now >= due) {
            self.follow_up_at = None;
            self.ring();
        }
    }
}
