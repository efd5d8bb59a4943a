//! Breathing phases and their display labels.

use serde::{Deserialize, Serialize};

/// A stage of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session running.
    #[default]
    Idle,
    /// Breathe in through the nose.
    InhaleNose,
    /// Hold with full lungs.
    HoldAfterInhale,
    /// Breathe out through the mouth.
    ExhaleMouth,
    /// Hold with empty lungs.
    HoldAfterExhale,
}

/// The four timed phases, used to address configured durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Inhale,
    HoldAfterInhale,
    Exhale,
    HoldAfterExhale,
}

/// Static label pair shown for a phase, e.g. "INHALE FROM" / "NOSE".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLabel {
    pub prefix: &'static str,
    pub main: &'static str,
}

const LABELS: [(Phase, PhaseLabel); 5] = [
    (Phase::Idle, PhaseLabel { prefix: "TAP TO", main: "START" }),
    (Phase::InhaleNose, PhaseLabel { prefix: "INHALE FROM", main: "NOSE" }),
    (Phase::HoldAfterInhale, PhaseLabel { prefix: "AND", main: "HOLD" }),
    (Phase::ExhaleMouth, PhaseLabel { prefix: "EXHALE FROM", main: "MOUTH" }),
    (Phase::HoldAfterExhale, PhaseLabel { prefix: "AND", main: "HOLD" }),
];

impl Phase {
    /// Label pair for this phase.
    #[must_use]
    pub fn label(self) -> PhaseLabel {
        LABELS
            .iter()
            .find(|(phase, _)| *phase == self)
            .map_or(LABELS[0].1, |(_, label)| *label)
    }

    /// Smaller text shown above the main label.
    #[must_use]
    pub fn prefix_text(self) -> &'static str {
        self.label().prefix
    }

    /// Main label.
    #[must_use]
    pub fn main_text(self) -> &'static str {
        self.label().main
    }

    /// The configured-duration slot for a timed phase; `None` for `Idle`.
    #[must_use]
    pub const fn kind(self) -> Option<PhaseKind> {
        match self {
            Self::Idle => None,
            Self::InhaleNose => Some(PhaseKind::Inhale),
            Self::HoldAfterInhale => Some(PhaseKind::HoldAfterInhale),
            Self::ExhaleMouth => Some(PhaseKind::Exhale),
            Self::HoldAfterExhale => Some(PhaseKind::HoldAfterExhale),
        }
    }

    /// Whether a session is running in this phase.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self.label();
        write!(f, "{} {}", label.prefix, label.main)
    }
}

impl PhaseKind {
    /// All kinds in cycle order.
    pub const ALL: [Self; 4] = [
        Self::Inhale,
        Self::HoldAfterInhale,
        Self::Exhale,
        Self::HoldAfterExhale,
    ];

    /// The phase that runs this kind's duration.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::Inhale => Phase::InhaleNose,
            Self::HoldAfterInhale => Phase::HoldAfterInhale,
            Self::Exhale => Phase::ExhaleMouth,
            Self::HoldAfterExhale => Phase::HoldAfterExhale,
        }
    }

    /// Name shown in settings and plans.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::HoldAfterInhale => "Hold (after inhale)",
            Self::Exhale => "Exhale",
            Self::HoldAfterExhale => "Hold (after exhale)",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
