//! Overview of a session before it runs, and a summary after it ends.

use chrono::{DateTime, Duration, TimeZone};
use serde::Serialize;

use super::phase::PhaseKind;
use super::settings::SessionConfig;

/// One timed phase of a cycle.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanStep {
    pub kind: PhaseKind,
    pub label: String,
    pub seconds: u32,
}

/// What a session with a given configuration will do.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionPlan {
    pub steps: Vec<PlanStep>,
    pub reps: u32,
    pub cycle_seconds: u32,
    pub total_seconds: u32,
}

impl SessionPlan {
    /// Build the plan for `config`.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let steps = PhaseKind::ALL
            .iter()
            .map(|kind| PlanStep {
                kind: *kind,
                label: kind.phase().to_string(),
                seconds: config.duration(*kind),
            })
            .collect();

        Self {
            steps,
            reps: config.reps(),
            cycle_seconds: config.cycle_seconds(),
            total_seconds: config.total_seconds(),
        }
    }

    /// Whole-session length.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.total_seconds))
    }

    /// When a session started at `start` would finish, barring a stop.
    #[must_use]
    pub fn ends_at<Tz: TimeZone>(&self, start: DateTime<Tz>) -> DateTime<Tz> {
        start + self.total_duration()
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub completed: bool,
    pub reps_completed: u32,
    pub total_reps: u32,
    pub elapsed_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_plan_follows_config() {
        let config = SessionConfig::new(4, 7, 8, 1, 3).unwrap();
        let plan = SessionPlan::new(&config);

        assert_eq!(plan.steps.len(), 4);
        assert_eq!(plan.steps[0].label, "INHALE FROM NOSE");
        assert_eq!(plan.steps[2].seconds, 8);
        assert_eq!(plan.cycle_seconds, 20);
        assert_eq!(plan.total_seconds, 60);
        assert_eq!(plan.reps, 3);
        assert_eq!(plan.total_duration(), Duration::minutes(1));
    }

    #[test]
    fn test_ends_at() {
        let plan = SessionPlan::new(&SessionConfig::default());
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 58, 0).unwrap();
        let end = plan.ends_at(start);
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 1, 9, 59, 40).unwrap());
    }
}
