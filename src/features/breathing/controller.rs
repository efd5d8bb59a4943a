//! Breathing session controller.
//!
//! Owns the session state machine, the tick source, and the configuration.
//! All calls are expected from a single thread (the UI loop); the controller
//! has no internal locking.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -start-> InhaleNose -> HoldAfterInhale -> ExhaleMouth -> HoldAfterExhale
//!                   ^                                                |
//!                   +------------- reps remaining > 1 ---------------+
//!                                                                    |
//! Idle <------------------------ last repetition --------------------+
//! ```
//!
//! A phase configured for `d` seconds consumes exactly `d` ticks: the tick
//! that brings the countdown to zero also performs the transition.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::feedback::{Cue, FeedbackSink, SilentFeedback};
use super::phase::{Phase, PhaseKind};
use super::settings::SessionConfig;
use super::ticker::Ticker;

/// Handle returned by [`SessionController::subscribe`].
pub type SubscriptionId = u64;

type Subscriber = Box<dyn FnMut(&SessionSnapshot)>;

/// Mutable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub reps_remaining: u32,
    pub is_active: bool,
    pub is_completed: bool,
}

/// Point-in-time copy of the session, handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub reps_remaining: u32,
    pub total_reps: u32,
    /// Configured length of the current phase; zero while idle.
    pub phase_duration: u32,
    pub is_active: bool,
    pub is_completed: bool,
}

/// The breathing session state machine.
pub struct SessionController<F: FeedbackSink = SilentFeedback> {
    config: SessionConfig,
    state: SessionState,
    ticker: Ticker,
    feedback: F,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl SessionController<SilentFeedback> {
    /// Create an idle controller without feedback.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_feedback(config, SilentFeedback)
    }
}

impl<F: FeedbackSink> SessionController<F> {
    /// Create an idle controller that reports cues to `feedback`.
    pub fn with_feedback(config: SessionConfig, feedback: F) -> Self {
        Self {
            config,
            state: SessionState::default(),
            ticker: Ticker::default(),
            feedback,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Use a different tick cadence. Intended for hosts that drive time
    /// themselves; the default is one second.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.ticker = Ticker::new(interval);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    pub const fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    pub const fn reps_remaining(&self) -> u32 {
        self.state.reps_remaining
    }

    pub const fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub const fn is_completed(&self) -> bool {
        self.state.is_completed
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    /// Whether the tick source is armed.
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Time until the next tick is due, `None` when no session is running.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    /// Build a snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase,
            seconds_remaining: self.state.seconds_remaining,
            reps_remaining: self.state.reps_remaining,
            total_reps: self.config.reps(),
            phase_duration: self.phase_duration(self.state.phase),
            is_active: self.state.is_active,
            is_completed: self.state.is_completed,
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a callback invoked with a fresh snapshot after every change.
    pub fn subscribe<C>(&mut self, callback: C) -> SubscriptionId
    where
        C: FnMut(&SessionSnapshot) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a session now. No-op if one is already running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// Start a session, arming the tick source relative to `now`.
    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.state.is_active {
            debug!("start ignored: session already active");
            return false;
        }

        self.state.is_active = true;
        self.state.is_completed = false;
        self.state.reps_remaining = self.config.reps();
        self.enter(Phase::InhaleNose);
        self.feedback.cue(Cue::PhaseTransition);
        self.ticker.arm(now);

        info!(
            reps = self.config.reps(),
            cycle_seconds = self.config.cycle_seconds(),
            "breathing session started"
        );
        self.notify();
        true
    }

    /// Stop the running session. No-op when idle.
    ///
    /// The tick source is cancelled before this returns, so later ticks have
    /// no effect.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_active {
            debug!("stop ignored: no active session");
            return false;
        }

        self.halt();
        info!(reps_remaining = self.state.reps_remaining, "breathing session stopped");
        self.notify();
        true
    }

    /// Advance the countdown by one second. Ignored while inactive.
    pub fn on_tick(&mut self) -> bool {
        if !self.state.is_active {
            trace!("tick ignored: no active session");
            return false;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining == 0 {
            self.advance();
        }
        self.notify();
        true
    }

    /// Deliver a tick if the tick source is due and let the feedback sink run
    /// delayed work. Returns whether a tick was delivered.
    pub fn pump(&mut self, now: Instant) -> bool {
        let ticked = self.ticker.poll(now) && self.on_tick();
        self.feedback.poll(now);
        ticked
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Replace the whole configuration. Rejected while active.
    pub fn set_config(&mut self, config: SessionConfig) -> bool {
        self.configure(|c| {
            *c = config;
            true
        })
    }

    /// Set a phase duration. Rejected while active or out of range.
    pub fn set_duration(&mut self, kind: PhaseKind, seconds: u32) -> bool {
        self.configure(|c| c.set_duration(kind, seconds))
    }

    /// Set the repetition count. Rejected while active or out of range.
    pub fn set_reps(&mut self, reps: u32) -> bool {
        self.configure(|c| c.set_reps(reps))
    }

    /// Move a phase duration by `delta`. Rejected while active or at a bound.
    pub fn adjust_duration(&mut self, kind: PhaseKind, delta: i32) -> bool {
        self.configure(|c| c.adjust_duration(kind, delta))
    }

    /// Move the repetition count by `delta`. Rejected while active or at a bound.
    pub fn adjust_reps(&mut self, delta: i32) -> bool {
        self.configure(|c| c.adjust_reps(delta))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn configure(&mut self, change: impl FnOnce(&mut SessionConfig) -> bool) -> bool {
        if self.state.is_active {
            debug!("configuration change rejected: session active");
            return false;
        }
        if !change(&mut self.config) {
            debug!("configuration change rejected: out of range");
            return false;
        }
        self.notify();
        true
    }

    fn advance(&mut self) {
        let (next, cue) = match self.state.phase {
            Phase::Idle => return,
            Phase::InhaleNose => (Phase::HoldAfterInhale, Cue::BreathTransition),
            Phase::HoldAfterInhale => (Phase::ExhaleMouth, Cue::PhaseTransition),
            Phase::ExhaleMouth => (Phase::HoldAfterExhale, Cue::BreathTransition),
            Phase::HoldAfterExhale if self.state.reps_remaining > 1 => {
                self.state.reps_remaining -= 1;
                (Phase::InhaleNose, Cue::RepCompletion)
            }
            Phase::HoldAfterExhale => {
                self.state.is_completed = true;
                self.feedback.cue(Cue::SessionComplete);
                self.halt();
                info!(reps = self.config.reps(), "breathing session completed");
                return;
            }
        };

        debug!(from = ?self.state.phase, to = ?next, %cue, "phase transition");
        self.enter(next);
        self.feedback.cue(cue);
    }

    fn enter(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.state.seconds_remaining = self.phase_duration(phase);
    }

    fn halt(&mut self) {
        self.ticker.cancel();
        self.state.is_active = false;
        self.state.phase = Phase::Idle;
        self.state.seconds_remaining = 0;
    }

    fn phase_duration(&self, phase: Phase) -> u32 {
        phase.kind().map_or(0, |kind| self.config.duration(kind))
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, callback) in &mut self.subscribers {
            callback(&snapshot);
        }
    }
}

impl<F: FeedbackSink + std::fmt::Debug> std::fmt::Debug for SessionController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("ticker", &self.ticker)
            .field("feedback", &self.feedback)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use mockall::predicate::eq;
    use mockall::Sequence;
    use proptest::prelude::*;

    use super::*;
    use crate::features::breathing::feedback::{MockFeedbackSink, RecordingFeedback};

    fn recording(seconds: u32, reps: u32) -> SessionController<RecordingFeedback> {
        let config = SessionConfig::uniform(seconds, reps).unwrap();
        SessionController::with_feedback(config, RecordingFeedback::new())
    }

    fn tick_n<F: FeedbackSink>(controller: &mut SessionController<F>, n: u32) {
        for _ in 0..n {
            controller.on_tick();
        }
    }

    #[test]
    fn test_new_is_idle() {
        let controller = SessionController::new(SessionConfig::default());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.seconds_remaining(), 0);
        assert!(!controller.is_active());
        assert!(!controller.is_completed());
        assert!(!controller.is_ticking());
    }

    #[test]
    fn test_start_enters_inhale() {
        let mut controller = recording(5, 2);
        assert!(controller.start());

        assert_eq!(controller.phase(), Phase::InhaleNose);
        assert_eq!(controller.seconds_remaining(), 5);
        assert_eq!(controller.reps_remaining(), 2);
        assert!(controller.is_active());
        assert!(controller.is_ticking());
        assert_eq!(controller.feedback().cues(), &[Cue::PhaseTransition]);
    }

    #[test]
    fn test_scenario_two_reps() {
        let mut controller = recording(5, 2);
        controller.start();
        controller.feedback_mut().drain();

        tick_n(&mut controller, 4);
        assert_eq!(controller.phase(), Phase::InhaleNose);
        assert_eq!(controller.seconds_remaining(), 1);

        tick_n(&mut controller, 1);
        assert_eq!(controller.phase(), Phase::HoldAfterInhale);
        assert_eq!(controller.seconds_remaining(), 5);
        assert_eq!(controller.feedback_mut().drain(), vec![Cue::BreathTransition]);

        tick_n(&mut controller, 5);
        assert_eq!(controller.phase(), Phase::ExhaleMouth);
        assert_eq!(controller.feedback_mut().drain(), vec![Cue::PhaseTransition]);

        tick_n(&mut controller, 5);
        assert_eq!(controller.phase(), Phase::HoldAfterExhale);
        assert_eq!(controller.feedback_mut().drain(), vec![Cue::BreathTransition]);

        tick_n(&mut controller, 5);
        assert_eq!(controller.phase(), Phase::InhaleNose);
        assert_eq!(controller.reps_remaining(), 1);
        assert_eq!(controller.feedback_mut().drain(), vec![Cue::RepCompletion]);

        tick_n(&mut controller, 19);
        assert!(controller.is_active());
        assert_eq!(controller.phase(), Phase::HoldAfterExhale);
        assert_eq!(controller.seconds_remaining(), 1);

        tick_n(&mut controller, 1);
        assert!(controller.is_completed());
        assert!(!controller.is_active());
        assert!(!controller.is_ticking());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.seconds_remaining(), 0);
        assert_eq!(
            controller.feedback_mut().drain(),
            vec![
                Cue::BreathTransition,
                Cue::PhaseTransition,
                Cue::BreathTransition,
                Cue::SessionComplete
            ]
        );
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut once = recording(5, 3);
        once.start();

        let mut twice = recording(5, 3);
        twice.start();
        assert!(!twice.start());

        assert_eq!(once.state(), twice.state());
        assert_eq!(twice.feedback().cues().len(), 1);
    }

    #[test]
    fn test_start_while_running_keeps_progress() {
        let mut controller = recording(5, 3);
        controller.start();
        tick_n(&mut controller, 7);
        let before = *controller.state();
        assert!(!controller.start());
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut controller = recording(5, 3);
        let before = *controller.state();
        assert!(!controller.stop());
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_stop_mid_cycle_cancels() {
        let mut controller = recording(5, 2);
        controller.start();
        tick_n(&mut controller, 7);
        assert_eq!(controller.phase(), Phase::HoldAfterInhale);

        assert!(controller.stop());
        assert!(!controller.is_active());
        assert!(!controller.is_completed());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.seconds_remaining(), 0);
        assert!(!controller.is_ticking());

        let after_stop = *controller.state();
        for _ in 0..50 {
            assert!(!controller.on_tick());
        }
        assert!(!controller.pump(Instant::now() + Duration::from_secs(60)));
        assert_eq!(*controller.state(), after_stop);
    }

    #[test]
    fn test_restart_clears_completion() {
        let mut controller = recording(1, 1);
        controller.start();
        tick_n(&mut controller, 4);
        assert!(controller.is_completed());

        assert!(controller.start());
        assert!(!controller.is_completed());
        assert!(controller.is_active());
        assert_eq!(controller.reps_remaining(), 1);
    }

    #[test]
    fn test_reps_decrease_only_at_cycle_boundary() {
        let config = SessionConfig::new(2, 3, 4, 1, 4).unwrap();
        let mut controller = SessionController::new(config);
        controller.start();

        let mut prev_phase = controller.phase();
        let mut prev_reps = controller.reps_remaining();
        while controller.is_active() {
            controller.on_tick();
            let reps = controller.reps_remaining();
            assert!(reps <= prev_reps);
            if reps < prev_reps {
                assert_eq!(prev_reps - reps, 1);
                assert_eq!(prev_phase, Phase::HoldAfterExhale);
                assert_eq!(controller.phase(), Phase::InhaleNose);
            }
            prev_phase = controller.phase();
            prev_reps = reps;
        }
        assert!(controller.is_completed());
    }

    #[test]
    fn test_config_locked_while_active() {
        let mut controller = recording(5, 2);
        controller.start();

        assert!(!controller.adjust_duration(PhaseKind::Inhale, 1));
        assert!(!controller.adjust_reps(1));
        assert!(!controller.set_reps(3));
        assert!(!controller.set_config(SessionConfig::default()));
        assert_eq!(controller.config().duration(PhaseKind::Inhale), 5);
        assert_eq!(controller.config().reps(), 2);

        controller.stop();
        assert!(controller.adjust_duration(PhaseKind::Inhale, 1));
        assert_eq!(controller.config().duration(PhaseKind::Inhale), 6);
    }

    #[test]
    fn test_config_bounds_through_controller() {
        let mut controller = SessionController::new(SessionConfig::uniform(30, 1).unwrap());
        assert!(!controller.adjust_duration(PhaseKind::Exhale, 1));
        assert!(!controller.adjust_reps(-1));
        assert!(!controller.set_duration(PhaseKind::Exhale, 0));
        assert_eq!(*controller.config(), SessionConfig::uniform(30, 1).unwrap());
    }

    #[test]
    fn test_pump_follows_ticker() {
        let start = Instant::now();
        let mut controller = recording(5, 1);
        controller.start_at(start);

        assert!(!controller.pump(start + Duration::from_millis(500)));
        assert_eq!(controller.seconds_remaining(), 5);

        assert!(controller.pump(start + Duration::from_secs(1)));
        assert_eq!(controller.seconds_remaining(), 4);

        assert_eq!(
            controller.time_until_tick(start + Duration::from_millis(1200)),
            Some(Duration::from_millis(800))
        );
    }

    #[test]
    fn test_custom_tick_interval() {
        let start = Instant::now();
        let mut controller = recording(1, 1).with_tick_interval(Duration::from_millis(10));
        controller.start_at(start);

        assert!(!controller.pump(start + Duration::from_millis(5)));
        for step in 1..=4 {
            assert!(controller.pump(start + Duration::from_millis(10 * step)));
        }
        assert!(controller.is_completed());
        assert!(!controller.is_ticking());
    }

    #[test]
    fn test_subscribers_receive_snapshots() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut controller = recording(1, 1);
        let id = controller.subscribe(move |snap| sink.borrow_mut().push(*snap));

        controller.start();
        controller.on_tick();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[0].phase, Phase::InhaleNose);
        assert_eq!(seen.borrow()[0].phase_duration, 1);
        assert_eq!(seen.borrow()[1].phase, Phase::HoldAfterInhale);

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.on_tick();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_completion_snapshot() {
        let last = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last);

        let mut controller = recording(1, 1);
        controller.subscribe(move |snap| *sink.borrow_mut() = Some(*snap));
        controller.start();
        tick_n(&mut controller, 4);

        let snap = last.borrow().unwrap();
        assert!(snap.is_completed);
        assert!(!snap.is_active);
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.phase_duration, 0);
    }

    #[test]
    fn test_cue_order_with_mock_sink() {
        let mut seq = Sequence::new();
        let mut sink = MockFeedbackSink::new();
        for cue in [
            Cue::PhaseTransition,
            Cue::BreathTransition,
            Cue::PhaseTransition,
            Cue::BreathTransition,
            Cue::SessionComplete,
        ] {
            sink.expect_cue()
                .with(eq(cue))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }

        let mut controller =
            SessionController::with_feedback(SessionConfig::uniform(1, 1).unwrap(), sink);
        controller.start();
        tick_n(&mut controller, 4);
        assert!(controller.is_completed());
    }

    #[test]
    fn test_stop_emits_no_cue() {
        let mut sink = MockFeedbackSink::new();
        sink.expect_cue()
            .with(eq(Cue::PhaseTransition))
            .times(1)
            .return_const(());

        let mut controller = SessionController::with_feedback(SessionConfig::default(), sink);
        controller.start();
        controller.stop();
        controller.stop();
    }

    proptest! {
        #[test]
        fn prop_exact_tick_budget(
            inhale in 1u32..=30,
            hold_in in 1u32..=30,
            exhale in 1u32..=30,
            hold_out in 1u32..=30,
            reps in 1u32..=10,
        ) {
            let config = SessionConfig::new(inhale, hold_in, exhale, hold_out, reps).unwrap();
            let mut controller = SessionController::new(config);
            controller.start();

            let total = (inhale + hold_in + exhale + hold_out) * reps;
            for _ in 0..total - 1 {
                prop_assert!(controller.on_tick());
                prop_assert!(controller.is_active());
                prop_assert!(!controller.is_completed());
            }
            prop_assert!(controller.on_tick());
            prop_assert!(controller.is_completed());
            prop_assert!(!controller.is_active());
            prop_assert!(!controller.on_tick());
        }

        #[test]
        fn prop_idle_means_zero_countdown(ticks in 0u32..200) {
            let mut controller = SessionController::new(SessionConfig::uniform(2, 3).unwrap());
            controller.start();
            for _ in 0..ticks {
                controller.on_tick();
                let state = controller.state();
                prop_assert_eq!(state.is_active, state.phase != Phase::Idle);
                prop_assert_eq!(controller.is_ticking(), state.is_active);
                prop_assert!(!(state.is_active && state.is_completed));
                if state.phase == Phase::Idle {
                    prop_assert_eq!(state.seconds_remaining, 0);
                }
                prop_assert!(state.reps_remaining <= 3);
            }
        }
    }
}
