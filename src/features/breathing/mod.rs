//! Guided breathing sessions.
//!
//! Provides the box-breathing state machine and its collaborators:
//! - Phase definitions and their labels
//! - Bounded session configuration
//! - The session controller and its one-second tick source
//! - Feedback cues and sinks
//! - Display mapping for renderers
//! - Session plans

pub mod controller;
pub mod display;
pub mod feedback;
pub mod phase;
pub mod plan;
pub mod settings;
pub mod ticker;

pub use controller::{SessionController, SessionSnapshot, SessionState, SubscriptionId};
pub use display::{breath_scale, format_mmss, DisplayValues, IdleDisplay, IdlePlaceholder};
pub use feedback::{BellFeedback, Cue, FeedbackSink, RecordingFeedback, SilentFeedback};
pub use phase::{Phase, PhaseKind};
pub use plan::{PlanStep, SessionPlan, SessionSummary};
pub use settings::SessionConfig;
pub use ticker::Ticker;
