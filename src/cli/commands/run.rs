//! Headless session command.
//!
//! Runs a full session on the terminal without the interactive screen,
//! printing a line for every phase change. Ctrl-C stops the session and
//! still prints the summary.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::Config;
use crate::error::BreathError;
use crate::features::breathing::feedback::FOLLOW_UP_DELAY;
use crate::features::breathing::{
    BellFeedback, FeedbackSink, SessionController, SessionSnapshot, SessionSummary, SilentFeedback,
};
use crate::output::{format_summary, format_transition};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or stdout cannot be
/// written.
pub fn run(config: &Config, args: &RunArgs, format: OutputFormat) -> Result<String, BreathError> {
    let session = args.session.apply(config.session_config()?)?;

    let feedback: Box<dyn FeedbackSink> = if args.quiet || !config.feedback.bell {
        Box::new(SilentFeedback)
    } else {
        // Bells go to stderr so JSON on stdout stays clean.
        Box::new(BellFeedback::new(io::stderr(), config.feedback.subtle))
    };
    let mut controller = SessionController::with_feedback(session, feedback);

    let interrupted = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupted))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = drive(&mut controller, &mut out, format, args.fast, &interrupted)?;

    format_summary(&summary, format)
}

/// Run one session to completion, writing phase changes to `out`.
///
/// With `fast` set, ticks are delivered back to back instead of once per
/// second. Once `interrupted` is set the session is stopped before the next
/// tick and the summary reports the repetitions finished so far.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn drive<F: FeedbackSink, W: Write>(
    controller: &mut SessionController<F>,
    out: &mut W,
    format: OutputFormat,
    fast: bool,
    interrupted: &AtomicBool,
) -> Result<SessionSummary, BreathError> {
    let changes: Rc<RefCell<Vec<SessionSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    let queue = Rc::clone(&changes);
    let mut last_phase = None;
    let subscription = controller.subscribe(move |snapshot| {
        if snapshot.is_active && last_phase != Some(snapshot.phase) {
            queue.borrow_mut().push(*snapshot);
        }
        last_phase = Some(snapshot.phase);
    });

    let total_reps = controller.config().reps();
    let mut elapsed = 0u32;

    controller.start();
    write_changes(&changes, out, elapsed, format)?;

    while controller.is_active() {
        if interrupted.load(Ordering::Relaxed) {
            controller.stop();
            break;
        }
        let ticked = if fast {
            controller.on_tick()
        } else {
            wait_for_tick(controller)
        };
        if ticked {
            elapsed += 1;
        }
        write_changes(&changes, out, elapsed, format)?;
    }

    controller.unsubscribe(subscription);

    // Let the sink finish its follow-up pulse before the process exits.
    if !fast {
        thread::sleep(FOLLOW_UP_DELAY);
    }
    controller.feedback_mut().poll(Instant::now() + FOLLOW_UP_DELAY);

    let completed = controller.is_completed();
    Ok(SessionSummary {
        completed,
        reps_completed: if completed {
            total_reps
        } else {
            total_reps.saturating_sub(controller.reps_remaining())
        },
        total_reps,
        elapsed_seconds: elapsed,
    })
}

fn wait_for_tick<F: FeedbackSink>(controller: &mut SessionController<F>) -> bool {
    if let Some(wait) = controller.time_until_tick(Instant::now()) {
        thread::sleep(wait);
    }
    controller.pump(Instant::now())
}

fn write_changes<W: Write>(
    changes: &Rc<RefCell<Vec<SessionSnapshot>>>,
    out: &mut W,
    elapsed: u32,
    format: OutputFormat,
) -> Result<(), BreathError> {
    let pending = std::mem::take(&mut *changes.borrow_mut());
    for snapshot in &pending {
        writeln!(out, "{}", format_transition(snapshot, elapsed, format)?)?;
    }
    if !pending.is_empty() {
        out.flush()?;
    }
    Ok(())
}
