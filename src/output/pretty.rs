use std::path::Path;

use chrono::Local;
use colored::{ColoredString, Colorize};

use crate::config::Config;
use crate::features::breathing::{format_mmss, Phase, SessionPlan, SessionSnapshot, SessionSummary};

fn phase_colored(phase: Phase, text: &str) -> ColoredString {
    match phase {
        Phase::Idle => text.dimmed(),
        Phase::InhaleNose => text.cyan().bold(),
        Phase::HoldAfterInhale | Phase::HoldAfterExhale => text.yellow(),
        Phase::ExhaleMouth => text.magenta().bold(),
    }
}

/// Format one phase change of a running session.
pub fn format_transition_pretty(snapshot: &SessionSnapshot, elapsed_seconds: u32) -> String {
    let rep = snapshot
        .total_reps
        .saturating_sub(snapshot.reps_remaining)
        .saturating_add(1);

    format!(
        "{} {:<18} {:>3}s  {}",
        format!("[{}]", format_mmss(elapsed_seconds)).dimmed(),
        phase_colored(snapshot.phase, &snapshot.phase.to_string()),
        snapshot.seconds_remaining,
        format!("rep {}/{}", rep, snapshot.total_reps).dimmed()
    )
}

/// Format the end-of-session summary.
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let duration = format_mmss(summary.elapsed_seconds);
    if summary.completed {
        format!(
            "{} {} of {} repetitions in {}",
            "✅ Session complete:".green().bold(),
            summary.reps_completed,
            summary.total_reps,
            duration
        )
    } else {
        format!(
            "{} {} of {} repetitions in {}",
            "⏹️  Session stopped:".yellow(),
            summary.reps_completed,
            summary.total_reps,
            duration
        )
    }
}

/// Format a session plan as a table.
pub fn format_plan_pretty(plan: &SessionPlan) -> String {
    let mut output = format!("{}\n", "Breathing plan".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for step in &plan.steps {
        output.push_str(&format!(
            "  {:<20} {:>3}s\n",
            phase_colored(step.kind.phase(), &step.label),
            step.seconds
        ));
    }

    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {:<20} {}\n",
        "Cycle".dimmed(),
        format_mmss(plan.cycle_seconds)
    ));
    output.push_str(&format!("  {:<20} {}\n", "Repetitions".dimmed(), plan.reps));
    output.push_str(&format!(
        "  {:<20} {}\n",
        "Total".dimmed(),
        format_mmss(plan.total_seconds).bold()
    ));
    output.push_str(&format!(
        "  {:<20} {}",
        "Ends at".dimmed(),
        plan.ends_at(Local::now()).format("%H:%M")
    ));

    output
}

/// Format the effective configuration.
pub fn format_config_pretty(config: &Config, path: &Path) -> String {
    let mut output = format!("{} {}\n", "Config:".bold(), path.display());

    output.push_str(&format!("\n  {}\n", "session".cyan()));
    output.push_str(&format!("    inhale:            {}s\n", config.session.inhale));
    output.push_str(&format!(
        "    hold_after_inhale: {}s\n",
        config.session.hold_after_inhale
    ));
    output.push_str(&format!("    exhale:            {}s\n", config.session.exhale));
    output.push_str(&format!(
        "    hold_after_exhale: {}s\n",
        config.session.hold_after_exhale
    ));
    output.push_str(&format!("    reps:              {}\n", config.session.reps));

    output.push_str(&format!("\n  {}\n", "feedback".cyan()));
    output.push_str(&format!("    bell:   {}\n", config.feedback.bell));
    output.push_str(&format!("    subtle: {}\n", config.feedback.subtle));

    output.push_str(&format!("\n  {}\n", "display".cyan()));
    output.push_str(&format!("    idle:         {:?}\n", config.display.idle).to_lowercase());
    output.push_str(&format!("    idle_seconds: {}\n", config.display.idle_seconds));
    output.push_str(&format!("    idle_reps:    {}", config.display.idle_reps));

    output
}
