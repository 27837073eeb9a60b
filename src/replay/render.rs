//! Terminal rendering of replay transcripts

use super::runner::{ReplayReport, ReplayStep, Snapshot, StepAction};
use super::script::ScriptEvent;
use crate::session::ResponseDisposition;
use colored::Colorize;
use std::fmt::Write;

/// One line describing what happened, plus the list that was on screen
#[must_use]
pub fn render_step(step: &ReplayStep) -> String {
    let mut out = format!("{:>6}ms  {}", step.at_ms, describe(&step.action));
    out.push('\n');
    out.push_str(&render_snapshot(&step.snapshot));
    out
}

fn describe(action: &StepAction) -> String {
    match action {
        StepAction::Event(event) => describe_event(event),
        StepAction::Dispatched { id, query } => {
            format!("{} {} {:?}", "→ search".cyan(), id, query)
        }
        StepAction::Responded {
            id,
            hits,
            disposition,
        } => {
            let verdict = match disposition {
                ResponseDisposition::Applied => "applied".green(),
                ResponseDisposition::Stale => "stale, dropped".yellow(),
                ResponseDisposition::ModeMismatch => "wrong mode, dropped".yellow(),
                ResponseDisposition::SessionClosed => "after close, dropped".dimmed(),
            };
            format!("{} {id} ({hits} hits) {verdict}", "← results".cyan())
        }
    }
}

fn describe_event(event: &ScriptEvent) -> String {
    match event {
        ScriptEvent::Query { text } => format!("type {text:?}"),
        ScriptEvent::Mode { mode } => format!("tab {mode}"),
        ScriptEvent::Follow { user_id } => format!("follow tap {user_id}"),
        ScriptEvent::Ack {
            user_id,
            desired,
            ok,
        } => {
            let status = if *ok { "ok".green() } else { "failed".red() };
            format!("backend ack {user_id} → {desired} {status}")
        }
        ScriptEvent::Select { id } => format!("row tap {id}"),
        ScriptEvent::Filters => "filters tap".to_string(),
        ScriptEvent::Close => "back".to_string(),
    }
}

fn render_snapshot(snapshot: &Snapshot) -> String {
    if !snapshot.open {
        return format!("          {}", "[closed]".dimmed());
    }

    let mut out = format!(
        "          [{}] query={:?}",
        snapshot.mode.to_string().bold(),
        snapshot.query
    );
    if let Some(text) = snapshot.empty_text {
        let _ = write!(out, "\n            {}", text.dimmed());
    }
    for row in &snapshot.rows {
        let _ = write!(out, "\n            • {row}");
    }
    out
}

/// Closing summary: dispatches, follow calls and host callbacks
#[must_use]
pub fn render_summary(report: &ReplayReport) -> String {
    let mut out = format!(
        "{} {} request(s) dispatched",
        "✓".green(),
        report.dispatch_count()
    );
    for (user_id, desired) in &report.follow_calls {
        let _ = write!(out, "\n  follow backend: {user_id} → {desired}");
    }
    for event in &report.overlay_events {
        let _ = write!(out, "\n  overlay: {event:?}");
    }
    out
}
