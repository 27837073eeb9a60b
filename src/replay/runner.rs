//! Virtual-clock replay of a script through a live session
//!
//! The runner owns the clock. At every step it advances to the earliest of:
//! the session's debounce deadline, the next provider answer, or the next
//! scripted event. Ties resolve in that order, so a timer due at the same
//! instant as a keystroke fires first.

use super::script::{ReplayScript, ScriptEvent};
use crate::config::SpotsearchConfig;
use crate::follow::AckOutcome;
use crate::models::SearchMode;
use crate::search::{RequestId, SearchResponse};
use crate::session::mock::{OverlayEvent, RecordingBackend, RecordingCallbacks, RecordingProvider};
use crate::session::{DisplayedList, ResponseDisposition, SearchSession};
use crate::SpotsearchError;
use std::time::{Duration, Instant};
use tracing::debug;

/// Something that happened during replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// A scripted event was fed to the session
    Event(ScriptEvent),
    /// The debounce timer fired and a request went to the provider
    Dispatched { id: RequestId, query: String },
    /// The provider answered
    Responded {
        id: RequestId,
        hits: usize,
        disposition: ResponseDisposition,
    },
}

/// What the overlay showed right after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub open: bool,
    pub mode: SearchMode,
    pub query: String,
    pub rows: Vec<String>,
    pub empty_text: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub at_ms: u64,
    pub action: StepAction,
    pub snapshot: Snapshot,
}

/// Full transcript of a replay
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    /// `(user_id, desired)` pairs sent to the follow backend
    pub follow_calls: Vec<(String, bool)>,
    pub overlay_events: Vec<OverlayEvent>,
}

impl ReplayReport {
    /// Number of requests that reached the provider
    #[must_use]
    pub fn dispatch_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step.action, StepAction::Dispatched { .. }))
            .count()
    }
}

struct PendingResponse {
    due_ms: u64,
    response: SearchResponse,
}

enum Next {
    Deadline,
    Response,
    Event,
}

/// Run `script` against a fresh session configured by `config`
///
/// # Errors
///
/// Returns `SpotsearchError::Session` if the session cannot be opened.
pub fn run(script: &ReplayScript, config: &SpotsearchConfig) -> Result<ReplayReport, SpotsearchError> {
    let provider = RecordingProvider::new();
    let backend = RecordingBackend::new();
    let callbacks = RecordingCallbacks::new();

    let mut builder = SearchSession::builder()
        .config(config.clone())
        .recent_spots(script.recent_spots.clone())
        .recent_users(script.recent_users.clone())
        .provider(provider.clone())
        .follow_backend(backend.clone())
        .callbacks(callbacks.clone());
    if let Some(mode) = script.initial_mode {
        builder = builder.initial_mode(mode);
    }
    let mut session = builder.open()?;

    let mut events = script.events.clone();
    events.sort_by_key(|e| e.at_ms);
    let mut events = events.into_iter().peekable();

    let base = Instant::now();
    let mut pending: Vec<PendingResponse> = Vec::new();
    let mut steps = Vec::new();

    loop {
        let deadline_ms = session.next_deadline().map(|d| offset_ms(base, d));
        let response_ms = pending.iter().map(|p| p.due_ms).min();
        let event_ms = events.peek().map(|e| e.at_ms);

        let candidates = [
            (deadline_ms, Next::Deadline),
            (response_ms, Next::Response),
            (event_ms, Next::Event),
        ];
        let Some((now_ms, next)) = candidates
            .into_iter()
            .filter_map(|(at, kind)| at.map(|at| (at, kind)))
            .min_by_key(|(at, _)| *at)
        else {
            break;
        };
        let now = base + Duration::from_millis(now_ms);

        let action = match next {
            Next::Deadline => {
                let Some(id) = session.tick(now) else {
                    continue;
                };
                for request in provider.take() {
                    let due_ms = now_ms + script.latency_ms.get(request.mode);
                    let results = script.catalog.search(&request.query, request.mode);
                    pending.push(PendingResponse {
                        due_ms,
                        response: SearchResponse::new(request.id, results),
                    });
                }
                StepAction::Dispatched {
                    id,
                    query: session.query().to_string(),
                }
            }
            Next::Response => {
                let index = earliest(&pending);
                let PendingResponse { response, .. } = pending.remove(index);
                let id = response.id;
                let hits = response.results.len();
                let disposition = session.receive_results(response);
                StepAction::Responded {
                    id,
                    hits,
                    disposition,
                }
            }
            Next::Event => {
                let Some(timed) = events.next() else {
                    break;
                };
                apply_event(&mut session, &timed.event, now);
                StepAction::Event(timed.event)
            }
        };

        debug!(at_ms = now_ms, ?action, "replay step");
        steps.push(ReplayStep {
            at_ms: now_ms,
            action,
            snapshot: snapshot(&session),
        });
    }

    Ok(ReplayReport {
        steps,
        follow_calls: backend.calls(),
        overlay_events: callbacks.events(),
    })
}

fn apply_event(session: &mut SearchSession, event: &ScriptEvent, now: Instant) {
    match event {
        ScriptEvent::Query { text } => session.set_query(text.as_str(), now),
        ScriptEvent::Mode { mode } => session.set_mode(*mode, now),
        ScriptEvent::Follow { user_id } => {
            session.tap_follow(user_id);
        }
        ScriptEvent::Ack {
            user_id,
            desired,
            ok,
        } => {
            session.follow_acknowledged(user_id, *desired, AckOutcome::from(*ok));
        }
        ScriptEvent::Select { id } => {
            session.activate_row(id);
        }
        ScriptEvent::Filters => session.filters_clicked(),
        ScriptEvent::Close => session.close(),
    }
}

fn snapshot(session: &SearchSession) -> Snapshot {
    let rows = match session.displayed() {
        DisplayedList::Spots(spots) => spots.iter().map(|s| s.name.clone()).collect(),
        DisplayedList::Users(rows) => rows
            .iter()
            .map(|row| {
                let marker = if row.following { "following" } else { "follow" };
                format!("{} (@{}) [{marker}]", row.user.name, row.user.username)
            })
            .collect(),
    };

    Snapshot {
        open: session.is_open(),
        mode: session.mode(),
        query: session.query().to_string(),
        rows,
        empty_text: session.empty_state_text(),
    }
}

fn earliest(pending: &[PendingResponse]) -> usize {
    pending
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.due_ms)
        .map_or(0, |(index, _)| index)
}

fn offset_ms(base: Instant, at: Instant) -> u64 {
    u64::try_from(at.saturating_duration_since(base).as_millis()).unwrap_or(u64::MAX)
}

