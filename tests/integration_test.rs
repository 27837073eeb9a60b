//! Integration tests for spotsearch
//!
//! These tests drive complete overlay sessions through the public API and
//! through the replay harness, checking the end-to-end behavior a host sees.

use spotsearch::config::SpotsearchConfig;
use spotsearch::models::{ResultSet, SearchMode, SpotResult, UserResult};
use spotsearch::replay::{self, ReplayScript, StepAction};
use spotsearch::search::SearchResponse;
use spotsearch::session::mock::{OverlayEvent, RecordingBackend, RecordingCallbacks, RecordingProvider};
use spotsearch::session::{DisplayedList, ResponseDisposition, SearchSession};
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_recent_spot_tap_selects_and_closes() {
    let callbacks = RecordingCallbacks::new();
    let mut session = SearchSession::builder()
        .provider(RecordingProvider::new())
        .follow_backend(RecordingBackend::new())
        .callbacks(callbacks.clone())
        .recent_spots(vec![SpotResult::new("a", "Cafe X")])
        .open()
        .unwrap();

    assert_eq!(session.query(), "");
    assert_eq!(session.mode(), SearchMode::Spots);
    assert_eq!(session.displayed().names(), vec!["Cafe X"]);

    assert!(session.activate_row("a"));
    assert_eq!(
        callbacks.events(),
        vec![OverlayEvent::Selected("Cafe X".to_string()), OverlayEvent::Closed]
    );
    assert!(!session.is_open());
}

#[test]
fn test_users_tab_without_recents_shows_placeholder() {
    let session = SearchSession::builder()
        .provider(RecordingProvider::new())
        .follow_backend(RecordingBackend::new())
        .callbacks(RecordingCallbacks::new())
        .initial_mode(SearchMode::Users)
        .open()
        .unwrap();

    assert!(session.displayed().is_empty());
    assert_eq!(session.empty_state_text(), Some("No recent users"));
}

#[test]
fn test_follow_is_visible_before_backend_answers() {
    let backend = RecordingBackend::new();
    let mut session = SearchSession::builder()
        .provider(RecordingProvider::new())
        .follow_backend(backend.clone())
        .callbacks(RecordingCallbacks::new())
        .initial_mode(SearchMode::Users)
        .recent_users(vec![UserResult::new("u1", "Ana", "ana")])
        .open()
        .unwrap();

    session.tap_follow("u1");

    let DisplayedList::Users(rows) = session.displayed() else {
        panic!("expected user rows");
    };
    assert!(rows[0].following);
    assert_eq!(backend.calls(), vec![("u1".to_string(), true)]);
}

#[test]
fn test_full_search_round_trip_with_host_clock() {
    let provider = RecordingProvider::new();
    let mut session = SearchSession::builder()
        .provider(provider.clone())
        .follow_backend(RecordingBackend::new())
        .callbacks(RecordingCallbacks::new())
        .open()
        .unwrap();

    let t0 = Instant::now();
    for (i, text) in ["s", "su", "sushi"].into_iter().enumerate() {
        let at = t0 + ms(50 * i as u64);
        session.set_query(text, at);
        assert!(session.tick(at).is_none());
    }

    let deadline = session.next_deadline().unwrap();
    assert_eq!(deadline, t0 + ms(400));
    session.tick(deadline).unwrap();

    let requests = provider.take();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "sushi");

    let outcome = session.receive_results(SearchResponse::new(
        requests[0].id,
        ResultSet::Spots(vec![SpotResult::new("s1", "Sushi Go")]),
    ));
    assert_eq!(outcome, ResponseDisposition::Applied);
    assert_eq!(session.displayed().names(), vec!["Sushi Go"]);
}

const SCRIPT: &str = r#"{
    "recent_spots": [{"id": "a", "name": "Cafe X"}],
    "recent_users": [{"id": "u1", "name": "Ana", "username": "ana"}],
    "catalog": {
        "spots": [{"id": "s1", "name": "Sushi Go"}, {"id": "s2", "name": "Taco Town"}],
        "users": [{"id": "u2", "name": "Sushi Sam", "username": "sam", "default_following": true}]
    },
    "latency_ms": {"spots": 500, "users": 50},
    "events": [
        {"at_ms": 0,    "type": "query", "text": "s"},
        {"at_ms": 50,   "type": "query", "text": "su"},
        {"at_ms": 100,  "type": "query", "text": "sushi"},
        {"at_ms": 450,  "type": "mode",  "mode": "users"},
        {"at_ms": 1000, "type": "follow", "user_id": "u2"},
        {"at_ms": 1100, "type": "ack", "user_id": "u2", "desired": false, "ok": false},
        {"at_ms": 1200, "type": "mode",  "mode": "spots"},
        {"at_ms": 1300, "type": "select", "id": "s1"}
    ]
}"#;

#[test]
fn test_replay_binds_late_response_to_its_mode() {
    let script = ReplayScript::parse(SCRIPT).unwrap();
    let report = replay::run(&script, &SpotsearchConfig::default()).unwrap();

    // spots#1 at 400ms, users#1 at 750ms after the tab switch restarts the timer,
    // spots#2 at 1500ms is never sent because the overlay closed at 1300ms.
    assert_eq!(report.dispatch_count(), 2);

    let responses: Vec<_> = report
        .steps
        .iter()
        .filter_map(|step| match &step.action {
            StepAction::Responded { id, disposition, .. } => Some((step.at_ms, id.mode, *disposition)),
            _ => None,
        })
        .collect();
    assert_eq!(
        responses,
        vec![
            (800, SearchMode::Users, ResponseDisposition::Applied),
            (900, SearchMode::Spots, ResponseDisposition::Applied),
        ]
    );

    let after_follow = report
        .steps
        .iter()
        .find(|step| step.at_ms == 1000)
        .unwrap();
    assert_eq!(after_follow.snapshot.rows, vec!["Sushi Sam (@sam) [follow]"]);

    assert_eq!(report.follow_calls, vec![("u2".to_string(), false)]);
    assert_eq!(
        report.overlay_events,
        vec![OverlayEvent::Selected("Sushi Go".to_string()), OverlayEvent::Closed]
    );
}

#[test]
fn test_replay_discards_responses_after_close() {
    let script = ReplayScript::parse(
        r#"{
            "catalog": {"spots": [{"id": "s1", "name": "Late Bar"}]},
            "latency_ms": {"spots": 1000},
            "events": [
                {"at_ms": 0,   "type": "query", "text": "late"},
                {"at_ms": 500, "type": "close"}
            ]
        }"#,
    )
    .unwrap();
    let report = replay::run(&script, &SpotsearchConfig::default()).unwrap();

    let last = report.steps.last().unwrap();
    assert_eq!(last.at_ms, 1300);
    assert!(matches!(
        last.action,
        StepAction::Responded {
            disposition: ResponseDisposition::SessionClosed,
            ..
        }
    ));
    assert!(!last.snapshot.open);
    assert_eq!(report.overlay_events, vec![OverlayEvent::Closed]);
}
