//! Query-to-request dispatching
//!
//! `SearchDispatcher` turns keystrokes into at most one request per pause in
//! typing. It owns the raw query, the active mode and the debounce timer.
//!
//! ```text
//! on_query_change ─┐
//!                  ├─→ arm timer ──(quiet interval)──→ poll(now) → SearchRequest
//! on_mode_change ──┘        ↑                                  (query, mode at fire time)
//!                           └── any newer change restarts it
//! ```
//!
//! The dispatcher is fire-and-forget: it never learns whether a request
//! succeeded. It does remember the latest sequence number issued per mode so
//! the owner can reject responses that were superseded.

use super::debounce::Debouncer;
use super::request::{RequestId, RequestSequencer, SearchRequest};
use crate::models::SearchMode;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchDispatcher {
    query: String,
    mode: SearchMode,
    timer: Debouncer,
    sequencer: RequestSequencer,
}

impl SearchDispatcher {
    #[must_use]
    pub fn new(mode: SearchMode, quiet: Duration) -> Self {
        Self {
            query: String::new(),
            mode,
            timer: Debouncer::new(quiet),
            sequencer: RequestSequencer::default(),
        }
    }

    /// Current query, verbatim
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Whether the current query would produce a request
    #[must_use]
    pub fn has_searchable_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Record a keystroke and restart the quiet interval
    ///
    /// Blank text disarms the timer instead: a blank query never dispatches.
    pub fn on_query_change(&mut self, text: impl Into<String>, now: Instant) {
        self.query = text.into();
        self.restart(now);
    }

    /// Switch the active mode without dispatching directly
    ///
    /// With a non-blank query the timer restarts so the new mode's results
    /// arrive through the debounce path. Switching to the mode that is
    /// already active changes nothing.
    pub fn on_mode_change(&mut self, mode: SearchMode, now: Instant) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.restart(now);
    }

    /// Fire the pending request if its quiet interval has elapsed
    ///
    /// The payload is built from the query and mode current at fire time.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        if !self.timer.fire_if_due(now) || !self.has_searchable_query() {
            return None;
        }

        let id = self.sequencer.next(self.mode);
        Some(SearchRequest {
            id,
            query: self.query.clone(),
            mode: self.mode,
        })
    }

    /// Invalidate any pending timer
    pub const fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// When the pending request is due, if one is pending
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Whether `id` is the most recent request issued for its mode
    #[must_use]
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.sequencer.is_latest(id)
    }

    fn restart(&mut self, now: Instant) {
        if self.has_searchable_query() {
            self.timer.arm(now);
        } else {
            self.timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::debounce::DEFAULT_QUIET_INTERVAL;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn dispatcher() -> SearchDispatcher {
        SearchDispatcher::new(SearchMode::Spots, DEFAULT_QUIET_INTERVAL)
    }

    /// Poll every 10ms from `from` to `to` inclusive, collecting requests
    fn drain(d: &mut SearchDispatcher, from: Instant, to: Instant) -> Vec<(Instant, SearchRequest)> {
        let mut out = Vec::new();
        let mut now = from;
        while now <= to {
            if let Some(req) = d.poll(now) {
                out.push((now, req));
            }
            now += ms(10);
        }
        out
    }

    #[test]
    fn test_rapid_keystrokes_dispatch_once_with_final_text() {
        let t0 = Instant::now();
        let mut d = dispatcher();

        d.on_query_change("s", t0);
        assert!(d.poll(t0 + ms(50)).is_none());
        d.on_query_change("su", t0 + ms(50));
        assert!(d.poll(t0 + ms(100)).is_none());
        d.on_query_change("sushi", t0 + ms(100));

        let fired = drain(&mut d, t0 + ms(100), t0 + ms(1_000));
        assert_eq!(fired.len(), 1);

        let (at, req) = &fired[0];
        assert_eq!(*at, t0 + ms(400));
        assert_eq!(req.query, "sushi");
        assert_eq!(req.mode, SearchMode::Spots);
    }

    #[test]
    fn test_blank_queries_never_dispatch() {
        let t0 = Instant::now();
        for text in ["", " ", "\t  \n"] {
            let mut d = dispatcher();
            d.on_query_change(text, t0);
            assert!(d.deadline().is_none());
            assert!(drain(&mut d, t0, t0 + ms(1_000)).is_empty());
        }
    }

    #[test]
    fn test_query_is_stored_verbatim() {
        let mut d = dispatcher();
        d.on_query_change("  ramen ", Instant::now());
        assert_eq!(d.query(), "  ramen ");

        let req = d.poll(Instant::now() + ms(300)).unwrap();
        assert_eq!(req.query, "  ramen ");
    }

    #[test]
    fn test_clearing_query_cancels_pending_dispatch() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_query_change("pho", t0);
        d.on_query_change("", t0 + ms(100));

        assert!(drain(&mut d, t0, t0 + ms(1_000)).is_empty());
    }

    #[test]
    fn test_mode_at_fire_time_is_used() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_query_change("ana", t0);
        d.on_mode_change(SearchMode::Users, t0 + ms(100));

        let fired = drain(&mut d, t0, t0 + ms(1_000));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1.mode, SearchMode::Users);
        assert_eq!(fired[0].1.id.mode, SearchMode::Users);
        assert_eq!(fired[0].0, t0 + ms(400));
    }

    #[test]
    fn test_mode_change_with_empty_query_does_not_arm() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_mode_change(SearchMode::Users, t0);

        assert!(d.deadline().is_none());
        assert_eq!(d.mode(), SearchMode::Users);
        assert!(drain(&mut d, t0, t0 + ms(1_000)).is_empty());
    }

    #[test]
    fn test_mode_change_never_touches_query() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_query_change("tacos", t0);
        d.on_mode_change(SearchMode::Users, t0);
        d.on_mode_change(SearchMode::Spots, t0);
        assert_eq!(d.query(), "tacos");
    }

    #[test]
    fn test_reselecting_active_mode_keeps_deadline() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_query_change("tea", t0);
        d.on_mode_change(SearchMode::Spots, t0 + ms(200));
        assert_eq!(d.deadline(), Some(t0 + ms(300)));
    }

    #[test]
    fn test_cancel_prevents_dispatch() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_query_change("bagels", t0);
        d.cancel();
        assert!(drain(&mut d, t0, t0 + ms(1_000)).is_empty());
    }

    #[test]
    fn test_each_pause_produces_one_request() {
        let t0 = Instant::now();
        let mut d = dispatcher();
        d.on_query_change("piz", t0);
        let first = d.poll(t0 + ms(300)).unwrap();
        d.on_query_change("pizza", t0 + ms(500));
        let second = d.poll(t0 + ms(800)).unwrap();

        assert_eq!(first.id.seq, 1);
        assert_eq!(second.id.seq, 2);
        assert!(!d.is_latest(first.id));
        assert!(d.is_latest(second.id));
    }
}
