//! Search overlay session
//!
//! `SearchSession` binds the dispatcher and the follow reconciler to the
//! visible result list. It lives exactly as long as the overlay is open.
//!
//! # State machine
//!
//! ```text
//! Closed ──open()──→ Open(mode, query="")
//!                      │  ↺ set_query / set_mode / tick / receive_results / tap_follow
//!                      ├─ close()        ──→ Closed
//!                      └─ select_spot()  ──→ Closed
//! ```
//!
//! # Event flow
//!
//! ```text
//! keystroke → set_query(now) → dispatcher arms timer
//! host loop → tick(now) → SearchProvider::search(request)      (fire-and-forget)
//! provider  → receive_results(response) → applied if latest for response's mode
//! follow tap → tap_follow(id) → override written → FollowBackend::set_following
//! ```
//!
//! After close every event is discarded, including responses that were in
//! flight when the overlay closed.

use super::error::{Result, SessionError};
use super::traits::OverlayCallbacks;
use super::view::{self, DisplayedList, ListSource, UserRow};
use crate::config::SpotsearchConfig;
use crate::follow::{AckOutcome, FollowBackend, FollowStateReconciler};
use crate::models::{ResultSet, SearchMode, SpotResult, UserResult};
use crate::search::{RequestId, SearchDispatcher, SearchProvider, SearchResponse};
use std::time::Instant;
use tracing::{debug, info};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// What happened to a provider response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// Stored as the searched results for its mode
    Applied,
    /// A newer request for the same mode was issued; dropped
    Stale,
    /// The result set does not match the mode it was requested for; dropped
    ModeMismatch,
    /// Arrived after the overlay closed; dropped
    SessionClosed,
}

/// Search overlay session - owns all interaction state while open
pub struct SearchSession {
    state: SessionState,
    dispatcher: SearchDispatcher,
    follows: FollowStateReconciler,
    recent_spots: Vec<SpotResult>,
    recent_users: Vec<UserResult>,
    found_spots: Vec<SpotResult>,
    found_users: Vec<UserResult>,
    provider: Box<dyn SearchProvider>,
    callbacks: Box<dyn OverlayCallbacks>,
}

impl SearchSession {
    /// Create a new builder for opening a `SearchSession`
    #[must_use]
    pub fn builder() -> SearchSessionBuilder {
        SearchSessionBuilder::new()
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.dispatcher.mode()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.dispatcher.query()
    }

    /// When the host should next call [`tick`](Self::tick)
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_open() {
            self.dispatcher.deadline()
        } else {
            None
        }
    }

    /// Keystroke in the search field
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        if !self.is_open() {
            debug!("query change after close ignored");
            return;
        }
        self.dispatcher.on_query_change(text, now);
    }

    /// Tab selection. The query is kept as is.
    pub fn set_mode(&mut self, mode: SearchMode, now: Instant) {
        if !self.is_open() {
            debug!("mode change after close ignored");
            return;
        }
        self.dispatcher.on_mode_change(mode, now);
    }

    /// Dispatch the pending search if its quiet interval has elapsed
    ///
    /// Returns the id of the request handed to the provider.
    pub fn tick(&mut self, now: Instant) -> Option<RequestId> {
        if !self.is_open() {
            return None;
        }

        let request = self.dispatcher.poll(now)?;
        debug!(id = %request.id, query = %request.query, "dispatching search");
        self.provider.search(&request);
        Some(request.id)
    }

    /// Accept a provider response
    ///
    /// The response is bound to the mode it was requested for, never to the
    /// mode active when it arrives, and only the latest request per mode is
    /// honored.
    pub fn receive_results(&mut self, response: SearchResponse) -> ResponseDisposition {
        let SearchResponse { id, results } = response;

        if !self.is_open() {
            debug!(%id, "response after close discarded");
            return ResponseDisposition::SessionClosed;
        }
        if results.mode() != id.mode {
            debug!(%id, got = %results.mode(), "response for wrong mode discarded");
            return ResponseDisposition::ModeMismatch;
        }
        if !self.dispatcher.is_latest(id) {
            debug!(%id, "stale response discarded");
            return ResponseDisposition::Stale;
        }

        debug!(%id, count = results.len(), "results applied");
        match results {
            ResultSet::Spots(spots) => self.found_spots = spots,
            ResultSet::Users(users) => self.found_users = users,
        }
        ResponseDisposition::Applied
    }

    /// Recents for an empty query, searched results otherwise
    #[must_use]
    pub fn list_source(&self) -> ListSource {
        if self.query().is_empty() {
            ListSource::Recents
        } else {
            ListSource::Searched
        }
    }

    /// The list to render for the current query and mode
    #[must_use]
    pub fn displayed(&self) -> DisplayedList<'_> {
        match self.mode() {
            SearchMode::Spots => DisplayedList::Spots(self.visible_spots()),
            SearchMode::Users => DisplayedList::Users(
                self.visible_users()
                    .iter()
                    .map(|user| UserRow {
                        user,
                        following: self.follows.effective_state(user),
                    })
                    .collect(),
            ),
        }
    }

    /// Placeholder text when the displayed list is empty
    #[must_use]
    pub fn empty_state_text(&self) -> Option<&'static str> {
        let empty = match self.mode() {
            SearchMode::Spots => self.visible_spots().is_empty(),
            SearchMode::Users => self.visible_users().is_empty(),
        };
        empty.then(|| view::empty_state_text(self.mode(), !self.query().is_empty()))
    }

    /// Effective follow state for any user, displayed or not
    #[must_use]
    pub fn effective_following(&self, user: &UserResult) -> bool {
        self.follows.effective_state(user)
    }

    /// Row tap. Selects in spots mode; user rows are not selectable.
    pub fn activate_row(&mut self, id: &str) -> bool {
        match self.mode() {
            SearchMode::Spots => self.select_spot(id),
            SearchMode::Users => false,
        }
    }

    /// Choose a displayed spot: report its name, then close
    ///
    /// Returns `false` when the spot is not on screen or the session is closed.
    pub fn select_spot(&mut self, id: &str) -> bool {
        if !self.is_open() || self.mode() != SearchMode::Spots {
            return false;
        }
        let Some(name) = self
            .visible_spots()
            .iter()
            .find(|spot| spot.id == id)
            .map(|spot| spot.name.clone())
        else {
            debug!(id, "selection of spot not on screen ignored");
            return false;
        };

        info!(id, "spot selected");
        self.callbacks.on_select(&name);
        self.close();
        true
    }

    /// Follow button on a displayed user row
    ///
    /// Flips the effective state immediately and notifies the backend.
    /// Never selects the row. Returns the new state, or `None` if the user
    /// is not on screen.
    pub fn tap_follow(&mut self, user_id: &str) -> Option<bool> {
        if !self.is_open() || self.mode() != SearchMode::Users {
            return None;
        }
        let user = self
            .visible_users()
            .iter()
            .find(|user| user.id == user_id)
            .cloned()?;

        Some(self.follows.toggle_user(&user))
    }

    /// Backend answer for an earlier follow toggle
    pub fn follow_acknowledged(&mut self, user_id: &str, desired: bool, outcome: AckOutcome) -> bool {
        if !self.is_open() {
            debug!(user_id, "follow acknowledgment after close discarded");
            return false;
        }
        self.follows.acknowledge(user_id, desired, outcome)
    }

    /// Corrective follow state pushed by the backend collaborator
    pub fn push_follow_default(&mut self, user_id: &str, following: bool) {
        if self.is_open() {
            self.follows.push_default(user_id, following);
        }
    }

    /// Optional filter control. Pass-through only.
    pub fn filters_clicked(&mut self) {
        if self.is_open() {
            self.callbacks.on_filters();
        }
    }

    /// Dismiss the overlay
    ///
    /// Invalidates the pending debounce timer. Responses still in flight are
    /// discarded when they arrive.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.dispatcher.cancel();
        self.state = SessionState::Closed;
        info!("search overlay closed");
        self.callbacks.on_close();
    }

    fn visible_spots(&self) -> &[SpotResult] {
        match self.list_source() {
            ListSource::Recents => &self.recent_spots,
            ListSource::Searched => &self.found_spots,
        }
    }

    fn visible_users(&self) -> &[UserResult] {
        match self.list_source() {
            ListSource::Recents => &self.recent_users,
            ListSource::Searched => &self.found_users,
        }
    }
}

/// Builder for `SearchSession`
///
/// ```
/// use spotsearch::models::{SearchMode, SpotResult};
/// use spotsearch::session::SearchSession;
/// use spotsearch::session::mock::{RecordingBackend, RecordingCallbacks, RecordingProvider};
///
/// let session = SearchSession::builder()
///     .provider(RecordingProvider::new())
///     .follow_backend(RecordingBackend::new())
///     .callbacks(RecordingCallbacks::new())
///     .recent_spots(vec![SpotResult::new("a", "Cafe X")])
///     .initial_mode(SearchMode::Spots)
///     .open()
///     .unwrap();
///
/// assert_eq!(session.displayed().names(), vec!["Cafe X"]);
/// ```
pub struct SearchSessionBuilder {
    config: SpotsearchConfig,
    initial_mode: Option<SearchMode>,
    recent_spots: Vec<SpotResult>,
    recent_users: Vec<UserResult>,
    provider: Option<Box<dyn SearchProvider>>,
    backend: Option<Box<dyn FollowBackend>>,
    callbacks: Option<Box<dyn OverlayCallbacks>>,
}

impl SearchSessionBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SpotsearchConfig::default(),
            initial_mode: None,
            recent_spots: Vec::new(),
            recent_users: Vec::new(),
            provider: None,
            backend: None,
            callbacks: None,
        }
    }

    /// Debounce, initial mode and revert policy
    #[must_use]
    pub fn config(mut self, config: SpotsearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the configured initial mode
    #[must_use]
    pub const fn initial_mode(mut self, mode: SearchMode) -> Self {
        self.initial_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn recent_spots(mut self, spots: Vec<SpotResult>) -> Self {
        self.recent_spots = spots;
        self
    }

    #[must_use]
    pub fn recent_users(mut self, users: Vec<UserResult>) -> Self {
        self.recent_users = users;
        self
    }

    /// Set the search provider (required)
    #[must_use]
    pub fn provider(mut self, provider: impl SearchProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Set the follow backend (required)
    #[must_use]
    pub fn follow_backend(mut self, backend: impl FollowBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Set the overlay callbacks (required)
    #[must_use]
    pub fn callbacks(mut self, callbacks: impl OverlayCallbacks + 'static) -> Self {
        self.callbacks = Some(Box::new(callbacks));
        self
    }

    /// Open the overlay
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingCollaborator` if the provider, the
    /// follow backend or the callbacks were not supplied.
    pub fn open(self) -> Result<SearchSession> {
        let provider = self
            .provider
            .ok_or(SessionError::MissingCollaborator("search provider"))?;
        let backend = self
            .backend
            .ok_or(SessionError::MissingCollaborator("follow backend"))?;
        let callbacks = self
            .callbacks
            .ok_or(SessionError::MissingCollaborator("overlay callbacks"))?;

        let mode = self.initial_mode.unwrap_or(self.config.initial_mode);
        info!(
            %mode,
            recent_spots = self.recent_spots.len(),
            recent_users = self.recent_users.len(),
            "search overlay opened"
        );

        Ok(SearchSession {
            state: SessionState::Open,
            dispatcher: SearchDispatcher::new(mode, self.config.quiet_interval()),
            follows: FollowStateReconciler::new(backend)
                .with_revert_on_failure(self.config.revert_failed_follows),
            recent_spots: self.recent_spots,
            recent_users: self.recent_users,
            found_spots: Vec::new(),
            found_users: Vec::new(),
            provider,
            callbacks,
        })
    }
}

impl Default for SearchSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
