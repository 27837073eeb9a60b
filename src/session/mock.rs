//! Recording collaborators for tests and the replay harness
//!
//! Each mock is a cheap handle over shared storage: clone it, box one copy
//! into the session and keep the other to inspect what the session did.
//! The core is single-threaded, so `Rc<RefCell<_>>` is enough.

use super::traits::OverlayCallbacks;
use crate::follow::FollowBackend;
use crate::search::{SearchProvider, SearchRequest};
use std::cell::RefCell;
use std::rc::Rc;

/// Search provider that records every request and never answers
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    requests: Rc<RefCell<Vec<SearchRequest>>>,
}

impl RecordingProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.borrow().clone()
    }

    /// Remove and return the recorded requests
    pub fn take(&self) -> Vec<SearchRequest> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }
}

impl SearchProvider for RecordingProvider {
    fn search(&mut self, request: &SearchRequest) {
        self.requests.borrow_mut().push(request.clone());
    }
}

/// Follow backend that records `(user_id, desired)` pairs
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Rc<RefCell<Vec<(String, bool)>>>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.borrow().clone()
    }
}

impl FollowBackend for RecordingBackend {
    fn set_following(&mut self, user_id: &str, desired: bool) {
        self.calls.borrow_mut().push((user_id.to_string(), desired));
    }
}

/// Something the overlay reported to its host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    Selected(String),
    Closed,
    FiltersClicked,
}

/// Overlay callbacks that record events in order
#[derive(Debug, Clone, Default)]
pub struct RecordingCallbacks {
    events: Rc<RefCell<Vec<OverlayEvent>>>,
}

impl RecordingCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<OverlayEvent> {
        self.events.borrow().clone()
    }
}

impl OverlayCallbacks for RecordingCallbacks {
    fn on_select(&mut self, spot_name: &str) {
        self.events
            .borrow_mut()
            .push(OverlayEvent::Selected(spot_name.to_string()));
    }

    fn on_close(&mut self) {
        self.events.borrow_mut().push(OverlayEvent::Closed);
    }

    fn on_filters(&mut self) {
        self.events.borrow_mut().push(OverlayEvent::FiltersClicked);
    }
}
