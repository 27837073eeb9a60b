//! Optimistic follow state
//!
//! The reconciler overlays local, not-yet-confirmed follow changes on top of
//! the follow state reported by the external source. A toggle is reflected
//! immediately; the backend is told about it in the same call.
//!
//! Overrides carry an acknowledgment status. By default a failed
//! acknowledgment leaves the toggled state in place; reverting is opt-in.
//! A corrective default pushed by the backend collaborator is stored as a
//! confirmed override, so the override map is the only state consulted and
//! the most recent of a toggle or a correction wins.

use super::traits::FollowBackend;
use crate::models::UserResult;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Acknowledgment state of an override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatus {
    /// Sent to the backend, no answer yet
    Pending,
    /// Backend accepted the change
    Confirmed,
    /// Backend rejected the change
    Failed,
}

/// What the backend reported for a follow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    Confirmed,
    Failed,
}

impl From<bool> for AckOutcome {
    fn from(ok: bool) -> Self {
        if ok { Self::Confirmed } else { Self::Failed }
    }
}

/// A locally applied follow state for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowOverride {
    pub following: bool,
    pub status: FollowStatus,
}

pub struct FollowStateReconciler {
    overrides: HashMap<String, FollowOverride>,
    revert_failed: bool,
    backend: Box<dyn FollowBackend>,
}

impl FollowStateReconciler {
    #[must_use]
    pub fn new(backend: Box<dyn FollowBackend>) -> Self {
        Self {
            overrides: HashMap::new(),
            revert_failed: false,
            backend,
        }
    }

    /// Flip the override back when the backend reports a failure
    #[must_use]
    pub const fn with_revert_on_failure(mut self, revert: bool) -> Self {
        self.revert_failed = revert;
        self
    }

    /// The follow state to render for `user`
    ///
    /// The override for `user.id` if one exists, else `user.default_following`.
    #[must_use]
    pub fn effective_state(&self, user: &UserResult) -> bool {
        self.overrides
            .get(&user.id)
            .map_or(user.default_following, |o| o.following)
    }

    /// Flip `current_effective` for `user_id`
    ///
    /// The override is written before the backend is notified. Each call is
    /// independent: passing a stale `current_effective` twice flips twice.
    /// Returns the new state.
    pub fn toggle(&mut self, user_id: &str, current_effective: bool) -> bool {
        let desired = !current_effective;
        self.overrides.insert(
            user_id.to_string(),
            FollowOverride {
                following: desired,
                status: FollowStatus::Pending,
            },
        );
        debug!(user_id, desired, "follow toggled");

        self.backend.set_following(user_id, desired);
        desired
    }

    /// Toggle using the effective state computed right now
    pub fn toggle_user(&mut self, user: &UserResult) -> bool {
        let current = self.effective_state(user);
        self.toggle(&user.id, current)
    }

    /// Record the backend's answer for a follow request
    ///
    /// Ignored unless `desired` matches the pending override, so answers for
    /// superseded toggles do nothing. Returns whether the answer was applied.
    pub fn acknowledge(&mut self, user_id: &str, desired: bool, outcome: AckOutcome) -> bool {
        let Some(entry) = self.overrides.get_mut(user_id) else {
            debug!(user_id, "acknowledgment without override ignored");
            return false;
        };
        if entry.following != desired || entry.status != FollowStatus::Pending {
            debug!(user_id, desired, "acknowledgment for superseded toggle ignored");
            return false;
        }

        match outcome {
            AckOutcome::Confirmed => entry.status = FollowStatus::Confirmed,
            AckOutcome::Failed => {
                warn!(user_id, desired, revert = self.revert_failed, "follow request failed");
                entry.status = FollowStatus::Failed;
                if self.revert_failed {
                    entry.following = !desired;
                }
            }
        }
        true
    }

    /// Accept a corrective follow state from the backend collaborator
    ///
    /// Replaces any override for `user_id` with a confirmed one. A later
    /// toggle replaces it in turn; acks for toggles it superseded are ignored.
    pub fn push_default(&mut self, user_id: &str, following: bool) {
        debug!(user_id, following, "corrective follow state applied");
        self.overrides.insert(
            user_id.to_string(),
            FollowOverride {
                following,
                status: FollowStatus::Confirmed,
            },
        );
    }

    #[must_use]
    pub fn override_for(&self, user_id: &str) -> Option<&FollowOverride> {
        self.overrides.get(user_id)
    }

    /// Number of toggles still awaiting an answer
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.overrides
            .values()
            .filter(|o| o.status == FollowStatus::Pending)
            .count()
    }
}
