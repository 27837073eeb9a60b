//! Follow backend abstraction

/// Persists follow-relationship changes
///
/// Calls are fire-and-forget from the core's perspective. Implementations
/// report the outcome later through
/// [`SearchSession::follow_acknowledged`](crate::session::SearchSession::follow_acknowledged),
/// or not at all.
pub trait FollowBackend {
    /// Request that the current user follows (`true`) or unfollows (`false`)
    /// `user_id`
    fn set_following(&mut self, user_id: &str, desired: bool);
}
