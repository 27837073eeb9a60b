//! Follow-state reconciliation for user rows

pub mod reconciler;
pub mod traits;

pub use reconciler::{AckOutcome, FollowOverride, FollowStateReconciler, FollowStatus};
pub use traits::FollowBackend;
