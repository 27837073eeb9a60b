//! Search provider abstraction
//!
//! The provider is the only component that talks to the network. The core
//! hands it a request and moves on; the host delivers the answer back through
//! [`SearchSession::receive_results`](crate::session::SearchSession::receive_results)
//! whenever it arrives.

use super::request::SearchRequest;

/// Trait for search backends
///
/// Implementations may answer in any order, answer late, or never answer.
/// Answers must carry the [`RequestId`](super::RequestId) of the request they
/// answer.
pub trait SearchProvider {
    /// Start a search for `request.query` in `request.mode`
    fn search(&mut self, request: &SearchRequest);
}
