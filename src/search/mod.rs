//! Debounced search dispatch
//!
//! Converts keystrokes into provider requests:
//! 1. `debounce`: the quiet-interval timer
//! 2. `request`: request ids, payloads and responses
//! 3. `dispatcher`: owns query, mode and timer; emits requests
//! 4. `traits`: the provider seam

pub mod debounce;
pub mod dispatcher;
pub mod request;
pub mod traits;

pub use debounce::{DEFAULT_QUIET_INTERVAL, Debouncer};
pub use dispatcher::SearchDispatcher;
pub use request::{RequestId, RequestSequencer, SearchRequest, SearchResponse};
pub use traits::SearchProvider;
