//! Search requests and responses exchanged with the provider

use crate::models::{PerMode, ResultSet, SearchMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one dispatched request
///
/// `seq` increases monotonically per mode, so the latest request for a mode
/// is the one with the highest sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId {
    pub mode: SearchMode,
    pub seq: u64,
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.mode, self.seq)
    }
}

/// Payload handed to the search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub id: RequestId,
    /// Query text exactly as typed
    pub query: String,
    pub mode: SearchMode,
}

/// A provider answer, bound to the request it answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub id: RequestId,
    pub results: ResultSet,
}

impl SearchResponse {
    #[must_use]
    pub const fn new(id: RequestId, results: ResultSet) -> Self {
        Self { id, results }
    }
}

/// Per-mode sequence counter
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: PerMode<u64>,
}

impl RequestSequencer {
    /// Allocate the next id for `mode`. Sequence numbers start at 1.
    pub fn next(&mut self, mode: SearchMode) -> RequestId {
        let seq = self.latest.get_mut(mode);
        *seq += 1;
        RequestId { mode, seq: *seq }
    }

    /// Latest id issued for `mode`, if any
    #[must_use]
    pub fn latest(&self, mode: SearchMode) -> Option<RequestId> {
        match *self.latest.get(mode) {
            0 => None,
            seq => Some(RequestId { mode, seq }),
        }
    }

    #[must_use]
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest(id.mode) == Some(id)
    }
}
