//! Replay script format
//!
//! A script is a JSON document describing what the overlay opens with, what
//! the canned provider knows, how slow it answers, and a timeline of user and
//! backend events:
//!
//! ```json
//! {
//!   "recent_spots": [{"id": "a", "name": "Cafe X"}],
//!   "initial_mode": "spots",
//!   "catalog": {"spots": [{"id": "s1", "name": "Sushi Go"}]},
//!   "latency_ms": {"spots": 120, "users": 40},
//!   "events": [
//!     {"at_ms": 0,   "type": "query", "text": "s"},
//!     {"at_ms": 50,  "type": "query", "text": "sushi"},
//!     {"at_ms": 900, "type": "select", "id": "s1"}
//!   ]
//! }
//! ```

use crate::SpotsearchError;
use crate::models::{PerMode, ResultSet, SearchMode, SpotResult, UserResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub recent_spots: Vec<SpotResult>,
    #[serde(default)]
    pub recent_users: Vec<UserResult>,
    #[serde(default)]
    pub initial_mode: Option<SearchMode>,
    #[serde(default)]
    pub catalog: Catalog,
    /// Provider round-trip time per mode
    #[serde(default)]
    pub latency_ms: PerMode<u64>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl ReplayScript {
    /// Read a script from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `SpotsearchError::Io` if the file cannot be read and
    /// `SpotsearchError::Json` if it is not a valid script.
    pub fn load(path: &Path) -> Result<Self, SpotsearchError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parse a script from JSON text
    ///
    /// # Errors
    ///
    /// Returns `SpotsearchError::Json` if the text is not a valid script.
    pub fn parse(raw: &str) -> Result<Self, SpotsearchError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// One scripted event and when it happens, relative to overlay open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    /// The search field now contains `text`
    Query { text: String },
    /// Tab tap
    Mode { mode: SearchMode },
    /// Follow button on a user row
    Follow { user_id: String },
    /// Follow backend answers a request
    Ack {
        user_id: String,
        desired: bool,
        ok: bool,
    },
    /// Row tap
    Select { id: String },
    /// Filter control tap
    Filters,
    /// Back action
    Close,
}

/// Everything the canned provider can find
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub spots: Vec<SpotResult>,
    #[serde(default)]
    pub users: Vec<UserResult>,
}

impl Catalog {
    /// Case-insensitive substring match on names (and usernames for users)
    #[must_use]
    pub fn search(&self, query: &str, mode: SearchMode) -> ResultSet {
        let needle = query.trim().to_lowercase();
        match mode {
            SearchMode::Spots => ResultSet::Spots(
                self.spots
                    .iter()
                    .filter(|spot| spot.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect(),
            ),
            SearchMode::Users => ResultSet::Users(
                self.users
                    .iter()
                    .filter(|user| {
                        user.name.to_lowercase().contains(&needle)
                            || user.username.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect(),
            ),
        }
    }
}
