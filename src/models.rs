//! Data models for the search overlay
//!
//! These are pure data structures with minimal logic. Results are immutable
//! once received from a provider or a recents source; identity is the `id`
//! field. Direct field access is used for comparisons (idiomatic Rust style).

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Search Mode
// ============================================================================

/// Which search domain is active in the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Places
    #[default]
    Spots,
    /// People
    Users,
}

impl SearchMode {
    /// Lowercase label used in logs and scripts
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spots => "spots",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pair of values, one per search mode
///
/// Used wherever state is split by mode: recents, searched results and
/// request sequence numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerMode<T> {
    #[serde(default)]
    pub spots: T,
    #[serde(default)]
    pub users: T,
}

impl<T> PerMode<T> {
    #[must_use]
    pub const fn new(spots: T, users: T) -> Self {
        Self { spots, users }
    }

    #[must_use]
    pub const fn get(&self, mode: SearchMode) -> &T {
        match mode {
            SearchMode::Spots => &self.spots,
            SearchMode::Users => &self.users,
        }
    }

    pub const fn get_mut(&mut self, mode: SearchMode) -> &mut T {
        match mode {
            SearchMode::Spots => &mut self.spots,
            SearchMode::Users => &mut self.users,
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Where a spot row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotKind {
    /// Previously searched or visited
    #[default]
    Recent,
    /// Bookmarked by the user
    Saved,
}

/// A place returned by the provider or the recents source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub kind: SpotKind,
}

impl SpotResult {
    /// Create a spot with only the required fields set
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            icon: None,
            status: None,
            kind: SpotKind::Recent,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: SpotKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A person returned by the provider or the recents source
///
/// `default_following` is the follow state as last reported by the external
/// source, never a local override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResult {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub avatar_ref: String,
    #[serde(default)]
    pub default_following: bool,
    #[serde(default)]
    pub mutual_friends: Option<u32>,
}

impl UserResult {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            avatar_ref: String::new(),
            default_following: false,
            mutual_friends: None,
        }
    }

    #[must_use]
    pub const fn following(mut self, following: bool) -> Self {
        self.default_following = following;
        self
    }

    #[must_use]
    pub const fn with_mutual_friends(mut self, count: u32) -> Self {
        self.mutual_friends = Some(count);
        self
    }
}

/// A provider result set, tagged with the mode it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "items", rename_all = "lowercase")]
pub enum ResultSet {
    Spots(Vec<SpotResult>),
    Users(Vec<UserResult>),
}

impl ResultSet {
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        match self {
            Self::Spots(_) => SearchMode::Spots,
            Self::Users(_) => SearchMode::Users,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Spots(spots) => spots.len(),
            Self::Users(users) => users.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
