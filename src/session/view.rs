//! What the overlay currently shows

use crate::models::{SearchMode, SpotResult, UserResult};

pub const NO_RECENT_SEARCHES: &str = "No recent searches";
pub const NO_SPOTS_FOUND: &str = "No spots found";
pub const NO_RECENT_USERS: &str = "No recent users";
pub const NO_USERS_FOUND: &str = "No users found";

/// Text shown in place of an empty list
#[must_use]
pub const fn empty_state_text(mode: SearchMode, has_query: bool) -> &'static str {
    match (mode, has_query) {
        (SearchMode::Spots, false) => NO_RECENT_SEARCHES,
        (SearchMode::Spots, true) => NO_SPOTS_FOUND,
        (SearchMode::Users, false) => NO_RECENT_USERS,
        (SearchMode::Users, true) => NO_USERS_FOUND,
    }
}

/// Which family of results is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    Recents,
    Searched,
}

/// A user row with its effective follow state resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow<'a> {
    pub user: &'a UserResult,
    pub following: bool,
}

/// The rendered result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayedList<'a> {
    Spots(&'a [SpotResult]),
    Users(Vec<UserRow<'a>>),
}

impl DisplayedList<'_> {
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
            Self::Users(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display names in order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Spots(spots) => spots.iter().map(|s| s.name.as_str()).collect(),
            Self::Users(rows) => rows.iter().map(|r| r.user.name.as_str()).collect(),
        }
    }
}
