//! Spotsearch - search overlay core for a places/people discovery app
//!
//! This library implements the interaction state machine behind a search
//! overlay with two tabs, spots and users: debounced query dispatch to an
//! external provider, recents-versus-results list selection, and optimistic
//! follow toggles reconciled against backend acknowledgments.
//!
//! Rendering, networking and navigation stay with the host; the core talks to
//! them through the traits in [`search`], [`follow`] and [`session`].

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod follow;
pub mod models;
pub mod replay;
pub mod search;
pub mod session;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SpotsearchError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Session could not be assembled
    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Replay script could not be parsed
    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),
}
