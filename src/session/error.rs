//! Session construction errors
//!
//! Once open, a session never fails on its own account: events that arrive
//! in the wrong state are discarded and reported through return values.
//! The only fallible step is assembling one.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A required collaborator was not supplied to the builder
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

pub type Result<T> = std::result::Result<T, SessionError>;
