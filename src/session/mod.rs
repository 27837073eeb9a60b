//! Search overlay session
//!
//! Composes the debounced dispatcher and the follow reconciler behind a
//! single owner whose lifetime matches the overlay's.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              SearchSession              │
//! │  mode · query · recents · results       │
//! ├────────────────────┬────────────────────┤
//! │  SearchDispatcher  │ FollowStateRecon.  │
//! └─────────┬──────────┴─────────┬──────────┘
//!           ▼                    ▼
//!    SearchProvider         FollowBackend        OverlayCallbacks
//!    (host supplied)        (host supplied)      (host supplied)
//! ```
//!
//! The session never blocks and never reads the clock; the host passes
//! `Instant`s in and feeds provider and backend answers back.

pub mod error;
pub mod mock;
pub mod overlay;
pub mod traits;
pub mod view;

pub use error::SessionError;
pub use overlay::{ResponseDisposition, SearchSession, SearchSessionBuilder, SessionState};
pub use traits::OverlayCallbacks;
pub use view::{DisplayedList, ListSource, UserRow, empty_state_text};
