//! Scripted replay harness
//!
//! Drives a real [`SearchSession`](crate::session::SearchSession) through a
//! timeline of keystrokes, tab taps, follow taps and backend answers on a
//! virtual clock, against a canned catalog provider with per-mode latency.
//! Useful for reproducing ordering problems (late responses, taps during a
//! pending search) without a network.

pub mod render;
pub mod runner;
pub mod script;

pub use render::{render_step, render_summary};
pub use runner::{ReplayReport, ReplayStep, Snapshot, StepAction, run};
pub use script::{Catalog, ReplayScript, ScriptEvent, TimedEvent};
