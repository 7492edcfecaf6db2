//! Interview session management
//!
//! This module provides the `SessionController` state machine that owns a
//! session's lifecycle:
//! - Question selection at startup
//! - Narration / capture sequencing (mutually exclusive by invariant)
//! - Per-answer scoring and answer collection
//! - Countdown enforcement in timed mode
//! - Final aggregation into an `InterviewResult`

mod config;
mod controller;
mod events;
mod report;

pub use config::{InterviewConfig, Mode};
pub use controller::{SessionController, SessionHandle};
pub use events::{Phase, SessionEvent, SessionSnapshot};
pub use report::{Answer, InterviewResult};
