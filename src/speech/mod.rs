//! Speech channels
//!
//! This module provides the two asynchronous channels of a session:
//! - `NarrationChannel` plays question text aloud (single-flight,
//!   cancellable)
//! - `CaptureChannel` runs streaming speech-to-text and raw audio
//!   accumulation concurrently and hands back a transcript on stop
//!
//! Both sit behind capability traits so the controller and tests run
//! against deterministic simulated backends instead of real speech
//! hardware.

mod capture;
mod narration;
mod simulated;
mod transcript;

pub use capture::{CaptureChannel, CaptureResult, SpeechCapture};
pub use narration::{NarrationChannel, NarrationSignal, SpeechSynthesizer};
pub use simulated::{MutedSynthesizer, ScriptedCapture, SimulatedSynthesizer, UnavailableCapture};
pub use transcript::{TranscriptBuffer, TranscriptEvent, TranscriptSegment};
