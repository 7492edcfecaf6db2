//! Error types for viva-coach
//!
//! Every variant here is recoverable: the session degrades locally and
//! still terminates in `Completed`. `anyhow` wraps these at the binary
//! boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VivaError {
    #[error("invalid interview configuration: {0}")]
    ConfigInvalid(String),

    #[error("speech capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("narration unavailable: {0}")]
    NarrationUnavailable(String),

    #[error("capture cancelled; in-flight transcript discarded")]
    Cancelled,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, VivaError>;
