use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One increment from the streaming speech-to-text feed.
///
/// Non-final events revise the current partial segment in place; a final
/// event freezes it into a segment that will not change again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptEvent {
    pub fn partial(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// A finalized portion of transcribed speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Transcribed text
    pub text: String,

    /// When this segment was finalized
    pub timestamp: DateTime<Utc>,
}

/// Assembles streaming recognition events into the visible transcript.
///
/// The visible text at any instant is the concatenation of all finalized
/// segments plus the latest partial segment.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    finalized: Vec<TranscriptSegment>,
    partial: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: TranscriptEvent) {
        if event.is_final {
            self.finalized.push(TranscriptSegment {
                text: event.text,
                timestamp: Utc::now(),
            });
            self.partial.clear();
        } else {
            self.partial = event.text;
        }
    }

    /// The externally visible transcript: finalized segments in order,
    /// then the in-flight partial, separated by single spaces.
    pub fn text(&self) -> String {
        let mut parts: Vec<&str> = self.finalized.iter().map(|s| s.text.as_str()).collect();
        if !self.partial.is_empty() {
            parts.push(&self.partial);
        }
        parts.join(" ")
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.finalized
    }

    pub fn is_empty(&self) -> bool {
        self.finalized.is_empty() && self.partial.is_empty()
    }

    pub fn clear(&mut self) {
        self.finalized.clear();
        self.partial.clear();
    }
}
