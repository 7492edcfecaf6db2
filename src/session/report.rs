use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::InterviewConfig;
use crate::audio::AudioArtifact;
use crate::question::Question;

/// One scored answer. Created exactly once per answered question, never
/// mutated afterwards, appended in encounter order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Id of the question this answers
    pub question_id: String,

    /// Final transcript as returned by the capture channel
    pub transcript: String,

    /// Raw audio captured alongside the answer, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioArtifact>,

    /// Recording length in whole seconds
    pub duration_secs: u64,

    pub confidence: f64,
    pub keyword_score: f64,
    pub fluency_score: f64,

    /// When the answer was scored
    pub timestamp: DateTime<Utc>,
}

impl Answer {
    /// Mean of the three per-answer scores
    pub fn composite_score(&self) -> f64 {
        (self.confidence + self.keyword_score + self.fluency_score) / 3.0
    }
}

/// The immutable outcome of one session, created once at completion and
/// handed to presentation/export collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewResult {
    pub config: InterviewConfig,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,

    /// Mean composite score across answers, in [0, 1]
    pub overall_score: f64,

    /// Composite scores accumulated (summed) per category
    pub category_scores: BTreeMap<String, f64>,

    pub strengths: Vec<String>,
    pub improvements: Vec<String>,

    /// Wall-clock session length in seconds
    pub duration_secs: u64,

    pub completed_at: DateTime<Utc>,
}
