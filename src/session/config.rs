use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::VivaError;
use crate::question::Difficulty;

/// Practice runs free-form; timed runs against a global countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Practice,
    Timed,
}

impl FromStr for Mode {
    type Err = VivaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "practice" => Ok(Mode::Practice),
            "timed" => Ok(Mode::Timed),
            other => Err(VivaError::ConfigInvalid(format!("unknown mode: {other}"))),
        }
    }
}

/// Setup-layer input describing one interview session. Immutable once the
/// session starts (the controller takes ownership).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Interview domain. Kept as the raw setup-layer string; the question
    /// catalog parses it and degrades to an empty pool when unknown.
    pub domain: String,

    pub mode: Mode,

    /// Session length in minutes, timed mode only
    pub duration_minutes: Option<u32>,

    /// How many questions to draw (capped by the pool size)
    pub question_count: u32,

    pub difficulty: Difficulty,

    /// Opaque resume handle from the setup layer; never read by the core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl InterviewConfig {
    /// Global countdown in seconds, when one applies.
    pub fn countdown_secs(&self) -> Option<u64> {
        match self.mode {
            Mode::Timed => self.duration_minutes.map(|m| u64::from(m) * 60),
            Mode::Practice => None,
        }
    }

    pub fn validate(&self) -> Result<(), VivaError> {
        if self.question_count == 0 {
            return Err(VivaError::ConfigInvalid(
                "question count must be positive".to_string(),
            ));
        }
        if self.mode == Mode::Timed && self.duration_minutes.is_none() {
            return Err(VivaError::ConfigInvalid(
                "timed mode requires a duration".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_applies_only_in_timed_mode() {
        let mut config = InterviewConfig {
            domain: "behavioral".to_string(),
            mode: Mode::Timed,
            duration_minutes: Some(15),
            question_count: 5,
            difficulty: Difficulty::Beginner,
            resume: None,
        };
        assert_eq!(config.countdown_secs(), Some(900));

        config.mode = Mode::Practice;
        assert_eq!(config.countdown_secs(), None);
    }

    #[test]
    fn validate_rejects_timed_without_duration() {
        let config = InterviewConfig {
            domain: "behavioral".to_string(),
            mode: Mode::Timed,
            duration_minutes: None,
            question_count: 5,
            difficulty: Difficulty::Beginner,
            resume: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_questions() {
        let config = InterviewConfig {
            domain: "behavioral".to_string(),
            mode: Mode::Practice,
            duration_minutes: None,
            question_count: 0,
            difficulty: Difficulty::Beginner,
            resume: None,
        };
        assert!(config.validate().is_err());
    }
}
