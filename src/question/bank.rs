use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::{Difficulty, Domain};
use crate::session::{InterviewConfig, Mode};

/// Per-question answer budget in timed mode, in seconds.
pub const QUESTION_TIME_LIMIT_SECS: u32 = 180;

/// A single interview question. Created once by the bank, immutable
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique within a session ("q_1", "q_2", ...)
    pub id: String,

    /// The question text, as narrated to the candidate
    pub text: String,

    /// Category label (equals the session domain)
    pub category: String,

    /// Difficulty tier the question was drawn from
    pub difficulty: Difficulty,

    /// Keywords the answer is expected to touch, ordered by relevance
    pub expected_keywords: Vec<String>,

    /// Per-question budget, set only in timed mode
    pub time_limit_secs: Option<u32>,
}

/// Pure question selection: config in, ordered question list out.
pub struct QuestionBank;

impl QuestionBank {
    /// Generate the question list for a session.
    ///
    /// An unrecognized domain degrades to an empty list rather than
    /// failing; the session then completes with no answerable questions.
    pub fn generate(config: &InterviewConfig) -> Vec<Question> {
        Self::generate_with(config, &mut rand::thread_rng())
    }

    /// Same as [`generate`](Self::generate), with a caller-supplied RNG so
    /// tests can seed the shuffle.
    pub fn generate_with(config: &InterviewConfig, rng: &mut impl Rng) -> Vec<Question> {
        let Some(domain) = Domain::parse(&config.domain) else {
            warn!("Unrecognized interview domain: {}", config.domain);
            return Vec::new();
        };

        let keywords = domain.keywords();
        let mut pool: Vec<&str> = domain.pool(config.difficulty).to_vec();
        pool.shuffle(rng);
        pool.truncate(config.question_count as usize);

        pool.into_iter()
            .enumerate()
            .map(|(index, text)| Question {
                id: format!("q_{}", index + 1),
                text: text.to_string(),
                category: domain.as_str().to_string(),
                difficulty: config.difficulty,
                expected_keywords: Self::keyword_slice(keywords, rng),
                time_limit_secs: match config.mode {
                    Mode::Timed => Some(QUESTION_TIME_LIMIT_SECS),
                    Mode::Practice => None,
                },
            })
            .collect()
    }

    /// Leading slice of the domain keyword list, 3 to 7 entries long.
    fn keyword_slice(keywords: &[&str], rng: &mut impl Rng) -> Vec<String> {
        let len = rng.gen_range(3..=7usize).min(keywords.len());
        keywords[..len].iter().map(|k| k.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(domain: &str, count: u32, mode: Mode) -> InterviewConfig {
        InterviewConfig {
            domain: domain.to_string(),
            mode,
            duration_minutes: match mode {
                Mode::Timed => Some(15),
                Mode::Practice => None,
            },
            question_count: count,
            difficulty: Difficulty::Intermediate,
            resume: None,
        }
    }

    #[test]
    fn unknown_domain_yields_empty_list() {
        let questions = QuestionBank::generate(&config("underwater-basketry", 10, Mode::Practice));
        assert!(questions.is_empty());
    }

    #[test]
    fn question_count_is_capped_by_pool_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions =
            QuestionBank::generate_with(&config("system-design", 20, Mode::Practice), &mut rng);
        assert_eq!(questions.len(), 8); // pool holds 8 per tier
    }

    #[test]
    fn requested_count_is_honored_when_pool_is_larger() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions =
            QuestionBank::generate_with(&config("behavioral", 5, Mode::Practice), &mut rng);
        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn questions_are_stamped_with_category_and_unique_ids() {
        let mut rng = StdRng::seed_from_u64(42);
        let questions =
            QuestionBank::generate_with(&config("data-structures", 8, Mode::Practice), &mut rng);

        let mut seen = std::collections::HashSet::new();
        for question in &questions {
            assert_eq!(question.category, "data-structures");
            assert_eq!(question.difficulty, Difficulty::Intermediate);
            assert!(seen.insert(question.id.clone()), "duplicate id {}", question.id);
        }
    }

    #[test]
    fn keyword_slices_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..32 {
            let questions = QuestionBank::generate_with(
                &config("machine-learning", 8, Mode::Practice),
                &mut rng,
            );
            for question in questions {
                assert!(question.expected_keywords.len() >= 3);
                assert!(question.expected_keywords.len() <= 7);
            }
        }
    }

    #[test]
    fn time_limit_is_set_only_in_timed_mode() {
        let mut rng = StdRng::seed_from_u64(1);
        let timed = QuestionBank::generate_with(&config("behavioral", 5, Mode::Timed), &mut rng);
        assert!(timed
            .iter()
            .all(|q| q.time_limit_secs == Some(QUESTION_TIME_LIMIT_SECS)));

        let practice =
            QuestionBank::generate_with(&config("behavioral", 5, Mode::Practice), &mut rng);
        assert!(practice.iter().all(|q| q.time_limit_secs.is_none()));
    }
}
