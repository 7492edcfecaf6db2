use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::question::Question;
use crate::session::{Answer, InterviewConfig, InterviewResult};

/// Fold a completed answer set into the final result.
///
/// `overall_score` is the mean composite score across answers (0 with no
/// answers). Category buckets are additive: every answered question adds
/// its composite score into its category, so a bucket covering several
/// questions can exceed 1.0.
pub fn aggregate(
    config: InterviewConfig,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    duration_secs: u64,
    completed_at: DateTime<Utc>,
) -> InterviewResult {
    let overall_score = if answers.is_empty() {
        0.0
    } else {
        answers.iter().map(Answer::composite_score).sum::<f64>() / answers.len() as f64
    };

    let mut category_scores: BTreeMap<String, f64> = BTreeMap::new();
    for question in &questions {
        if let Some(answer) = answers.iter().find(|a| a.question_id == question.id) {
            *category_scores.entry(question.category.clone()).or_insert(0.0) +=
                answer.composite_score();
        }
    }

    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if overall_score > 0.7 {
        strengths.push("Strong overall performance".to_string());
    }
    if answers.iter().any(|a| a.keyword_score > 0.8) {
        strengths.push("Good technical knowledge".to_string());
    }
    if answers.iter().any(|a| a.fluency_score > 0.8) {
        strengths.push("Clear communication".to_string());
    }

    if overall_score < 0.6 {
        improvements.push("Work on overall interview confidence".to_string());
    }
    if answers.iter().any(|a| a.keyword_score < 0.5) {
        improvements.push("Strengthen technical knowledge".to_string());
    }
    if answers.iter().any(|a| a.fluency_score < 0.5) {
        improvements.push("Practice speaking more fluently".to_string());
    }

    InterviewResult {
        config,
        questions,
        answers,
        overall_score,
        category_scores,
        strengths,
        improvements,
        duration_secs,
        completed_at,
    }
}

/// Per-topic accumulation for the metrics breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicStats {
    pub score: f64,
    pub count: usize,
}

/// Summary metrics derived from a finished interview
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub total_questions: usize,
    pub answered_questions: usize,
    pub average_confidence: f64,
    pub average_keyword_score: f64,
    pub average_fluency: f64,
    pub topic_breakdown: BTreeMap<String, TopicStats>,
}

/// Derive headline metrics from a result, for dashboards and exports.
pub fn performance_metrics(result: &InterviewResult) -> PerformanceMetrics {
    let answers = &result.answers;
    let count = answers.len() as f64;

    let mean = |f: fn(&Answer) -> f64| {
        if answers.is_empty() {
            0.0
        } else {
            answers.iter().map(f).sum::<f64>() / count
        }
    };

    let mut topic_breakdown: BTreeMap<String, TopicStats> = BTreeMap::new();
    for question in &result.questions {
        if let Some(answer) = answers.iter().find(|a| a.question_id == question.id) {
            let stats = topic_breakdown.entry(question.category.clone()).or_default();
            stats.score += answer.composite_score();
            stats.count += 1;
        }
    }

    PerformanceMetrics {
        total_questions: result.questions.len(),
        answered_questions: answers.len(),
        average_confidence: mean(|a| a.confidence),
        average_keyword_score: mean(|a| a.keyword_score),
        average_fluency: mean(|a| a.fluency_score),
        topic_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Difficulty;
    use crate::session::Mode;

    fn config() -> InterviewConfig {
        InterviewConfig {
            domain: "system-design".to_string(),
            mode: Mode::Practice,
            duration_minutes: None,
            question_count: 4,
            difficulty: Difficulty::Intermediate,
            resume: None,
        }
    }

    fn question(id: &str, category: &str) -> Question {
        Question {
            id: id.to_string(),
            text: "…".to_string(),
            category: category.to_string(),
            difficulty: Difficulty::Intermediate,
            expected_keywords: vec!["caching".to_string()],
            time_limit_secs: None,
        }
    }

    fn answer(question_id: &str, confidence: f64, keyword: f64, fluency: f64) -> Answer {
        Answer {
            question_id: question_id.to_string(),
            transcript: "an answer".to_string(),
            audio: None,
            duration_secs: 30,
            confidence,
            keyword_score: keyword,
            fluency_score: fluency,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn no_answers_yields_zero_overall_and_empty_categories() {
        let result = aggregate(
            config(),
            vec![question("q_1", "system-design")],
            Vec::new(),
            120,
            Utc::now(),
        );

        assert_eq!(result.overall_score, 0.0);
        assert!(result.category_scores.is_empty());
        assert!(result
            .improvements
            .contains(&"Work on overall interview confidence".to_string()));
    }

    #[test]
    fn category_buckets_accumulate_additively() {
        let questions = vec![
            question("q_1", "system-design"),
            question("q_2", "system-design"),
            question("q_3", "system-design"),
        ];
        let answers = vec![
            answer("q_1", 0.9, 0.9, 0.9),
            answer("q_2", 0.9, 0.9, 0.9),
            answer("q_3", 0.9, 0.9, 0.9),
        ];

        let result = aggregate(config(), questions, answers, 300, Utc::now());

        // three composites of 0.9 summed, not averaged
        let bucket = result.category_scores["system-design"];
        assert!((bucket - 2.7).abs() < 1e-9);
        assert!(bucket > 1.0);
        assert!((result.overall_score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn unanswered_questions_do_not_contribute() {
        let questions = vec![
            question("q_1", "behavioral"),
            question("q_2", "behavioral"),
        ];
        let answers = vec![answer("q_1", 0.6, 0.6, 0.6)];

        let result = aggregate(config(), questions, answers, 60, Utc::now());

        assert!((result.category_scores["behavioral"] - 0.6).abs() < 1e-9);
        assert_eq!(result.answers.len(), 1);
    }

    #[test]
    fn threshold_rules_produce_the_expected_remarks() {
        let questions = vec![question("q_1", "system-design")];
        let strong = aggregate(
            config(),
            questions.clone(),
            vec![answer("q_1", 0.9, 0.9, 0.9)],
            60,
            Utc::now(),
        );
        assert!(strong
            .strengths
            .contains(&"Strong overall performance".to_string()));
        assert!(strong
            .strengths
            .contains(&"Good technical knowledge".to_string()));
        assert!(strong.strengths.contains(&"Clear communication".to_string()));
        assert!(strong.improvements.is_empty());

        let weak = aggregate(
            config(),
            questions,
            vec![answer("q_1", 0.4, 0.3, 0.4)],
            60,
            Utc::now(),
        );
        assert!(weak.strengths.is_empty());
        assert!(weak
            .improvements
            .contains(&"Work on overall interview confidence".to_string()));
        assert!(weak
            .improvements
            .contains(&"Strengthen technical knowledge".to_string()));
        assert!(weak
            .improvements
            .contains(&"Practice speaking more fluently".to_string()));
    }

    #[test]
    fn metrics_average_per_answer_and_break_down_by_topic() {
        let questions = vec![
            question("q_1", "system-design"),
            question("q_2", "behavioral"),
            question("q_3", "behavioral"),
        ];
        let answers = vec![
            answer("q_1", 0.8, 0.6, 1.0),
            answer("q_2", 0.4, 0.2, 0.6),
        ];

        let result = aggregate(config(), questions, answers, 90, Utc::now());
        let metrics = performance_metrics(&result);

        assert_eq!(metrics.total_questions, 3);
        assert_eq!(metrics.answered_questions, 2);
        assert!((metrics.average_confidence - 0.6).abs() < 1e-9);
        assert!((metrics.average_keyword_score - 0.4).abs() < 1e-9);
        assert!((metrics.average_fluency - 0.8).abs() < 1e-9);
        assert_eq!(metrics.topic_breakdown.len(), 2);
        assert_eq!(metrics.topic_breakdown["behavioral"].count, 1);
    }
}
