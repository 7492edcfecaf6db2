use serde::{Deserialize, Serialize};

use crate::question::Question;

/// Hedging words penalized in fluency scoring. Matched per whitespace
/// token, lowercased.
const FILLER_WORDS: [&str; 6] = ["um", "uh", "like", "you know", "basically", "actually"];

/// Words signalling the answer gives a concrete example
const EXAMPLE_MARKERS: [&str; 5] = ["example", "instance", "case", "situation", "experience"];

/// Deterministic scores for one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Structural completeness, 0.30 base plus accrued bonuses, capped at 1
    pub confidence: f64,

    /// Expected-keyword coverage, capped at 1
    pub keyword_score: f64,

    /// Length / filler / sentence-shape blend, in [0, 1]
    pub fluency_score: f64,

    /// Human-readable remarks derived from fixed score thresholds
    pub feedback: Vec<String>,
}

/// Score a transcript against a question.
///
/// Pure and idempotent. Denominators are floored at 1 so the empty
/// transcript scores cleanly (confidence 0.30, fluency 0.30).
pub fn evaluate(transcript: &str, question: &Question) -> Evaluation {
    let lowered = transcript.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let word_count = words.len();
    let sentence_count = sentences(transcript);

    // Keyword coverage: a keyword matches as a case-insensitive substring.
    let matched = question
        .expected_keywords
        .iter()
        .filter(|keyword| lowered.contains(&keyword.to_lowercase()))
        .count();
    let keyword_score = (matched as f64
        / (question.expected_keywords.len() as f64 * 0.3).max(1.0))
    .min(1.0);

    // Fluency: response length, filler density, sentence shape.
    let filler_count = words.iter().filter(|w| FILLER_WORDS.contains(w)).count();
    let filler_ratio = filler_count as f64 / (word_count as f64).max(1.0);
    let avg_words_per_sentence = word_count as f64 / (sentence_count as f64).max(1.0);
    let length_score = (word_count as f64 / 50.0).min(1.0);

    let fluency_score = (length_score * 0.4
        + (1.0 - filler_ratio) * 0.3
        + (avg_words_per_sentence / 10.0).min(1.0) * 0.3)
        .max(0.0);

    // Confidence: completeness and structure markers.
    let has_introduction = transcript.chars().count() > 20;
    let has_examples = EXAMPLE_MARKERS.iter().any(|m| lowered.contains(m));
    let has_conclusion = sentence_count > 1;

    let mut confidence: f64 = 0.3;
    if has_introduction {
        confidence += 0.2;
    }
    if has_examples {
        confidence += 0.3;
    }
    if has_conclusion {
        confidence += 0.2;
    }
    if word_count > 30 {
        confidence += 0.1;
    }

    let mut feedback = Vec::new();
    if keyword_score < 0.3 {
        feedback.push("Try to include more relevant technical terms in your answer".to_string());
    }
    if fluency_score < 0.5 {
        feedback.push("Work on reducing filler words and speaking more clearly".to_string());
    }
    if confidence < 0.5 {
        feedback.push("Provide more detailed examples and structure your answer better".to_string());
    }
    if word_count < 20 {
        feedback.push("Try to provide more comprehensive answers".to_string());
    }
    if keyword_score > 0.7 {
        feedback.push("Great use of technical terminology".to_string());
    }
    if fluency_score > 0.7 {
        feedback.push("Very clear and fluent delivery".to_string());
    }
    if confidence > 0.7 {
        feedback.push("Well-structured and confident response".to_string());
    }

    Evaluation {
        confidence: confidence.min(1.0),
        keyword_score,
        fluency_score,
        feedback,
    }
}

/// Structural shape of a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureAnalysis {
    pub sentence_count: usize,
    /// Mentions situation/task/action/result, the STAR framing
    pub has_star_structure: bool,
    /// Three or more sentences
    pub has_logical_flow: bool,
    pub avg_sentence_length: f64,
}

pub fn analyze_structure(transcript: &str) -> StructureAnalysis {
    let sentence_count = sentences(transcript);
    let lowered = transcript.to_lowercase();
    let has_star_structure = ["situation", "task", "action", "result"]
        .iter()
        .any(|m| lowered.contains(m));

    StructureAnalysis {
        sentence_count,
        has_star_structure,
        has_logical_flow: sentence_count >= 3,
        avg_sentence_length: transcript.chars().count() as f64 / (sentence_count as f64).max(1.0),
    }
}

/// Domain-term usage in a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalAccuracy {
    pub terms_used: Vec<String>,
    pub score: f64,
}

/// Check a transcript for core technical vocabulary of a domain. Domains
/// without a term list (e.g. behavioral) score zero terms.
pub fn technical_accuracy(transcript: &str, domain: &str) -> TechnicalAccuracy {
    let terms: &[&str] = match domain {
        "web-development" => &[
            "HTML", "CSS", "JavaScript", "DOM", "API", "HTTP", "HTTPS", "REST", "JSON",
        ],
        "data-structures" => &[
            "array", "linked list", "stack", "queue", "tree", "graph", "hash table", "algorithm",
        ],
        "system-design" => &[
            "scalability", "load balancer", "database", "caching", "microservices", "distributed",
        ],
        "machine-learning" => &[
            "model", "training", "validation", "overfitting", "neural network", "algorithm",
        ],
        _ => &[],
    };

    let lowered = transcript.to_lowercase();
    let terms_used: Vec<String> = terms
        .iter()
        .filter(|term| lowered.contains(&term.to_lowercase()))
        .map(|term| term.to_string())
        .collect();

    let score = terms_used.len() as f64 / (terms.len() as f64 * 0.2).max(1.0);

    TechnicalAccuracy { terms_used, score }
}

/// Sentences are substrings delimited by `.`, `!`, `?`, discarding
/// whitespace-only ones.
fn sentences(transcript: &str) -> usize {
    transcript
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Difficulty;

    fn question(keywords: &[&str]) -> Question {
        Question {
            id: "q_1".to_string(),
            text: "Tell me about caching.".to_string(),
            category: "system-design".to_string(),
            difficulty: Difficulty::Intermediate,
            expected_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            time_limit_secs: None,
        }
    }

    #[test]
    fn empty_transcript_scores_the_documented_baseline() {
        let evaluation = evaluate("", &question(&["caching"]));
        assert!((evaluation.confidence - 0.30).abs() < 1e-9);
        assert!((evaluation.fluency_score - 0.30).abs() < 1e-9);
        assert_eq!(evaluation.keyword_score, 0.0);
    }

    #[test]
    fn two_of_three_keywords_saturate_the_keyword_score() {
        let q = question(&["scalability", "caching", "database"]);
        let evaluation = evaluate(
            "We improved scalability by adding caching at the edge",
            &q,
        );
        // matched=2, denominator max(3*0.3, 1)=1, capped at 1
        assert_eq!(evaluation.keyword_score, 1.0);
    }

    #[test]
    fn keyword_matching_is_case_insensitive_substring() {
        let q = question(&["Big O"]);
        let evaluation = evaluate("the big o complexity is linear", &q);
        assert!(evaluation.keyword_score > 0.0);
    }

    #[test]
    fn keyword_score_is_monotonic_in_matches() {
        let q = question(&[
            "scalability",
            "load balancer",
            "database",
            "caching",
            "microservices",
            "API",
            "distributed",
        ]);
        let mut previous = 0.0;
        let mut transcript = String::new();
        for keyword in &q.expected_keywords {
            transcript.push_str(keyword);
            transcript.push(' ');
            let score = evaluate(&transcript, &q).keyword_score;
            assert!(score >= previous);
            assert!(score <= 1.0);
            previous = score;
        }
    }

    #[test]
    fn filler_words_depress_fluency() {
        let q = question(&["caching"]);
        let clean = evaluate("We cache responses at the gateway to cut latency.", &q);
        let hedged = evaluate("Um like we uh basically cache um responses like.", &q);
        assert!(hedged.fluency_score < clean.fluency_score);
    }

    #[test]
    fn scores_stay_in_bounds_for_assorted_transcripts() {
        let q = question(&["caching", "database"]);
        let transcripts = [
            "",
            "yes",
            "um uh like you know basically actually",
            "One. Two! Three? Four. Five!",
            &"word ".repeat(400),
            "Ein Beispiel mit Umlauten: äöüß, und Zeichen 🎤.",
        ];
        for transcript in transcripts {
            let evaluation = evaluate(transcript, &q);
            assert!((0.0..=1.0).contains(&evaluation.confidence), "{transcript}");
            assert!(
                (0.0..=1.0).contains(&evaluation.fluency_score),
                "{transcript}"
            );
            assert!(
                (0.0..=1.0).contains(&evaluation.keyword_score),
                "{transcript}"
            );
        }
    }

    #[test]
    fn evaluate_is_pure() {
        let q = question(&["caching", "database"]);
        let transcript = "For example, we moved the database cache. It worked well.";
        let first = evaluate(transcript, &q);
        let second = evaluate(transcript, &q);
        assert_eq!(first, second);
    }

    #[test]
    fn example_markers_raise_confidence() {
        let q = question(&["caching"]);
        let plain = evaluate("We moved the cache to the edge servers now", &q);
        let with_example = evaluate("For instance, we moved the cache to the edge", &q);
        assert!(with_example.confidence > plain.confidence);
    }

    #[test]
    fn strong_answer_earns_positive_feedback() {
        let q = question(&["scalability", "caching", "database"]);
        let transcript = "In my experience, scalability starts with measuring the database load. \
            For example, we introduced caching in front of the primary database and watched the \
            read path closely. That cut latency by half. The team then tuned eviction until the \
            hit rate stabilized, which let us defer sharding for a year.";
        let evaluation = evaluate(transcript, &q);

        assert!(evaluation
            .feedback
            .contains(&"Great use of technical terminology".to_string()));
        assert!(evaluation
            .feedback
            .contains(&"Very clear and fluent delivery".to_string()));
        assert!(evaluation
            .feedback
            .contains(&"Well-structured and confident response".to_string()));
    }

    #[test]
    fn weak_answer_earns_the_low_band_remarks() {
        let q = question(&["scalability", "caching", "database", "sharding"]);
        let evaluation = evaluate("um not sure", &q);

        assert!(evaluation
            .feedback
            .contains(&"Try to include more relevant technical terms in your answer".to_string()));
        assert!(evaluation
            .feedback
            .contains(&"Provide more detailed examples and structure your answer better".to_string()));
        assert!(evaluation
            .feedback
            .contains(&"Try to provide more comprehensive answers".to_string()));
    }

    #[test]
    fn structure_analysis_detects_star_framing() {
        let analysis = analyze_structure(
            "The situation was a failing deploy. My task was rollback. \
             The action I took was scripted. The result was a clean recovery.",
        );
        assert!(analysis.has_star_structure);
        assert!(analysis.has_logical_flow);
        assert_eq!(analysis.sentence_count, 4);
    }

    #[test]
    fn technical_accuracy_counts_domain_terms() {
        let accuracy = technical_accuracy(
            "We split the database behind a load balancer with caching",
            "system-design",
        );
        assert_eq!(accuracy.terms_used.len(), 3);
        assert!(accuracy.score > 0.0);

        let none = technical_accuracy("teamwork matters", "behavioral");
        assert!(none.terms_used.is_empty());
        assert_eq!(none.score, 0.0);
    }
}
