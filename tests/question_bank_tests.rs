// Integration tests for question selection
//
// These verify the selection laws that hold for every configuration:
// list length, category stamping, keyword slicing, and the
// degrade-to-empty policy for unknown domains.

use viva_coach::{
    Difficulty, Domain, InterviewConfig, Mode, QuestionBank, QUESTION_TIME_LIMIT_SECS,
};

fn config(domain: &str, difficulty: Difficulty, count: u32, mode: Mode) -> InterviewConfig {
    InterviewConfig {
        domain: domain.to_string(),
        mode,
        duration_minutes: match mode {
            Mode::Timed => Some(15),
            Mode::Practice => None,
        },
        question_count: count,
        difficulty,
        resume: None,
    }
}

#[test]
fn generated_length_is_min_of_request_and_pool_across_the_catalog() {
    for domain in Domain::ALL {
        for difficulty in Difficulty::ALL {
            let pool_size = domain.pool(difficulty).len();
            for count in [5u32, 10, 15, 20] {
                let questions = QuestionBank::generate(&config(
                    domain.as_str(),
                    difficulty,
                    count,
                    Mode::Practice,
                ));
                assert_eq!(
                    questions.len(),
                    (count as usize).min(pool_size),
                    "{domain} {difficulty} count={count}"
                );
            }
        }
    }
}

#[test]
fn unknown_domain_degrades_to_an_empty_list() {
    let questions = QuestionBank::generate(&config(
        "interpretive-dance",
        Difficulty::Advanced,
        10,
        Mode::Practice,
    ));
    assert!(questions.is_empty());
}

#[test]
fn every_question_carries_its_domain_category_and_a_keyword_slice() {
    for domain in Domain::ALL {
        let questions = QuestionBank::generate(&config(
            domain.as_str(),
            Difficulty::Beginner,
            8,
            Mode::Practice,
        ));
        for question in questions {
            assert_eq!(question.category, domain.as_str());
            assert!((3..=7).contains(&question.expected_keywords.len()));
            // Keyword slices come from the domain's own list.
            for keyword in &question.expected_keywords {
                assert!(domain.keywords().contains(&keyword.as_str()));
            }
        }
    }
}

#[test]
fn selection_draws_without_replacement() {
    let questions = QuestionBank::generate(&config(
        "machine-learning",
        Difficulty::Advanced,
        20,
        Mode::Practice,
    ));
    let mut texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), questions.len());
}

#[test]
fn timed_mode_sets_the_per_question_budget() {
    let timed = QuestionBank::generate(&config(
        "behavioral",
        Difficulty::Intermediate,
        5,
        Mode::Timed,
    ));
    assert!(timed
        .iter()
        .all(|q| q.time_limit_secs == Some(QUESTION_TIME_LIMIT_SECS)));

    let practice = QuestionBank::generate(&config(
        "behavioral",
        Difficulty::Intermediate,
        5,
        Mode::Practice,
    ));
    assert!(practice.iter().all(|q| q.time_limit_secs.is_none()));
}
