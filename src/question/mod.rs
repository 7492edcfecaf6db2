//! Question selection
//!
//! This module provides the question catalog (a closed table of domains,
//! difficulty tiers, question pools, and keyword lists) and the
//! `QuestionBank` that turns an `InterviewConfig` into the ordered
//! question list for one session.

mod bank;
mod catalog;

pub use bank::{Question, QuestionBank, QUESTION_TIME_LIMIT_SECS};
pub use catalog::{Difficulty, Domain};
