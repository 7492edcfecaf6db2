//! Answer scoring and result aggregation
//!
//! Everything in this module is a pure function over transcripts and
//! questions: identical inputs always produce identical scores.

mod aggregate;
mod evaluate;

pub use aggregate::{aggregate, performance_metrics, PerformanceMetrics, TopicStats};
pub use evaluate::{
    analyze_structure, evaluate, technical_accuracy, Evaluation, StructureAnalysis,
    TechnicalAccuracy,
};
