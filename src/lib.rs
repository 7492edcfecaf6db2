pub mod audio;
pub mod config;
pub mod error;
pub mod question;
pub mod scoring;
pub mod session;
pub mod speech;

pub use audio::AudioArtifact;
pub use config::Config;
pub use error::VivaError;
pub use question::{Difficulty, Domain, Question, QuestionBank, QUESTION_TIME_LIMIT_SECS};
pub use scoring::{
    aggregate, analyze_structure, evaluate, performance_metrics, technical_accuracy, Evaluation,
    PerformanceMetrics, StructureAnalysis, TechnicalAccuracy, TopicStats,
};
pub use session::{
    Answer, InterviewConfig, InterviewResult, Mode, Phase, SessionController, SessionEvent,
    SessionHandle, SessionSnapshot,
};
pub use speech::{
    CaptureChannel, CaptureResult, MutedSynthesizer, NarrationChannel, NarrationSignal,
    ScriptedCapture, SimulatedSynthesizer, SpeechCapture, SpeechSynthesizer, TranscriptBuffer,
    TranscriptEvent, TranscriptSegment, UnavailableCapture,
};
