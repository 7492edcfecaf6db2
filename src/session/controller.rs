use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::config::InterviewConfig;
use super::events::{Phase, SessionEvent, SessionSnapshot};
use super::report::{Answer, InterviewResult};
use crate::error::VivaError;
use crate::question::{Question, QuestionBank};
use crate::scoring;
use crate::speech::{
    CaptureChannel, CaptureResult, NarrationChannel, NarrationSignal, SpeechCapture,
    SpeechSynthesizer,
};

/// Owns one interview session from question selection to the final
/// report.
///
/// The controller is the sole mutator of session state. Every stimulus
/// (user action, narration signal, countdown tick) is handled on one
/// `select!` loop, so transitions never interleave. The narration and
/// capture channels run concurrently with the loop but are kept mutually
/// exclusive: starting capture cancels any narration in flight.
pub struct SessionController {
    session_id: String,
    config: InterviewConfig,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    phase: Phase,

    /// Seconds left on the global countdown (timed mode only)
    time_remaining: Option<u64>,

    /// Cleared permanently the first time capture reports itself
    /// unsupported
    capture_available: bool,

    narrating: bool,

    narration: NarrationChannel,
    capture: CaptureChannel,

    events_rx: mpsc::Receiver<SessionEvent>,
    narration_rx: mpsc::Receiver<NarrationSignal>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

/// Cloneable handle for driving a running session and observing its
/// state.
#[derive(Clone)]
pub struct SessionHandle {
    events_tx: mpsc::Sender<SessionEvent>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub async fn start_recording(&self) {
        self.send(SessionEvent::StartRecording).await;
    }

    pub async fn stop_recording(&self) {
        self.send(SessionEvent::StopRecording).await;
    }

    pub async fn advance(&self) {
        self.send(SessionEvent::Advance).await;
    }

    pub async fn finish(&self) {
        self.send(SessionEvent::Finish).await;
    }

    /// Latest published state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch receiver for awaiting specific transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    async fn send(&self, event: SessionEvent) {
        // A closed channel just means the session already completed.
        let _ = self.events_tx.send(event).await;
    }
}

impl SessionController {
    pub fn new(
        config: InterviewConfig,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        capture_backend: Box<dyn SpeechCapture>,
    ) -> (Self, SessionHandle) {
        let (events_tx, events_rx) = mpsc::channel(32);
        let (narration_tx, narration_rx) = mpsc::channel(8);
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

        let controller = Self {
            session_id: format!("interview-{}", uuid::Uuid::new_v4()),
            config,
            questions: Vec::new(),
            answers: Vec::new(),
            phase: Phase::Initializing,
            time_remaining: None,
            capture_available: true,
            narrating: false,
            narration: NarrationChannel::new(synthesizer, narration_tx),
            capture: CaptureChannel::new(capture_backend),
            events_rx,
            narration_rx,
            snapshot_tx,
        };

        let handle = SessionHandle {
            events_tx,
            snapshot_rx,
        };

        (controller, handle)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Run the session to completion and return the final result.
    ///
    /// Never fails: every error along the way is recovered locally and
    /// the session always terminates in `Completed`.
    pub async fn run(mut self) -> InterviewResult {
        let run_started = tokio::time::Instant::now();

        self.initialize().await;
        self.publish_snapshot();

        let mut countdown = tokio::time::interval(Duration::from_secs(1));
        countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);
        countdown.tick().await; // first tick completes immediately

        while !self.phase.is_completed() {
            tokio::select! {
                event = self.events_rx.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    // Every handle dropped: tear the session down.
                    None => self.complete().await,
                },
                Some(signal) = self.narration_rx.recv() => self.handle_narration(signal),
                _ = countdown.tick(), if self.time_remaining.is_some() => self.handle_tick().await,
            }
            self.publish_snapshot();
        }

        let duration_secs = run_started.elapsed().as_secs();
        info!(
            "Session {} completed: {}/{} questions answered",
            self.session_id,
            self.answers.len(),
            self.questions.len()
        );

        scoring::aggregate(
            self.config,
            self.questions,
            self.answers,
            duration_secs,
            Utc::now(),
        )
    }

    async fn initialize(&mut self) {
        self.questions = QuestionBank::generate(&self.config);
        self.time_remaining = self.config.countdown_secs();
        self.capture_available = self.capture.is_available();

        if !self.capture_available {
            warn!(
                "Session {}: speech capture unavailable, recording disabled",
                self.session_id
            );
        }

        info!(
            "Session {} started: {} questions ({} / {})",
            self.session_id,
            self.questions.len(),
            self.config.domain,
            self.config.difficulty
        );

        self.phase = Phase::AwaitingAnswer(0);
        self.narrate_current().await;
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StartRecording => self.start_recording().await,
            SessionEvent::StopRecording => self.stop_recording().await,
            SessionEvent::Advance => self.advance().await,
            SessionEvent::Finish => self.complete().await,
        }
    }

    fn handle_narration(&mut self, signal: NarrationSignal) {
        self.narrating = matches!(signal, NarrationSignal::Started);
    }

    async fn handle_tick(&mut self) {
        let Some(remaining) = self.time_remaining.as_mut() else {
            return;
        };
        *remaining = remaining.saturating_sub(1);

        if *remaining == 0 {
            info!("Session {} reached its time limit", self.session_id);
            self.complete().await;
        }
    }

    async fn start_recording(&mut self) {
        let Phase::AwaitingAnswer(idx) = self.phase else {
            warn!("Ignoring start-recording in phase {:?}", self.phase);
            return;
        };

        if !self.capture_available {
            warn!("Recording is disabled for this session");
            return;
        }

        // Capture and narration are mutually exclusive: never transcribe
        // our own playback.
        self.narration.cancel().await;
        self.narrating = false;

        match self.capture.start().await {
            Ok(()) => {
                self.phase = Phase::Recording(idx);
                info!("Recording answer for question {}", idx + 1);
            }
            Err(VivaError::CaptureUnavailable(reason)) => {
                warn!("Speech capture unavailable ({reason}); recording disabled");
                self.capture_available = false;
            }
            Err(e) => warn!("Failed to start capture: {}", e),
        }
    }

    async fn stop_recording(&mut self) {
        let Phase::Recording(idx) = self.phase else {
            warn!("Ignoring stop-recording in phase {:?}", self.phase);
            return;
        };

        self.phase = Phase::Evaluating(idx);
        match self.capture.stop().await {
            Ok(outcome) => self.record_answer(idx, outcome),
            Err(VivaError::Cancelled) => {
                info!("Recording cancelled; no answer for question {}", idx + 1)
            }
            Err(e) => warn!("Failed to stop capture: {}", e),
        }
        self.phase = Phase::AwaitingAnswer(idx);
    }

    fn record_answer(&mut self, idx: usize, outcome: CaptureResult) {
        if outcome.transcript.trim().is_empty() {
            info!("Empty transcript for question {}; no answer recorded", idx + 1);
            return;
        }

        let Some(question) = self.questions.get(idx) else {
            return;
        };

        // At most one answer per question; the first recording wins.
        if self
            .answers
            .iter()
            .any(|answer| answer.question_id == question.id)
        {
            warn!("Question {} already answered; keeping the first answer", question.id);
            return;
        }

        let evaluation = scoring::evaluate(&outcome.transcript, question);
        info!(
            "Scored answer for {}: confidence {:.2}, keywords {:.2}, fluency {:.2}",
            question.id, evaluation.confidence, evaluation.keyword_score, evaluation.fluency_score
        );

        self.answers.push(Answer {
            question_id: question.id.clone(),
            transcript: outcome.transcript,
            audio: outcome.audio,
            duration_secs: outcome.duration_secs,
            confidence: evaluation.confidence,
            keyword_score: evaluation.keyword_score,
            fluency_score: evaluation.fluency_score,
            timestamp: Utc::now(),
        });
    }

    async fn advance(&mut self) {
        let Phase::AwaitingAnswer(idx) = self.phase else {
            warn!("Ignoring advance in phase {:?}", self.phase);
            return;
        };

        let next = idx + 1;
        if next < self.questions.len() {
            self.phase = Phase::AwaitingAnswer(next);
            self.narrate_current().await;
        } else {
            self.complete().await;
        }
    }

    async fn narrate_current(&mut self) {
        let Some(idx) = self.phase.question_index() else {
            return;
        };
        if let Some(question) = self.questions.get(idx) {
            self.narration.speak(&question.text).await;
        }
    }

    /// Idempotent completion: cancels narration, aborts any in-flight
    /// capture (discarding its transcript), and freezes the phase.
    async fn complete(&mut self) {
        if self.phase.is_completed() {
            return;
        }

        self.narration.cancel().await;
        self.narrating = false;

        if self.capture.is_capturing() {
            if let Err(e) = self.capture.abort().await {
                warn!("Failed to abort capture on completion: {}", e);
            }
        }

        self.phase = Phase::Completed;
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx.send_replace(SessionSnapshot {
            phase: self.phase,
            question_count: self.questions.len(),
            answers_recorded: self.answers.len(),
            time_remaining_secs: self.time_remaining,
            narrating: self.narrating,
            capture_available: self.capture_available,
        });
    }
}
