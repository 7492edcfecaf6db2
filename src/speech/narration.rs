use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;

/// Lifecycle signals emitted while a narration plays. The session
/// controller consumes these to gate recording affordances; narration is
/// never scored and has no effect on answer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationSignal {
    Started,
    Ended,
}

/// Speech synthesis capability.
///
/// `synthesize` resolves when playback has finished; cancellation happens
/// by aborting the task driving it.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether the platform can render speech at all
    fn is_available(&self) -> bool;

    /// Render `text` to audio, resolving once playback ends
    async fn synthesize(&self, text: &str) -> Result<()>;

    /// Synthesizer name for logging
    fn name(&self) -> &str;
}

/// Plays question text aloud. Single-flight: starting a new narration
/// cancels any narration already in flight.
pub struct NarrationChannel {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    signals: mpsc::Sender<NarrationSignal>,
    speaking: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
    warned_unavailable: AtomicBool,
}

impl NarrationChannel {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        signals: mpsc::Sender<NarrationSignal>,
    ) -> Self {
        Self {
            synthesizer,
            signals,
            speaking: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
            warned_unavailable: AtomicBool::new(false),
        }
    }

    /// Start narrating `text`, cancelling any narration in flight first.
    ///
    /// An unavailable synthesizer skips playback silently; the session
    /// carries on without audio.
    pub async fn speak(&self, text: &str) {
        if !self.synthesizer.is_available() {
            if !self.warned_unavailable.swap(true, Ordering::SeqCst) {
                warn!(
                    "Narration unavailable ({}); questions will not be read aloud",
                    self.synthesizer.name()
                );
            }
            return;
        }

        self.cancel().await;

        let synthesizer = Arc::clone(&self.synthesizer);
        let signals = self.signals.clone();
        let speaking = Arc::clone(&self.speaking);
        let text = text.to_string();

        let handle = tokio::spawn(async move {
            speaking.store(true, Ordering::SeqCst);
            let _ = signals.send(NarrationSignal::Started).await;

            if let Err(e) = synthesizer.synthesize(&text).await {
                warn!("Narration failed: {}", e);
            }

            speaking.store(false, Ordering::SeqCst);
            let _ = signals.send(NarrationSignal::Ended).await;
        });

        let mut task = self.task.lock().await;
        *task = Some(handle);
    }

    /// Cancel the narration in flight, if any. Idempotent: cancelling
    /// when nothing is playing is a no-op.
    pub async fn cancel(&self) {
        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
            self.speaking.store(false, Ordering::SeqCst);
            debug!("Narration cancelled");
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}
