use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::transcript::{TranscriptBuffer, TranscriptEvent};
use crate::audio::AudioArtifact;
use crate::error::{Result, VivaError};

/// Speech capture capability: streaming speech-to-text plus raw audio
/// accumulation.
///
/// `start` returns the recognition event stream; the stream closes when
/// `stop` is called. `stop` yields whatever raw audio was accumulated.
#[async_trait::async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Whether the platform supports speech-to-text and audio capture
    fn is_available(&self) -> bool;

    /// Begin capturing; returns a channel receiver for transcript events
    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptEvent>>;

    /// Halt capturing and yield the accumulated audio, if any
    async fn stop(&mut self) -> Result<Option<AudioArtifact>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Everything one recording produced
#[derive(Debug)]
pub struct CaptureResult {
    /// Final transcript: finalized segments plus trailing partial
    pub transcript: String,
    /// Accumulated raw audio, when the backend provides it
    pub audio: Option<AudioArtifact>,
    /// Elapsed recording time in whole seconds
    pub duration_secs: u64,
}

/// Manages one answer recording: a pump task folding recognition events
/// into the transcript buffer, and a 1 Hz elapsed-duration counter.
pub struct CaptureChannel {
    backend: Box<dyn SpeechCapture>,
    capturing: Arc<AtomicBool>,
    elapsed_secs: Arc<AtomicU64>,
    buffer: Arc<Mutex<TranscriptBuffer>>,
    pump_handle: Option<JoinHandle<()>>,
    ticker_handle: Option<JoinHandle<()>>,
}

impl CaptureChannel {
    pub fn new(backend: Box<dyn SpeechCapture>) -> Self {
        Self {
            backend,
            capturing: Arc::new(AtomicBool::new(false)),
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            buffer: Arc::new(Mutex::new(TranscriptBuffer::new())),
            pump_handle: None,
            ticker_handle: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs.load(Ordering::SeqCst)
    }

    /// The transcript as visible right now (finalized + partial)
    pub async fn live_transcript(&self) -> String {
        self.buffer.lock().await.text()
    }

    /// Start the recognition pump and the duration counter.
    pub async fn start(&mut self) -> Result<()> {
        if self.capturing.load(Ordering::SeqCst) {
            warn!("Capture already active");
            return Ok(());
        }

        if !self.backend.is_available() {
            return Err(VivaError::CaptureUnavailable(self.backend.name().to_string()));
        }

        let mut events = self.backend.start().await?;

        self.buffer.lock().await.clear();
        self.elapsed_secs.store(0, Ordering::SeqCst);
        self.capturing.store(true, Ordering::SeqCst);

        // Pump recognition events until the backend closes the stream.
        let buffer = Arc::clone(&self.buffer);
        self.pump_handle = Some(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mut buffer = buffer.lock().await;
                buffer.apply(event);
            }
        }));

        // 1 Hz elapsed counter, running until aborted on stop.
        let elapsed = Arc::clone(&self.elapsed_secs);
        self.ticker_handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.tick().await; // first tick completes immediately
            loop {
                ticker.tick().await;
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        }));

        info!("Capture started ({})", self.backend.name());

        Ok(())
    }

    /// Stop both subsystems and return the final transcript, the audio
    /// artifact, and the elapsed duration. The counter resets to zero.
    pub async fn stop(&mut self) -> Result<CaptureResult> {
        if !self.capturing.swap(false, Ordering::SeqCst) {
            // Already aborted (timeout or teardown) or never started.
            return Err(VivaError::Cancelled);
        }

        // Closing the backend ends the event stream; the pump then drains
        // whatever was still in flight before exiting.
        let audio = self.backend.stop().await?;
        self.join_tasks().await;

        let transcript = {
            let mut buffer = self.buffer.lock().await;
            let text = buffer.text();
            buffer.clear();
            text
        };
        let duration_secs = self.elapsed_secs.swap(0, Ordering::SeqCst);

        info!(
            "Capture stopped after {}s ({} chars transcribed)",
            duration_secs,
            transcript.len()
        );

        Ok(CaptureResult {
            transcript,
            audio,
            duration_secs,
        })
    }

    /// Stop capturing and discard the in-flight transcript. Used on
    /// forced timeout and teardown. Idempotent.
    pub async fn abort(&mut self) -> Result<()> {
        if !self.capturing.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        if let Err(e) = self.backend.stop().await {
            warn!("Capture backend failed to stop: {}", e);
        }
        self.join_tasks().await;

        self.buffer.lock().await.clear();
        self.elapsed_secs.store(0, Ordering::SeqCst);

        info!("Capture aborted; in-flight transcript discarded");

        Ok(())
    }

    async fn join_tasks(&mut self) {
        if let Some(ticker) = self.ticker_handle.take() {
            ticker.abort();
        }

        let handles: Vec<JoinHandle<()>> = self.pump_handle.take().into_iter().collect();
        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                if !e.is_cancelled() {
                    warn!("Capture task panicked: {}", e);
                }
            }
        }
    }
}
