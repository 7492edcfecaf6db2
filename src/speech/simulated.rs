//! Simulated speech backends
//!
//! Deterministic stand-ins for platform speech synthesis and recognition,
//! used by the demo binary and the test suite. The scripted capture plays
//! back canned utterances word by word the way a streaming recognizer
//! delivers interim results.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::capture::SpeechCapture;
use super::narration::SpeechSynthesizer;
use super::transcript::TranscriptEvent;
use crate::audio::AudioArtifact;
use crate::error::{Result, VivaError};

/// Synthesizer that "plays" text by sleeping at a configurable pace.
pub struct SimulatedSynthesizer {
    word_delay: Duration,
}

impl SimulatedSynthesizer {
    pub fn new(words_per_minute: u32) -> Self {
        let wpm = words_per_minute.max(1) as u64;
        Self {
            word_delay: Duration::from_millis(60_000 / wpm),
        }
    }
}

impl Default for SimulatedSynthesizer {
    fn default() -> Self {
        Self::new(160)
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for SimulatedSynthesizer {
    fn is_available(&self) -> bool {
        true
    }

    async fn synthesize(&self, text: &str) -> Result<()> {
        let words = text.split_whitespace().count() as u32;
        debug!("Narrating {} words", words);
        tokio::time::sleep(self.word_delay * words).await;
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated-synthesizer"
    }
}

/// Capability-denied synthesizer, for exercising the narration-skipped
/// degrade path.
pub struct MutedSynthesizer;

#[async_trait::async_trait]
impl SpeechSynthesizer for MutedSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn synthesize(&self, _text: &str) -> Result<()> {
        Err(VivaError::NarrationUnavailable(
            "no speech synthesis support".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "muted-synthesizer"
    }
}

/// Scripted capture backend.
///
/// Each `start` call plays the next scripted utterance: word-by-word
/// partial events on a fixed cadence, then one finalized segment. Raw
/// audio is synthesized to match the elapsed capture time. A session
/// that records more times than the script has entries gets silence
/// (no events, empty transcript).
pub struct ScriptedCapture {
    script: Vec<String>,
    cursor: usize,
    word_delay: Duration,
    sample_rate: u32,
    started_at: Option<tokio::time::Instant>,
    emitter: Option<JoinHandle<()>>,
}

impl ScriptedCapture {
    pub fn new(script: Vec<String>) -> Self {
        Self {
            script,
            cursor: 0,
            word_delay: Duration::from_millis(150),
            sample_rate: 16000,
            started_at: None,
            emitter: None,
        }
    }

    /// Cadence between interim results (default 150ms per word)
    pub fn with_word_delay(mut self, delay: Duration) -> Self {
        self.word_delay = delay;
        self
    }

    fn synthesize_audio(&self, elapsed: Duration) -> AudioArtifact {
        // Bound the synthetic buffer; abandoned captures can run long.
        let secs = elapsed.as_secs_f64().min(600.0);
        let sample_count = (secs * self.sample_rate as f64) as usize;
        // Quiet deterministic ramp; content is irrelevant, duration is not.
        let samples = (0..sample_count)
            .map(|i| ((i % 100) as i16 - 50) * 64)
            .collect();
        AudioArtifact {
            samples,
            sample_rate: self.sample_rate,
            channels: 1,
        }
    }
}

#[async_trait::async_trait]
impl SpeechCapture for ScriptedCapture {
    fn is_available(&self) -> bool {
        true
    }

    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptEvent>> {
        let utterance = self.script.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        self.started_at = Some(tokio::time::Instant::now());

        let (tx, rx) = mpsc::channel(32);
        let word_delay = self.word_delay;

        self.emitter = Some(tokio::spawn(async move {
            let words: Vec<&str> = utterance.split_whitespace().collect();
            for end in 1..=words.len() {
                tokio::time::sleep(word_delay).await;
                if tx
                    .send(TranscriptEvent::partial(words[..end].join(" ")))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            if !utterance.is_empty() {
                let _ = tx.send(TranscriptEvent::finalized(utterance)).await;
            }
        }));

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<Option<AudioArtifact>> {
        if let Some(emitter) = self.emitter.take() {
            emitter.abort();
        }

        let Some(started_at) = self.started_at.take() else {
            return Ok(None);
        };

        Ok(Some(self.synthesize_audio(started_at.elapsed())))
    }

    fn name(&self) -> &str {
        "scripted-capture"
    }
}

/// Capability-denied capture backend, for exercising the
/// recording-disabled degrade path.
pub struct UnavailableCapture;

#[async_trait::async_trait]
impl SpeechCapture for UnavailableCapture {
    fn is_available(&self) -> bool {
        false
    }

    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptEvent>> {
        Err(VivaError::CaptureUnavailable(
            "no speech recognition support".to_string(),
        ))
    }

    async fn stop(&mut self) -> Result<Option<AudioArtifact>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "unavailable-capture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn scripted_capture_emits_partials_then_a_final() -> anyhow::Result<()> {
        let mut backend = ScriptedCapture::new(vec!["one two three".to_string()]);
        let mut events = backend.start().await?;

        let mut collected = Vec::new();
        while let Some(event) = events.recv().await {
            collected.push(event);
        }

        assert_eq!(collected.len(), 4); // 3 partials + 1 final
        assert!(collected[..3].iter().all(|e| !e.is_final));
        assert_eq!(collected[3], TranscriptEvent::finalized("one two three"));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_script_yields_silence() -> anyhow::Result<()> {
        let mut backend = ScriptedCapture::new(Vec::new());
        let mut events = backend.start().await?;
        assert!(events.recv().await.is_none());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn stop_reports_audio_matching_elapsed_time() -> anyhow::Result<()> {
        let mut backend = ScriptedCapture::new(vec!["hello".to_string()]);
        let _events = backend.start().await?;

        tokio::time::sleep(Duration::from_secs(2)).await;
        let audio = backend.stop().await?.expect("audio artifact");

        assert!((audio.duration_seconds() - 2.0).abs() < 0.25);
        Ok(())
    }
}
