use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    pub narration: NarrationConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Where answer WAV artifacts are written
    pub recordings_path: String,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarrationConfig {
    /// Playback pace of the question narrator
    pub words_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Cadence of interim recognition results
    pub partial_interval_ms: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "viva-coach".to_string(),
            },
            audio: AudioConfig {
                recordings_path: "recordings".to_string(),
                sample_rate: 16000,
                channels: 1,
            },
            narration: NarrationConfig {
                words_per_minute: 160,
            },
            capture: CaptureConfig {
                partial_interval_ms: 150,
            },
        }
    }
}
