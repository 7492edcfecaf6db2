use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use viva_coach::{
    performance_metrics, Config, Difficulty, Domain, InterviewConfig, Mode, Phase, ScriptedCapture,
    SessionController, SimulatedSynthesizer,
};

/// Run a simulated spoken interview end to end and print the report.
#[derive(Parser, Debug)]
#[command(name = "viva-coach", version, about)]
struct Cli {
    /// Interview domain (e.g. "system-design", "behavioral")
    #[arg(long, default_value = "system-design")]
    domain: String,

    /// Question difficulty tier
    #[arg(long, default_value = "intermediate")]
    difficulty: Difficulty,

    /// Session mode ("practice" or "timed")
    #[arg(long, default_value = "practice")]
    mode: Mode,

    /// Session length in minutes (timed mode): 15, 30, 45 or 60
    #[arg(long)]
    duration: Option<u32>,

    /// How many questions to ask: 5, 10, 15 or 20
    #[arg(long, default_value_t = 5)]
    questions: u32,

    /// Config file (without extension)
    #[arg(long, default_value = "config/viva-coach")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let cfg = Config::load(&cli.config).unwrap_or_else(|e| {
        warn!("Could not load config {} ({}); using defaults", cli.config, e);
        Config::default()
    });

    anyhow::ensure!(
        [5, 10, 15, 20].contains(&cli.questions),
        "question count must be 5, 10, 15 or 20"
    );
    if cli.mode == Mode::Timed {
        let duration = cli.duration.unwrap_or(15);
        anyhow::ensure!(
            [15, 30, 45, 60].contains(&duration),
            "duration must be 15, 30, 45 or 60 minutes"
        );
    }

    let interview = InterviewConfig {
        domain: cli.domain.clone(),
        mode: cli.mode,
        duration_minutes: match cli.mode {
            Mode::Timed => Some(cli.duration.unwrap_or(15)),
            Mode::Practice => None,
        },
        question_count: cli.questions,
        difficulty: cli.difficulty,
        resume: None,
    };
    interview.validate()?;

    info!("{} starting a {} session", cfg.service.name, cli.domain);

    let script = scripted_answers(&cli.domain, cli.questions as usize);
    let word_delay = Duration::from_millis(cfg.capture.partial_interval_ms);

    let synthesizer = Arc::new(SimulatedSynthesizer::new(cfg.narration.words_per_minute));
    let backend = ScriptedCapture::new(script.clone()).with_word_delay(word_delay);

    let (controller, handle) = SessionController::new(interview, synthesizer, Box::new(backend));
    let session_id = controller.session_id().to_string();

    let session = tokio::spawn(controller.run());

    // Drive the session the way a candidate would: record each answer,
    // then move on.
    let mut snapshots = handle.subscribe();
    snapshots
        .wait_for(|s| !matches!(s.phase, Phase::Initializing))
        .await?;
    let total = snapshots.borrow().question_count;

    if total == 0 {
        warn!("No questions available for domain {}; finishing", cli.domain);
        handle.finish().await;
    }

    for idx in 0..total {
        handle.start_recording().await;
        snapshots
            .wait_for(|s| matches!(s.phase, Phase::Recording(i) if i == idx))
            .await?;

        // Leave the floor open long enough for the whole scripted answer.
        let words = script[idx].split_whitespace().count() as u32;
        tokio::time::sleep(word_delay * (words + 3)).await;

        handle.stop_recording().await;
        snapshots
            .wait_for(|s| matches!(s.phase, Phase::AwaitingAnswer(i) if i == idx))
            .await?;

        handle.advance().await;
    }

    let mut result = session.await?;

    // Externalize audio artifacts, then report without the raw samples.
    let recordings_dir = Path::new(&cfg.audio.recordings_path);
    for answer in &mut result.answers {
        if let Some(audio) = answer.audio.take() {
            if let Err(e) = audio.save_to(recordings_dir, &format!("{session_id}-{}", answer.question_id)) {
                warn!("Could not save audio for {}: {}", answer.question_id, e);
            }
        }
    }

    info!(
        "Overall score {:.2} across {} answers",
        result.overall_score,
        result.answers.len()
    );
    for strength in &result.strengths {
        info!("Strength: {}", strength);
    }
    for improvement in &result.improvements {
        info!("Improvement: {}", improvement);
    }

    let metrics = performance_metrics(&result);
    println!("{}", serde_json::to_string_pretty(&result)?);
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    Ok(())
}

/// Canned answers for the demo, seeded with real domain vocabulary so
/// the scoring engine has something to find.
fn scripted_answers(domain: &str, count: usize) -> Vec<String> {
    let keywords: Vec<&str> = Domain::parse(domain)
        .map(|d| d.keywords().to_vec())
        .unwrap_or_default();

    (0..count)
        .map(|i| {
            let pick = |offset: usize| -> String {
                if keywords.is_empty() {
                    "the fundamentals".to_string()
                } else {
                    keywords[(i + offset) % keywords.len()].to_string()
                }
            };
            format!(
                "In my experience, {} is the first thing to get right. \
                 For example, on a recent project we leaned on {} and {} while \
                 measuring the outcome carefully. That approach held up well in review, \
                 and the team kept iterating on it afterwards.",
                pick(0),
                pick(1),
                pick(2)
            )
        })
        .collect()
}
