//! Application entry point — sign-to-text demo driver.
//!
//! There is no camera or model in this binary: a [`SyntheticFrameSource`]
//! stands in for the camera and a [`ScriptedClassifier`] replays a canned
//! recognition stream through the *real* pipeline, so the full admission →
//! smoothing → word-boundary path can be watched from a terminal.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create pipeline channels (`command`, `frame`, `event`).
//! 4. Spawn the pipeline orchestrator.
//! 5. Start the synthetic frame source.
//! 6. Print pipeline events until the scripted word completes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use sign_to_text::capture::SyntheticFrameSource;
use sign_to_text::classify::{
    Classifier, ConfidenceCutoff, Letter, Observation, ScriptedClassifier,
};
use sign_to_text::config::AppConfig;
use sign_to_text::pipeline::{
    new_shared_state, PipelineCommand, PipelineEvent, PipelineOrchestrator,
};

/// Builds the canned recognition stream: a steady "H", a steady "I", then a
/// lowered hand long enough to trigger the auto-boundary.
fn demo_script(config: &AppConfig) -> Vec<Observation> {
    let h = Letter::new('H').expect("valid letter");
    let i = Letter::new('I').expect("valid letter");

    let mut script = Vec::new();
    script.extend(vec![Observation::sign(h, 0.91); config.smoothing.window_size]);
    // One noisy flicker the smoother must absorb.
    script.push(Observation::sign(i, 0.45));
    script.extend(vec![Observation::sign(i, 0.88); config.smoothing.window_size]);
    script.extend(vec![Observation::Absent; config.word.absence_frames as usize]);
    script
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;
    log::info!(
        "demo: window={} commit_threshold={} absence_frames={} frame_delay={}ms",
        config.smoothing.window_size,
        config.smoothing.commit_threshold,
        config.word.absence_frames,
        config.pipeline.frame_delay_ms,
    );

    let shared_state = new_shared_state();
    let classifier: Arc<dyn Classifier> = Arc::new(ConfidenceCutoff::new(
        ScriptedClassifier::from_observations(demo_script(&config)),
        config.classifier.min_confidence,
    ));

    let (command_tx, command_rx) = mpsc::channel(config.pipeline.command_buffer);
    let (frame_tx, frame_rx) = mpsc::channel(config.pipeline.frame_buffer);
    let (event_tx, mut event_rx) = mpsc::channel(config.pipeline.event_buffer);

    let orchestrator =
        PipelineOrchestrator::new(Arc::clone(&shared_state), classifier, &config);
    let pipeline = tokio::spawn(orchestrator.run(command_rx, frame_rx, event_tx));

    let source = SyntheticFrameSource::new(
        config.capture.width,
        config.capture.height,
        Duration::from_millis(config.capture.frame_interval_ms),
    );
    let producer = source.start(frame_tx);

    command_tx.send(PipelineCommand::Start).await?;
    println!("pipeline started — spelling the demo word");

    while let Some(event) = event_rx.recv().await {
        match event {
            PipelineEvent::StateChanged(state) => {
                log::debug!("state → {}", state.label());
            }
            PipelineEvent::ConfidenceUpdate { value } => {
                log::debug!("confidence {value:.2}");
            }
            PipelineEvent::LetterCommitted { letter, word } => {
                println!("committed letter {letter} — word so far: {word:?}");
            }
            PipelineEvent::WordCompleted { word } => {
                println!("word complete: {word:?}");
                break;
            }
        }
    }

    command_tx.send(PipelineCommand::Stop).await?;
    drop(command_tx);
    producer.abort();
    pipeline.await?;

    let history = shared_state.lock().unwrap().history.clone();
    println!("session history: {history:?}");
    Ok(())
}
