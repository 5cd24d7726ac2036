//! Pipeline orchestrator — drives the frame → classify → smooth → word loop.
//!
//! [`PipelineOrchestrator`] owns the [`SharedState`] and responds to
//! [`PipelineCommand`]s received over a `tokio::sync::mpsc` channel while
//! consuming [`Frame`]s from a second channel.
//!
//! # Pipeline flow
//!
//! ```text
//! PipelineCommand::Start
//!   └─▶ state = Detecting, frames now admitted
//!
//! Frame arrives (while active)
//!   └─▶ FrameGate admit ── busy? drop frame, done
//!         └─▶ state = Processing
//!         └─▶ classifier.classify(frame).await        (cancellable)
//!               ├─ Ok(Sign)   → smoother → maybe commit → word assembler
//!               ├─ Ok(Absent) → clear window, count toward auto-boundary
//!               └─ Err        → state = Error(msg), treated as absent
//!         └─▶ throttle delay (bounds classifier call rate)  (cancellable)
//!         └─▶ state = Detecting
//! ```
//!
//! One task owns every piece of mutable session state (smoothing window,
//! absence streak, word, history); observers only read the published
//! [`SharedState`] snapshot and the event stream.  Any command arriving
//! while a classification or the throttle sleep is pending wins the
//! `select!`, which drops the in-flight future; the RAII gate guard
//! releases the gate on that path as on every other.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::capture::{Frame, FrameGate};
use crate::classify::{Classifier, ClassifyError, Letter, Observation};
use crate::config::AppConfig;
use crate::smoothing::TemporalSmoother;
use crate::word::WordAssembler;

use super::state::{PipelineState, SharedState};

// ---------------------------------------------------------------------------
// PipelineCommand / PipelineEvent
// ---------------------------------------------------------------------------

/// Commands sent from the presentation layer to the pipeline orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineCommand {
    /// Begin admitting frames.
    Start,
    /// Stop admitting frames; cancels any in-flight classification, zeroes
    /// the smoothing window and absence streak, and frees the gate.  The
    /// buffered word and history survive.
    Stop,
    /// Finalize the current word.  Silent no-op when the word is blank.
    ConfirmWord,
    /// Clear word, history, smoothing window and absence streak.  The frame
    /// channel binding is untouched.
    Reset,
}

/// Events delivered from the pipeline to observers.
///
/// This single stream carries the state transitions, the committed-result
/// events, and the live confidence feed.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The pipeline entered a new state.
    StateChanged(PipelineState),
    /// The smoother committed a letter; `word` is the partial word so far.
    LetterCommitted { letter: Letter, word: String },
    /// A word was finalized, explicitly or by auto-boundary.
    WordCompleted { word: String },
    /// Raw confidence of the most recent classification — `0.0` when the
    /// frame was absent or failed.
    ConfidenceUpdate { value: f32 },
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the complete sign-to-text pipeline.
///
/// Create with [`PipelineOrchestrator::new`], then call [`run`](Self::run)
/// inside a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use sign_to_text::classify::{Classifier, ScriptedClassifier};
/// use sign_to_text::config::AppConfig;
/// use sign_to_text::pipeline::{new_shared_state, PipelineCommand, PipelineOrchestrator};
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let shared_state = new_shared_state();
/// let classifier: Arc<dyn Classifier> =
///     Arc::new(ScriptedClassifier::from_observations(vec![]));
///
/// let (command_tx, command_rx) = tokio::sync::mpsc::channel(16);
/// let (frame_tx, frame_rx) = tokio::sync::mpsc::channel(1);
/// let (event_tx, event_rx) = tokio::sync::mpsc::channel(64);
///
/// let orchestrator = PipelineOrchestrator::new(shared_state, classifier, &config);
/// tokio::spawn(orchestrator.run(command_rx, frame_rx, event_tx));
///
/// command_tx.send(PipelineCommand::Start).await.unwrap();
/// // frame_tx is handed to the camera binding; event_rx to the UI.
/// # let _ = (frame_tx, event_rx);
/// # }
/// ```
pub struct PipelineOrchestrator {
    state: SharedState,
    classifier: Arc<dyn Classifier>,
    gate: Arc<FrameGate>,
    smoother: TemporalSmoother,
    assembler: WordAssembler,
    /// Fixed delay after every classification round-trip.
    frame_delay: Duration,
    /// External readiness input — model warm-up happens outside this core.
    ready: bool,
    /// Whether frames are currently admitted (start/stop).
    active: bool,
    event_tx: Option<mpsc::Sender<PipelineEvent>>,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state`      — shared session snapshot (also read by the UI).
    /// * `classifier` — gesture recognizer (e.g. a model-backed classifier).
    /// * `config`     — smoothing, word-boundary and throttle settings.
    pub fn new(state: SharedState, classifier: Arc<dyn Classifier>, config: &AppConfig) -> Self {
        Self {
            state,
            classifier,
            gate: Arc::new(FrameGate::new()),
            smoother: TemporalSmoother::new(
                config.smoothing.window_size,
                config.smoothing.commit_threshold,
            ),
            assembler: WordAssembler::new(config.word.absence_frames),
            frame_delay: Duration::from_millis(config.pipeline.frame_delay_ms),
            ready: true,
            active: false,
            event_tx: None,
        }
    }

    /// Sets the external "classifier ready" input.  A pipeline that is not
    /// ready ignores `Start` and stays idle.
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// The admission gate, for wiring into diagnostics.
    pub fn gate(&self) -> Arc<FrameGate> {
        Arc::clone(&self.gate)
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until the command channel closes (or the frame
    /// channel closes while frames are being consumed).
    ///
    /// This is an `async fn` and should be spawned as a tokio task.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::Receiver<PipelineCommand>,
        mut frame_rx: mpsc::Receiver<Frame>,
        event_tx: mpsc::Sender<PipelineEvent>,
    ) {
        self.event_tx = Some(event_tx);

        loop {
            if self.active {
                tokio::select! {
                    biased;
                    cmd = command_rx.recv() => match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => break,
                    },
                    frame = frame_rx.recv() => match frame {
                        Some(frame) => self.process_frame(frame, &mut command_rx).await,
                        None => {
                            log::info!("pipeline: frame channel closed");
                            break;
                        }
                    },
                }
            } else {
                // Idle: only commands matter, but keep draining the frame
                // channel so the camera binding survives stop/start cycles.
                tokio::select! {
                    biased;
                    cmd = command_rx.recv() => match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => break,
                    },
                    frame = frame_rx.recv() => match frame {
                        Some(_) => {} // dropped while stopped
                        None => {
                            log::info!("pipeline: frame channel closed");
                            break;
                        }
                    },
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handling
    // -----------------------------------------------------------------------

    async fn handle_command(&mut self, cmd: PipelineCommand) {
        match cmd {
            PipelineCommand::Start => {
                if self.active {
                    log::debug!("pipeline: Start ignored — already running");
                    return;
                }
                if !self.ready {
                    log::warn!("pipeline: Start ignored — classifier not ready");
                    return;
                }
                log::debug!("pipeline: Start → Detecting");
                self.active = true;
                self.publish_state(PipelineState::Detecting).await;
            }

            PipelineCommand::Stop => {
                log::debug!("pipeline: Stop → Idle");
                self.active = false;
                self.smoother.reset();
                self.assembler.on_presence(); // zeroes the absence streak
                self.gate.release();
                self.publish_state(PipelineState::Idle).await;
            }

            PipelineCommand::ConfirmWord => {
                if let Some(word) = self.assembler.confirm() {
                    self.publish_word_complete(word).await;
                }
                // Blank word: no event, no transition — asserted by tests.
            }

            PipelineCommand::Reset => {
                log::debug!("pipeline: Reset — clearing session");
                self.smoother.reset();
                self.assembler.reset();
                let mut st = self.state.lock().unwrap();
                st.current_word.clear();
                st.history.clear();
                st.last_confidence = 0.0;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Frame processing
    // -----------------------------------------------------------------------

    /// One classification round-trip: admit → classify → smooth → throttle.
    ///
    /// `command_rx` is raced against both suspension points so a command can
    /// cancel the cycle; the frame is then lost, which is indistinguishable
    /// from an admission drop.
    async fn process_frame(
        &mut self,
        frame: Frame,
        command_rx: &mut mpsc::Receiver<PipelineCommand>,
    ) {
        // Gate released when `_guard` drops, on every exit path.
        let Some(_guard) = self.gate.admit() else {
            log::debug!("pipeline: frame {} dropped — gate busy", frame.sequence);
            return;
        };

        self.publish_state(PipelineState::Processing).await;

        let sequence = frame.sequence;
        let classifier = Arc::clone(&self.classifier);
        let outcome = tokio::select! {
            biased;
            cmd = command_rx.recv() => {
                log::debug!("pipeline: command during classification of frame {sequence}");
                match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => self.active = false,
                }
                return;
            }
            outcome = classifier.classify(frame) => outcome,
        };

        self.handle_outcome(outcome).await;

        // The throttle runs regardless of outcome to bound the classifier
        // call rate.
        tokio::select! {
            biased;
            cmd = command_rx.recv() => {
                match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => self.active = false,
                }
                return;
            }
            _ = tokio::time::sleep(self.frame_delay) => {}
        }

        if self.active {
            self.publish_state(PipelineState::Detecting).await;
        }
    }

    /// Folds one round-trip result into the smoother and word assembler.
    async fn handle_outcome(&mut self, outcome: Result<Observation, ClassifyError>) {
        let observation = match outcome {
            Ok(observation) => observation,
            Err(e) => {
                // Contained per-frame failure: surface one Error cycle, then
                // degrade to absence so smoothing and the auto-boundary see
                // a consistent stream.
                log::warn!("pipeline: classification failed: {e}");
                self.publish_state(PipelineState::Error(e.to_string())).await;
                Observation::Absent
            }
        };

        self.publish_confidence(observation.confidence()).await;

        if observation.is_absent() {
            self.smoother.observe(Observation::Absent);
            if let Some(word) = self.assembler.on_absence() {
                self.publish_word_complete(word).await;
            }
            return;
        }

        // Any visible sign resets the absence streak, even one the smoother
        // will reject as too weak.
        self.assembler.on_presence();

        if let Some(letter) = self.smoother.observe(observation) {
            self.assembler.push_letter(letter);
            let word = self.assembler.current_word().to_string();
            log::debug!("pipeline: committed {letter}, word = {word:?}");

            self.state.lock().unwrap().current_word = word.clone();
            self.emit(PipelineEvent::LetterCommitted {
                letter,
                word: word.clone(),
            })
            .await;
            self.publish_state(PipelineState::BufferingWord(word)).await;
        }
    }

    // -----------------------------------------------------------------------
    // Publishing helpers
    // -----------------------------------------------------------------------

    async fn publish_state(&self, state: PipelineState) {
        self.state.lock().unwrap().pipeline = state.clone();
        self.emit(PipelineEvent::StateChanged(state)).await;
    }

    async fn publish_confidence(&self, value: f32) {
        self.state.lock().unwrap().last_confidence = value;
        self.emit(PipelineEvent::ConfidenceUpdate { value }).await;
    }

    async fn publish_word_complete(&mut self, word: String) {
        {
            let mut st = self.state.lock().unwrap();
            st.current_word.clear();
            st.history = self.assembler.history().to_vec();
        }
        self.emit(PipelineEvent::WordCompleted { word: word.clone() })
            .await;
        self.publish_state(PipelineState::WordComplete(word)).await;
    }

    async fn emit(&self, event: PipelineEvent) {
        if let Some(tx) = &self.event_tx {
            if tx.send(event).await.is_err() {
                log::debug!("pipeline: event receiver dropped");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
