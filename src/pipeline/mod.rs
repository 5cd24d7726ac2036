//! Pipeline orchestrator module — frame admission to confirmed words.
//!
//! This module wires the full frame → classify → smooth → word pipeline and
//! exposes the shared session snapshot that observers read.
//!
//! # Architecture
//!
//! ```text
//! Frame (mpsc)          PipelineCommand (mpsc)
//!      │                        │
//!      ▼                        ▼
//! PipelineOrchestrator::run()  ← single async tokio task
//!      │
//!      ├─ FrameGate admit / drop (single in-flight, load shedding)
//!      ├─ Classifier::classify(frame).await      → Processing
//!      ├─ TemporalSmoother::observe(observation) → maybe commit
//!      ├─ WordAssembler (letters, auto-boundary) → maybe word
//!      └─ throttle delay                         → Detecting
//!
//! SharedState (Arc<Mutex<SessionState>>) ←── read by observers
//! PipelineEvent (mpsc)                    ←── state / result / confidence
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use sign_to_text::classify::{Classifier, ScriptedClassifier};
//! use sign_to_text::config::AppConfig;
//! use sign_to_text::pipeline::{new_shared_state, PipelineCommand, PipelineOrchestrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let shared_state = new_shared_state();
//!     let classifier: Arc<dyn Classifier> =
//!         Arc::new(ScriptedClassifier::from_observations(vec![]));
//!
//!     let (command_tx, command_rx) = mpsc::channel(16);
//!     let (frame_tx, frame_rx) = mpsc::channel(1);
//!     let (event_tx, mut event_rx) = mpsc::channel(64);
//!
//!     let orchestrator =
//!         PipelineOrchestrator::new(shared_state.clone(), classifier, &config);
//!     tokio::spawn(orchestrator.run(command_rx, frame_rx, event_tx));
//!
//!     command_tx.send(PipelineCommand::Start).await.unwrap();
//!     // frame_tx goes to the camera binding; event_rx feeds the UI.
//!     # let _ = (frame_tx, event_rx.recv());
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineCommand, PipelineEvent, PipelineOrchestrator};
pub use state::{new_shared_state, PipelineState, SessionState, SharedState};
