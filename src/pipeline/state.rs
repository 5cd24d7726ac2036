//! Pipeline state machine and shared session state.
//!
//! [`PipelineState`] drives the orchestrator's state machine.  The UI reads
//! it via [`SharedState`] to render the appropriate view.
//!
//! [`SessionState`] is the published snapshot of everything an observer
//! needs: current pipeline phase, the word being buffered, confirmed word
//! history, and the most recent raw confidence.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>` — cheap to
//! clone and safe to share across threads.  Only the pipeline task writes it.

use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the sign-to-text pipeline.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──start──▶ Detecting ──frame admitted──▶ Processing
/// Processing ──round-trip + throttle delay──▶ Detecting
/// Detecting / Processing ──stop──▶ Idle
/// any ──letter committed──▶ BufferingWord(partial)
/// any ──word finalized──▶ WordComplete(word)
/// any ──per-frame failure──▶ Error(message)   (self-heals next cycle)
/// ```
///
/// There is no terminal state; `Error` is observational only and the loop
/// always schedules the next detecting cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Not accepting frames; waiting for a start command.
    Idle,

    /// Gate open — waiting for the next frame from the camera binding.
    Detecting,

    /// A frame has been admitted; classification is in flight.
    Processing,

    /// A letter was committed; carries the partial word built so far.
    BufferingWord(String),

    /// A word was finalized (explicit confirm or auto-boundary).
    WordComplete(String),

    /// A recoverable per-frame failure.  The pipeline returns to
    /// `Detecting` on the next cycle.
    Error(String),
}

impl PipelineState {
    /// Returns `true` while a classification round-trip is in flight.
    ///
    /// ```
    /// use sign_to_text::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(!PipelineState::Detecting.is_busy());
    /// assert!(PipelineState::Processing.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, PipelineState::Processing)
    }

    /// A short human-readable label suitable for a status display.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Detecting => "Detecting",
            PipelineState::Processing => "Processing",
            PipelineState::BufferingWord(_) => "Buffering",
            PipelineState::WordComplete(_) => "Word complete",
            PipelineState::Error(_) => "Error",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Published snapshot of the session — the single source of truth for
/// observers.
///
/// Held behind [`SharedState`] (`Arc<Mutex<SessionState>>`).  The pipeline
/// task mutates it; observers read it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current phase of the pipeline.
    pub pipeline: PipelineState,

    /// The word currently being buffered (empty between words).
    pub current_word: String,

    /// Confirmed words, oldest first.
    pub history: Vec<String>,

    /// Most recent raw classification confidence — `0.0` when the last
    /// frame was absent.  Feeds live confidence widgets.
    pub last_confidence: f32,
}

impl SessionState {
    /// Create a fresh session in the idle state.
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] wrapping a default [`SessionState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(SessionState::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_processing_is_busy() {
        assert!(!PipelineState::Idle.is_busy());
        assert!(!PipelineState::Detecting.is_busy());
        assert!(PipelineState::Processing.is_busy());
        assert!(!PipelineState::BufferingWord("A".into()).is_busy());
        assert!(!PipelineState::WordComplete("AB".into()).is_busy());
        assert!(!PipelineState::Error("boom".into()).is_busy());
    }

    #[test]
    fn labels_cover_every_state() {
        assert_eq!(PipelineState::Idle.label(), "Idle");
        assert_eq!(PipelineState::Detecting.label(), "Detecting");
        assert_eq!(PipelineState::Processing.label(), "Processing");
        assert_eq!(PipelineState::BufferingWord("A".into()).label(), "Buffering");
        assert_eq!(
            PipelineState::WordComplete("AB".into()).label(),
            "Word complete"
        );
        assert_eq!(PipelineState::Error("x".into()).label(), "Error");
    }

    #[test]
    fn default_pipeline_state_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    #[test]
    fn state_payloads_compare_by_value() {
        assert_eq!(
            PipelineState::BufferingWord("AB".into()),
            PipelineState::BufferingWord("AB".into())
        );
        assert_ne!(
            PipelineState::WordComplete("AB".into()),
            PipelineState::WordComplete("BA".into())
        );
    }

    #[test]
    fn session_state_defaults() {
        let state = SessionState::new();
        assert_eq!(state.pipeline, PipelineState::Idle);
        assert!(state.current_word.is_empty());
        assert!(state.history.is_empty());
        assert!((state.last_confidence - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state();
        let state2 = Arc::clone(&state);

        state.lock().unwrap().pipeline = PipelineState::Detecting;
        assert_eq!(state2.lock().unwrap().pipeline, PipelineState::Detecting);
    }
}
