//! Core classifier trait and the scripted test double.
//!
//! # Overview
//!
//! [`Classifier`] is the pipeline's view of the gesture-recognition model.
//! It is object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn Classifier>`, and async because inference latency is unbounded
//! (and must be cancellable from the pipeline's `select!`).
//!
//! Feature extraction, landmark detection and model weights all live behind
//! this boundary — the core only ever sees an [`Observation`] or an error.
//!
//! [`ScriptedClassifier`] replays a pre-configured sequence of results.  It
//! backs the orchestrator unit tests and the demo binary, which has no real
//! model to load.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::capture::Frame;
use crate::classify::Observation;

// ---------------------------------------------------------------------------
// ClassifyError
// ---------------------------------------------------------------------------

/// All errors that can arise from a classification round-trip.
///
/// Every variant is per-frame and recoverable: the pipeline logs it, treats
/// the frame as absent, and continues.
#[derive(Debug, Clone, Error)]
pub enum ClassifyError {
    /// The model rejected the frame (wrong dimensions, empty payload, …).
    #[error("frame rejected by classifier: {0}")]
    BadFrame(String),

    /// The inference pass itself failed.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The model has not finished loading / warming up.
    #[error("classifier is not ready")]
    NotReady,
}

// ---------------------------------------------------------------------------
// Classifier trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to the gesture-recognition model.
///
/// # Contract
///
/// - The frame is consumed; it is logically destroyed when the call returns.
/// - `Ok(Observation::Absent)` means "no hand" or "below the model's own
///   minimum-confidence cutoff" — it is **not** an error.
/// - Implementations must tolerate having the returned future dropped
///   (pipeline stop cancels an in-flight classification).
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one frame.
    async fn classify(&self, frame: Frame) -> Result<Observation, ClassifyError>;
}

// Compile-time assertion: Box<dyn Classifier> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Classifier>) {}
};

// ---------------------------------------------------------------------------
// ConfidenceCutoff
// ---------------------------------------------------------------------------

/// Wraps any classifier with its minimum-confidence cutoff: detections below
/// the cutoff are reported as [`Observation::Absent`].
///
/// This is the *recognizer's* notion of "nothing there" and is deliberately
/// looser than the smoother's commit threshold — a sign can be visible
/// enough to reset the absence streak yet still too shaky to type.
pub struct ConfidenceCutoff<C> {
    inner: C,
    min_confidence: f32,
}

impl<C: Classifier> ConfidenceCutoff<C> {
    /// Applies `min_confidence` (inclusive) in front of `inner`.
    pub fn new(inner: C, min_confidence: f32) -> Self {
        Self {
            inner,
            min_confidence,
        }
    }
}

#[async_trait]
impl<C: Classifier> Classifier for ConfidenceCutoff<C> {
    async fn classify(&self, frame: Frame) -> Result<Observation, ClassifyError> {
        let observation = self.inner.classify(frame).await?;
        Ok(match observation {
            Observation::Sign { confidence, .. } if confidence < self.min_confidence => {
                Observation::Absent
            }
            other => other,
        })
    }
}

// ---------------------------------------------------------------------------
// ScriptedClassifier
// ---------------------------------------------------------------------------

/// A classifier double that replays a fixed script of results.
///
/// Each `classify` call pops the next scripted entry; once the script is
/// exhausted every further call returns `Ok(Observation::Absent)`.  An
/// optional per-call latency makes throttle and cancellation behaviour
/// observable in tests.
///
/// # Example
///
/// ```rust
/// use sign_to_text::classify::{Letter, Observation, ScriptedClassifier};
///
/// let h = Letter::new('H').unwrap();
/// let script = vec![
///     Ok(Observation::sign(h, 0.9)),
///     Ok(Observation::Absent),
/// ];
/// let classifier = ScriptedClassifier::new(script);
/// # let _ = classifier;
/// ```
pub struct ScriptedClassifier {
    script: Mutex<VecDeque<Result<Observation, ClassifyError>>>,
    latency: Duration,
}

impl ScriptedClassifier {
    /// Creates a classifier that replays `script` in order.
    pub fn new(script: Vec<Result<Observation, ClassifyError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            latency: Duration::ZERO,
        }
    }

    /// Convenience: a script of all-successful observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self::new(observations.into_iter().map(Ok).collect())
    }

    /// Adds a fixed latency to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of scripted entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, _frame: Frame) -> Result<Observation, ClassifyError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or(Ok(Observation::Absent))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
