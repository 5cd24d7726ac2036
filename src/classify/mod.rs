//! Classification boundary — the pipeline's view of the recognizer.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │               Classifier (trait)               │
//! │                                                │
//! │   Frame ──▶ classify() ──▶ Observation         │
//! │                     │        Sign { letter,    │
//! │                     │               confidence }│
//! │                     │        Absent            │
//! │                     └──▶ ClassifyError         │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! The model itself (landmarks, features, weights, warm-up) lives outside
//! this crate; only the `(letter, confidence)`-or-absent contract crosses
//! the boundary.

pub mod classifier;
pub mod observation;

pub use classifier::{Classifier, ClassifyError, ConfidenceCutoff, ScriptedClassifier};
pub use observation::{Letter, Observation};
