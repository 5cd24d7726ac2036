//! Frame delivery and admission — camera-facing edge of the pipeline.
//!
//! # Pipeline
//!
//! ```text
//! camera binding → Frame (mpsc) → FrameGate admit / drop → Classifier
//! ```
//!
//! The camera binding itself lives outside this crate; frames reach the core
//! over a `tokio::sync::mpsc` channel whose binding survives pipeline
//! stop/start cycles.  [`FrameGate`] enforces the single-in-flight admission
//! policy; excess frames are dropped, never queued.

pub mod frame;
pub mod gate;

pub use frame::{Frame, SyntheticFrameSource};
pub use gate::{AdmitGuard, FrameGate};
