//! sign-to-text — turns a noisy stream of per-frame fingerspelling
//! classifications into stable letters and words.
//!
//! The recognizer model, the camera, and the UI all live outside this crate.
//! What lives here is everything in between:
//!
//! * [`capture`] — frame values and the single-flight admission gate,
//! * [`classify`] — the classifier boundary (`(letter, confidence)` or
//!   absent),
//! * [`smoothing`] — the temporal debounce that commits a letter only after
//!   a sustained identical run,
//! * [`word`] — word assembly, history, and the lowered-hand auto-boundary,
//! * [`pipeline`] — the orchestrator state machine tying it together,
//! * [`config`] — TOML-backed settings with the tuned default thresholds.
//!
//! See [`pipeline::PipelineOrchestrator`] for the wiring entry point.

pub mod capture;
pub mod classify;
pub mod config;
pub mod pipeline;
pub mod smoothing;
pub mod word;
