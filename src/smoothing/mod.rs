//! Temporal smoothing — debounce the raw observation stream.
//!
//! The recognizer labels every frame independently; this module decides
//! which labels were *meant*.  See [`TemporalSmoother`] for the algorithm.

pub mod smoother;
pub mod window;

pub use smoother::TemporalSmoother;
pub use window::SmoothingWindow;
