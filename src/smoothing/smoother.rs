//! Temporal smoothing — turns a noisy observation stream into committed
//! letters.
//!
//! A single frame is never trusted: a letter is committed only after a run
//! of `window_size` identical observations at or above the commit threshold.
//!
//! ## Algorithm
//!
//! Per observation:
//!
//! 1. Absent, or confidence below the commit threshold → the *entire* window
//!    is cleared.  A single weak frame invalidates the run rather than being
//!    skipped, so a classifier flickering at low confidence cannot corrupt
//!    an otherwise-consistent run.
//! 2. Otherwise the letter is pushed, evicting the oldest beyond capacity.
//! 3. When the window is full and unanimous, the letter is committed and the
//!    window cleared.
//!
//! The commit threshold is deliberately stricter than the classifier's own
//! minimum-confidence cutoff (which turns weak frames into `Absent` before
//! they ever reach this module): passing the recognizer is not the same as
//! being steady enough to type.

use crate::classify::{Letter, Observation};
use crate::smoothing::window::SmoothingWindow;

// ---------------------------------------------------------------------------
// TemporalSmoother
// ---------------------------------------------------------------------------

/// Debounces per-frame observations into committed letters.
///
/// # Example
///
/// ```rust
/// use sign_to_text::classify::{Letter, Observation};
/// use sign_to_text::smoothing::TemporalSmoother;
///
/// let mut smoother = TemporalSmoother::new(3, 0.62);
/// let a = Letter::new('A').unwrap();
///
/// assert_eq!(smoother.observe(Observation::sign(a, 0.9)), None);
/// assert_eq!(smoother.observe(Observation::sign(a, 0.9)), None);
/// assert_eq!(smoother.observe(Observation::sign(a, 0.9)), Some(a));
/// ```
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    window: SmoothingWindow,
    /// Minimum confidence for a letter to enter the window (inclusive).
    commit_threshold: f32,
}

impl TemporalSmoother {
    /// Creates a smoother committing after `window_size` identical letters
    /// at confidence `>= commit_threshold`.
    pub fn new(window_size: usize, commit_threshold: f32) -> Self {
        Self {
            window: SmoothingWindow::new(window_size),
            commit_threshold,
        }
    }

    /// Feeds one observation; returns the committed letter when a run
    /// completes.
    ///
    /// On commit the window is cleared, so the same run can never commit
    /// twice.
    pub fn observe(&mut self, observation: Observation) -> Option<Letter> {
        let (letter, confidence) = match observation {
            Observation::Sign { letter, confidence } => (letter, confidence),
            Observation::Absent => {
                self.window.clear();
                return None;
            }
        };

        // Boundary is inclusive: exactly-at-threshold frames are accepted.
        if confidence < self.commit_threshold {
            self.window.clear();
            return None;
        }

        self.window.push(letter);

        let committed = self.window.unanimous()?;
        self.window.clear();
        Some(committed)
    }

    /// Clears any partial run (pipeline stop / reset).
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Number of letters in the current partial run's window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// The commit confidence threshold.
    pub fn commit_threshold(&self) -> f32 {
        self.commit_threshold
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const C: f32 = 0.62;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn sign(c: char, confidence: f32) -> Observation {
        Observation::sign(letter(c), confidence)
    }

    fn smoother() -> TemporalSmoother {
        TemporalSmoother::new(3, C)
    }

    #[test]
    fn two_identical_letters_never_commit() {
        let mut s = smoother();
        assert_eq!(s.observe(sign('A', 0.9)), None);
        assert_eq!(s.observe(sign('A', 0.9)), None);
        assert_eq!(s.window_len(), 2);
    }

    #[test]
    fn three_identical_letters_commit_once_and_clear() {
        let mut s = smoother();
        s.observe(sign('A', 0.9));
        s.observe(sign('A', 0.9));
        assert_eq!(s.observe(sign('A', 0.9)), Some(letter('A')));
        assert_eq!(s.window_len(), 0, "window must be empty after commit");

        // The cleared window means the run does not re-commit.
        assert_eq!(s.observe(sign('A', 0.9)), None);
    }

    #[test]
    fn confidence_exactly_at_threshold_is_accepted() {
        let mut s = smoother();
        s.observe(sign('B', C));
        s.observe(sign('B', C));
        assert_eq!(s.observe(sign('B', C)), Some(letter('B')));
    }

    #[test]
    fn confidence_below_threshold_clears_entire_window() {
        let mut s = smoother();
        s.observe(sign('A', 0.9));
        s.observe(sign('A', 0.9));

        // One weak frame discards the whole run, not just itself.
        assert_eq!(s.observe(sign('A', C - 0.01)), None);
        assert_eq!(s.window_len(), 0);
    }

    #[test]
    fn absence_clears_entire_window() {
        let mut s = smoother();
        s.observe(sign('A', 0.9));
        s.observe(sign('A', 0.9));
        assert_eq!(s.observe(Observation::Absent), None);
        assert_eq!(s.window_len(), 0);
    }

    #[test]
    fn weak_frame_between_strong_letters_leaves_window_of_one() {
        let mut s = smoother();
        s.observe(sign('A', 0.9));
        s.observe(sign('A', 0.3)); // clears
        s.observe(sign('A', 0.9)); // only the post-clear letter remains
        assert_eq!(s.window_len(), 1);
    }

    #[test]
    fn mixed_run_keeps_sliding_without_commit() {
        let mut s = smoother();
        s.observe(sign('A', 0.9));
        s.observe(sign('A', 0.9));
        assert_eq!(s.observe(sign('B', 0.9)), None);

        // [A, A, B] — three most recent, not identical, no full reset.
        assert_eq!(s.window_len(), 3);

        // Two more Bs slide the As out and commit B.
        assert_eq!(s.observe(sign('B', 0.9)), None);
        assert_eq!(s.observe(sign('B', 0.9)), Some(letter('B')));
    }

    #[test]
    fn reset_discards_partial_run() {
        let mut s = smoother();
        s.observe(sign('A', 0.9));
        s.observe(sign('A', 0.9));
        s.reset();
        assert_eq!(s.window_len(), 0);
        assert_eq!(s.observe(sign('A', 0.9)), None);
    }
}
