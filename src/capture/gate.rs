//! Single-flight frame admission gate.
//!
//! At most one frame may be in classification at any time.  Frames arriving
//! while the gate is busy are dropped outright — this is load shedding, not
//! a queue: for a live camera feed a stale frame is worse than a lost one.
//!
//! Every successful admission must be paired with exactly one release,
//! including on error and cancellation paths; a leaked admission would stall
//! every future frame.  [`FrameGate::admit`] returns an RAII [`AdmitGuard`]
//! so the release happens on drop no matter how the processing path exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// FrameGate
// ---------------------------------------------------------------------------

/// Busy/free admission gate backed by an atomic flag.
#[derive(Debug, Default)]
pub struct FrameGate {
    busy: AtomicBool,
}

impl FrameGate {
    /// Creates a gate in the free state.
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Attempts to move the gate from free to busy.
    ///
    /// Returns `true` exactly when the gate was free.  On `false` the caller
    /// must discard its frame — never buffer it for later.
    pub fn try_admit(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Returns the gate to the free state.
    ///
    /// Safe to call even when the gate is already free.
    pub fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }

    /// Returns `true` while a frame is in classification.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII admission on a shared gate.
impl FrameGate {
    /// Tries to admit a frame, returning a guard that releases the gate on
    /// drop.  `None` means busy — drop the frame.
    pub fn admit(self: &Arc<Self>) -> Option<AdmitGuard> {
        if self.try_admit() {
            Some(AdmitGuard {
                gate: Arc::clone(self),
            })
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// AdmitGuard
// ---------------------------------------------------------------------------

/// Holds an admission; releases the gate when dropped.
///
/// Dropping the guard is the *only* way the gate is released on the normal
/// processing path, so cancellation (a dropped future) and panics both
/// release correctly.
#[derive(Debug)]
pub struct AdmitGuard {
    gate: Arc<FrameGate>,
}

impl Drop for AdmitGuard {
    fn drop(&mut self) {
        self.gate.release();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_admit_fails_until_release() {
        let gate = FrameGate::new();

        assert!(gate.try_admit());
        assert!(gate.is_busy());
        assert!(!gate.try_admit());
        assert!(!gate.try_admit());

        gate.release();
        assert!(!gate.is_busy());
        assert!(gate.try_admit());
    }

    #[test]
    fn release_is_idempotent_on_free_gate() {
        let gate = FrameGate::new();
        gate.release();
        gate.release();
        assert!(gate.try_admit());
    }

    #[test]
    fn guard_releases_on_drop() {
        let gate = Arc::new(FrameGate::new());

        let guard = gate.admit().expect("free gate admits");
        assert!(gate.is_busy());
        assert!(gate.admit().is_none());

        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.admit().is_some());
    }

    #[test]
    fn guard_releases_on_panic_unwind() {
        let gate = Arc::new(FrameGate::new());
        let cloned = Arc::clone(&gate);

        let result = std::panic::catch_unwind(move || {
            let _guard = cloned.admit().expect("free gate admits");
            panic!("frame processing blew up");
        });

        assert!(result.is_err());
        assert!(!gate.is_busy());
    }

    #[test]
    fn concurrent_admission_admits_exactly_one() {
        let gate = Arc::new(FrameGate::new());
        let admitted: Vec<bool> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                std::thread::spawn(move || gate.try_admit())
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert_eq!(admitted.iter().filter(|&&a| a).count(), 1);
    }
}
