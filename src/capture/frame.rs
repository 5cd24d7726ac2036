//! Frame values delivered by a camera binding.
//!
//! The core never talks to a camera directly — some external binding
//! (AVFoundation, V4L2, a test harness) produces [`Frame`]s and pushes them
//! into the pipeline's frame channel.  A frame is immutable once produced
//! and is moved into the pipeline for exactly one classification round-trip.
//!
//! [`SyntheticFrameSource`] is a stand-in producer used by the demo binary
//! and the orchestrator tests: it emits blank frames on a fixed interval so
//! the pipeline has something to admit and throttle.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A single camera frame handed to the pipeline.
///
/// The pixel payload is opaque to the core — only the [`Classifier`] ever
/// interprets it.  `timestamp` and `sequence` exist for logging and gap
/// detection, not for reordering: ordering is guaranteed by the single-flight
/// admission gate, not by these fields.
///
/// [`Classifier`]: crate::classify::Classifier
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel payload (layout is the producer's business).
    pub bytes: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Clockwise rotation in degrees needed to display upright (0/90/180/270).
    pub rotation: u32,
    /// When the producer captured this frame.
    pub timestamp: Instant,
    /// Monotonic per-producer sequence number.
    pub sequence: u64,
}

impl Frame {
    /// Creates a new frame.
    pub fn new(bytes: Vec<u8>, width: u32, height: u32, rotation: u32, sequence: u64) -> Self {
        Self {
            bytes,
            width,
            height,
            rotation,
            timestamp: Instant::now(),
            sequence,
        }
    }
}

// ---------------------------------------------------------------------------
// SyntheticFrameSource
// ---------------------------------------------------------------------------

/// Generates blank frames on a fixed interval — a camera stand-in for the
/// demo binary and tests.
///
/// Frames are offered with `try_send`: when the pipeline's channel is full
/// the frame is dropped on the floor, matching the live-feed policy that
/// staleness is worse than loss.
#[derive(Debug, Clone)]
pub struct SyntheticFrameSource {
    width: u32,
    height: u32,
    interval: Duration,
}

impl SyntheticFrameSource {
    /// Creates a source producing `width`×`height` frames every `interval`.
    pub fn new(width: u32, height: u32, interval: Duration) -> Self {
        Self {
            width,
            height,
            interval,
        }
    }

    /// Spawns the producer task.  It runs until `tx` is closed (every
    /// receiver dropped) or the returned handle is aborted.
    pub fn start(self, tx: mpsc::Sender<Frame>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut sequence: u64 = 0;
            let mut ticker = tokio::time::interval(self.interval);

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }

                let frame = Frame::new(
                    vec![0; (self.width * self.height) as usize],
                    self.width,
                    self.height,
                    0,
                    sequence,
                );
                sequence += 1;

                // Full channel means the pipeline is busy — drop, never queue.
                let _ = tx.try_send(frame);
            }

            log::debug!("capture: synthetic frame source stopped after {sequence} frames");
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_carries_dimensions_and_sequence() {
        let frame = Frame::new(vec![1, 2, 3], 640, 480, 90, 7);
        assert_eq!(frame.bytes, vec![1, 2, 3]);
        assert_eq!(frame.width, 640);
        assert_eq!(frame.height, 480);
        assert_eq!(frame.rotation, 90);
        assert_eq!(frame.sequence, 7);
    }

    #[tokio::test]
    async fn synthetic_source_emits_increasing_sequences() {
        let (tx, mut rx) = mpsc::channel(8);
        let source = SyntheticFrameSource::new(4, 4, Duration::from_millis(1));
        let handle = source.start(tx);

        let first = rx.recv().await.expect("first frame");
        let second = rx.recv().await.expect("second frame");
        assert!(second.sequence > first.sequence);
        assert_eq!(first.bytes.len(), 16);

        handle.abort();
    }

    #[tokio::test]
    async fn synthetic_source_stops_when_receiver_drops() {
        let (tx, rx) = mpsc::channel(1);
        let source = SyntheticFrameSource::new(2, 2, Duration::from_millis(1));
        let handle = source.start(tx);

        drop(rx);

        // The producer notices the closed channel on its next tick.
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("producer should exit")
            .expect("producer should not panic");
    }
}
