//! Per-frame classification results.
//!
//! An [`Observation`] is either a recognized letter with a confidence score
//! or an explicit [`Observation::Absent`] — "no hand visible" is a normal,
//! expected value, not an error.  Classifier failures are a separate thing
//! entirely ([`ClassifyError`](crate::classify::ClassifyError)).

use std::fmt;

// ---------------------------------------------------------------------------
// Letter
// ---------------------------------------------------------------------------

/// A single fingerspelling letter, `A`–`Z`.
///
/// Construction is validated, so downstream code (smoothing window, word
/// accumulator) never has to re-check what it is appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter(char);

impl Letter {
    /// Creates a letter from an ASCII uppercase character.
    ///
    /// Returns `None` for anything outside `A`–`Z`; lowercase input is not
    /// normalized — the recognizer's label set is uppercase by contract.
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self(c))
        } else {
            None
        }
    }

    /// The underlying character.
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::new(c).ok_or(c)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// What the classifier saw in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// A letter was recognized with the given confidence in `[0, 1]`.
    Sign {
        /// The recognized letter.
        letter: Letter,
        /// Classifier confidence, clamped into `[0, 1]` at construction.
        confidence: f32,
    },
    /// No hand was visible, or the classifier's own minimum-confidence
    /// cutoff rejected the frame.
    Absent,
}

impl Observation {
    /// Creates a sign observation, clamping `confidence` into `[0, 1]`.
    pub fn sign(letter: Letter, confidence: f32) -> Self {
        Self::Sign {
            letter,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Returns `true` when no sign was observed.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The raw confidence of this observation — `0.0` when absent.
    ///
    /// This is what the live-feedback confidence stream publishes.
    pub fn confidence(&self) -> f32 {
        match self {
            Self::Sign { confidence, .. } => *confidence,
            Self::Absent => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
