//! Word assembly and the auto-boundary rule.
//!
//! Committed letters accumulate into the current word.  A word is finalized
//! either explicitly (the user confirms) or automatically after a sustained
//! run of absent frames — the signer lowering their hand *is* the word
//! boundary.

// ---------------------------------------------------------------------------
// WordAssembler
// ---------------------------------------------------------------------------

use crate::classify::Letter;

/// Builds words from committed letters and keeps the session's word history.
///
/// Confirming a blank word is a silent no-op, never an error — a user can
/// mash the confirm button without consequence, and the absence counter can
/// hit its threshold with nothing buffered.
#[derive(Debug, Clone)]
pub struct WordAssembler {
    /// Letters committed since the last confirm.
    current: String,
    /// Confirmed words in confirmation order.  Append-only until `reset`.
    history: Vec<String>,
    /// Consecutive absent frames seen since the last real observation.
    absence_streak: u32,
    /// Absent-frame count at which a non-blank word auto-confirms.
    absence_threshold: u32,
}

impl WordAssembler {
    /// Creates an assembler that auto-confirms after `absence_threshold`
    /// consecutive absent frames.
    pub fn new(absence_threshold: u32) -> Self {
        Self {
            current: String::new(),
            history: Vec::new(),
            absence_streak: 0,
            absence_threshold,
        }
    }

    /// Appends a committed letter to the current word.
    pub fn push_letter(&mut self, letter: Letter) {
        self.current.push(letter.as_char());
    }

    /// Finalizes the current word into history.
    ///
    /// Returns the confirmed word, or `None` when the word is blank (no-op).
    pub fn confirm(&mut self) -> Option<String> {
        if self.current.is_empty() {
            return None;
        }
        let word = std::mem::take(&mut self.current);
        self.history.push(word.clone());
        log::debug!("word: confirmed {word:?} ({} total)", self.history.len());
        Some(word)
    }

    /// Records one absent frame.
    ///
    /// When the streak reaches the threshold and a word is buffered, the
    /// word is auto-confirmed and the streak reset — so the next absent
    /// frame starts counting from zero and cannot double-fire.
    pub fn on_absence(&mut self) -> Option<String> {
        self.absence_streak = self.absence_streak.saturating_add(1);
        if self.absence_streak >= self.absence_threshold {
            self.absence_streak = 0;
            if !self.current.is_empty() {
                log::debug!("word: auto-boundary after sustained absence");
                return self.confirm();
            }
        }
        None
    }

    /// Records a real observation — any visible sign, even one too weak for
    /// the smoother — resetting the absence streak.
    pub fn on_presence(&mut self) {
        self.absence_streak = 0;
    }

    /// Clears the current word, the history, and the absence streak.
    pub fn reset(&mut self) {
        self.current.clear();
        self.history.clear();
        self.absence_streak = 0;
    }

    /// The word being built right now.
    pub fn current_word(&self) -> &str {
        &self.current
    }

    /// All confirmed words, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Current consecutive-absence count.
    pub fn absence_streak(&self) -> u32 {
        self.absence_streak
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn assembler_with_word(word: &str) -> WordAssembler {
        let mut a = WordAssembler::new(4);
        for c in word.chars() {
            a.push_letter(letter(c));
        }
        a
    }

    #[test]
    fn letters_accumulate_left_to_right() {
        let a = assembler_with_word("AB");
        assert_eq!(a.current_word(), "AB");
    }

    #[test]
    fn confirm_moves_word_into_history() {
        let mut a = assembler_with_word("HI");
        assert_eq!(a.confirm(), Some("HI".to_string()));
        assert_eq!(a.current_word(), "");
        assert_eq!(a.history(), ["HI"]);
    }

    #[test]
    fn confirm_on_blank_word_is_a_silent_noop() {
        let mut a = WordAssembler::new(4);
        assert_eq!(a.confirm(), None);
        assert_eq!(a.confirm(), None); // idempotent
        assert!(a.history().is_empty());
        assert_eq!(a.current_word(), "");
    }

    #[test]
    fn history_preserves_confirmation_order() {
        let mut a = WordAssembler::new(4);
        a.push_letter(letter('A'));
        a.confirm();
        a.push_letter(letter('B'));
        a.confirm();
        assert_eq!(a.history(), ["A", "B"]);
    }

    #[test]
    fn absence_threshold_auto_confirms_exactly_once() {
        let mut a = assembler_with_word("OK");

        assert_eq!(a.on_absence(), None);
        assert_eq!(a.on_absence(), None);
        assert_eq!(a.on_absence(), None);
        assert_eq!(a.on_absence(), Some("OK".to_string()));

        // Counter was reset — the very next absent frame must not re-fire.
        assert_eq!(a.absence_streak(), 0);
        assert_eq!(a.on_absence(), None);
        assert_eq!(a.history(), ["OK"]);
    }

    #[test]
    fn absence_threshold_with_blank_word_does_nothing() {
        let mut a = WordAssembler::new(2);
        assert_eq!(a.on_absence(), None);
        assert_eq!(a.on_absence(), None);
        assert!(a.history().is_empty());
        // Streak still resets at threshold so a later word gets a full count.
        assert_eq!(a.absence_streak(), 0);
    }

    #[test]
    fn presence_resets_absence_streak() {
        let mut a = assembler_with_word("A");
        a.on_absence();
        a.on_absence();
        a.on_presence();
        assert_eq!(a.absence_streak(), 0);

        // The interrupted streak must start over.
        a.on_absence();
        a.on_absence();
        a.on_absence();
        assert_eq!(a.on_absence(), Some("A".to_string()));
    }

    #[test]
    fn reset_clears_word_history_and_streak() {
        let mut a = assembler_with_word("AB");
        a.confirm();
        a.push_letter(letter('C'));
        a.on_absence();
        a.reset();
        assert_eq!(a.current_word(), "");
        assert!(a.history().is_empty());
        assert_eq!(a.absence_streak(), 0);
    }
}
