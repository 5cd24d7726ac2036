//! Bounded FIFO window of recently accepted letters.

use std::collections::VecDeque;

use crate::classify::Letter;

// ---------------------------------------------------------------------------
// SmoothingWindow
// ---------------------------------------------------------------------------

/// The last `capacity` letters that survived the confidence cut.
///
/// Invariant: `len() <= capacity()` at all times.  Pushing beyond capacity
/// evicts the oldest entry; [`clear`](SmoothingWindow::clear) empties the
/// window entirely.
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    letters: VecDeque<Letter>,
    capacity: usize,
}

impl SmoothingWindow {
    /// Creates a window holding at most `capacity` letters.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be > 0");
        Self {
            letters: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a letter, evicting the oldest when full.
    pub fn push(&mut self, letter: Letter) {
        if self.letters.len() == self.capacity {
            self.letters.pop_front();
        }
        self.letters.push_back(letter);
    }

    /// Discards every letter in the window.
    pub fn clear(&mut self) {
        self.letters.clear();
    }

    /// Number of letters currently held.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` when the window holds no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Maximum number of letters the window can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the letter filling the window, if the window is full and all
    /// entries are identical.
    pub fn unanimous(&self) -> Option<Letter> {
        if self.letters.len() < self.capacity {
            return None;
        }
        let first = *self.letters.front()?;
        self.letters
            .iter()
            .all(|&l| l == first)
            .then_some(first)
    }

    /// Letters in arrival order, oldest first.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.letters.iter().copied()
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

    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let mut window = SmoothingWindow::new(3);
        for c in ['A', 'B', 'C', 'D'] {
            window.push(letter(c));
        }
        assert_eq!(window.len(), 3);
        let held: Vec<char> = window.letters().map(|l| l.as_char()).collect();
        assert_eq!(held, vec!['B', 'C', 'D']);
    }

    #[test]
    fn unanimous_requires_full_identical_window() {
        let mut window = SmoothingWindow::new(3);
        window.push(letter('A'));
        window.push(letter('A'));
        assert_eq!(window.unanimous(), None, "two entries are not enough");

        window.push(letter('A'));
        assert_eq!(window.unanimous(), Some(letter('A')));
    }

    #[test]
    fn unanimous_rejects_mixed_window() {
        let mut window = SmoothingWindow::new(3);
        window.push(letter('A'));
        window.push(letter('A'));
        window.push(letter('B'));
        assert_eq!(window.unanimous(), None);
    }

    #[test]
    fn clear_empties_window() {
        let mut window = SmoothingWindow::new(3);
        window.push(letter('A'));
        window.push(letter('B'));
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
    }

    #[test]
    #[should_panic(expected = "window capacity must be > 0")]
    fn zero_capacity_panics() {
        SmoothingWindow::new(0);
    }
}
