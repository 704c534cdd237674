use serde::{Deserialize, Serialize};

use crate::tree::EMPTY_ROOT;

/// How many recent roots (including the current one) a withdrawal proof
/// may reference. Bounds staleness between proof generation and
/// submission.
pub const ROOT_WINDOW: usize = 30;

/// Fixed-capacity ring buffer of the most recent tree roots, newest
/// overwriting the oldest once full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootHistory {
    roots: [[u8; 32]; ROOT_WINDOW],
    // next slot to write
    index: usize,
    len: usize,
}

impl Default for RootHistory {
    fn default() -> Self {
        Self {
            roots: [EMPTY_ROOT; ROOT_WINDOW],
            index: 0,
            len: 0,
        }
    }
}

impl RootHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, root: [u8; 32]) {
        self.roots[self.index] = root;
        self.index = (self.index + 1) % ROOT_WINDOW;
        self.len = (self.len + 1).min(ROOT_WINDOW);
    }

    /// Bounded-time scan over at most `ROOT_WINDOW` slots. The zero
    /// sentinel never matches, so unwritten slots cannot authorize a
    /// withdrawal.
    pub fn contains(&self, root: &[u8; 32]) -> bool {
        *root != EMPTY_ROOT && self.roots[..self.len].contains(root)
    }

    pub fn latest(&self) -> Option<[u8; 32]> {
        if self.len == 0 {
            return None;
        }
        Some(self.roots[(self.index + ROOT_WINDOW - 1) % ROOT_WINDOW])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn root(n: u8) -> [u8; 32] {
        [n; 32]
    }

    #[test]
    fn test_empty_history() {
        let history = RootHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        assert!(!history.contains(&EMPTY_ROOT));
    }

    #[test]
    fn test_latest_and_contains() {
        let mut history = RootHistory::new();
        history.push(root(1));
        history.push(root(2));

        assert_eq!(history.latest(), Some(root(2)));
        assert!(history.contains(&root(1)));
        assert!(history.contains(&root(2)));
        assert!(!history.contains(&root(3)));
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut history = RootHistory::new();

        // fill the window, then one more: root 0 scrolls out
        for n in 0..=ROOT_WINDOW as u8 {
            history.push(root(n + 1));
        }

        assert_eq!(history.len(), ROOT_WINDOW);
        assert!(!history.contains(&root(1)));
        assert!(history.contains(&root(2)));
        assert!(history.contains(&root(ROOT_WINDOW as u8 + 1)));
    }

    #[test]
    fn test_zero_root_never_matches() {
        let mut history = RootHistory::new();
        history.push(EMPTY_ROOT);
        assert!(!history.contains(&EMPTY_ROOT));
    }
}
