//! High score persistence contract.
//!
//! The game reads its slot at every reset and writes it at game over when the
//! session beat it. [`SessionStore`] keeps the value for the lifetime of the
//! process only.

use std::collections::HashMap;

/// A keyed slot holding an integer high score
pub trait HighScoreStore {
    /// Stored value, 0 when the slot was never written
    fn load(&self, key: &str) -> u32;

    fn store(&mut self, key: &str, score: u32);
}

/// In-memory store scoped to the current process
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slots: HashMap<String, u32>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for SessionStore {
    fn load(&self, key: &str) -> u32 {
        self.slots.get(key).copied().unwrap_or(0)
    }

    fn store(&mut self, key: &str, score: u32) {
        self.slots.insert(key.to_owned(), score);
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn load(&self, key: &str) -> u32 {
        (**self).load(key)
    }

    fn store(&mut self, key: &str, score: u32) {
        (**self).store(key, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HIGH_SCORE_KEY;

    #[test]
    fn test_missing_slot_reads_zero() {
        let store = SessionStore::new();
        assert_eq!(store.load(HIGH_SCORE_KEY), 0);
    }

    #[test]
    fn test_store_and_load() {
        let mut store = SessionStore::new();
        store.store(HIGH_SCORE_KEY, 600);
        assert_eq!(store.load(HIGH_SCORE_KEY), 600);
        assert_eq!(store.load("other"), 0);
    }
}
