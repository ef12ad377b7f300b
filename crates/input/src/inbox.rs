//! Thread-safe key inbox.
//!
//! Input capture writes key transitions, the game loop drains one
//! [`InputFrame`] per tick. Held state persists across drains; released edges
//! are handed out exactly once.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::types::{InputFrame, Key, KeySet};

/// Down / released flags for the five game keys, safe to share between the
/// capture thread and the tick loop.
#[derive(Debug, Default)]
pub struct KeyInbox {
    down: AtomicU8,
    released: AtomicU8,
}

impl KeyInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down
    pub fn press(&self, key: Key) {
        self.down.fetch_or(KeySet::from_iter([key]).bits(), Ordering::AcqRel);
    }

    /// Record a key going up: clears the held flag and raises the edge.
    ///
    /// A release for a key that was never pressed is ignored.
    pub fn release(&self, key: Key) {
        let bit = KeySet::from_iter([key]).bits();
        let was_down = self.down.fetch_and(!bit, Ordering::AcqRel) & bit != 0;
        if was_down {
            self.released.fetch_or(bit, Ordering::AcqRel);
        }
    }

    /// Press immediately followed by release, for hosts that never report
    /// key-up events
    pub fn tap(&self, key: Key) {
        self.press(key);
        self.release(key);
    }

    /// Snapshot held keys and take the released edges
    pub fn drain(&self) -> InputFrame {
        let released = self.released.swap(0, Ordering::AcqRel);
        let down = self.down.load(Ordering::Acquire);
        InputFrame {
            down: KeySet::from_bits(down),
            released: KeySet::from_bits(released),
        }
    }

    /// Forget every held key and pending edge
    pub fn clear(&self) {
        self.down.store(0, Ordering::Release);
        self.released.store(0, Ordering::Release);
    }
}
