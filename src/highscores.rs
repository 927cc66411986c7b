//! Session high score
//!
//! Lives only as long as the game session; nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Best score seen this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    /// Highest score reached
    pub best: u64,
    /// Set when `best` was raised since the flag was last cleared (UI highlight)
    pub newly_set: bool,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score; returns true if it beat the previous best
    pub fn observe(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            self.newly_set = true;
            true
        } else {
            false
        }
    }

    /// Forget the highlight (a new run is starting)
    pub fn clear_flag(&mut self) {
        self.newly_set = false;
    }
}
