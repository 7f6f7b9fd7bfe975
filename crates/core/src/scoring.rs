//! Scoring module - score, line count, level and drop speed
//!
//! Every cleared row is worth a flat 10 points. Each 10 cumulative rows raise
//! the level by one and shorten the drop interval by 10%, so the interval
//! keeps shrinking towards zero without reaching it.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FACTOR, LINES_PER_LEVEL, SCORE_PER_LINE, START_LEVEL,
};

/// Score, lines, level and drop interval; they always reset together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: f64,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: START_LEVEL,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Milliseconds between forced drops at the current level.
    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    /// Account for one cleared row.
    ///
    /// Returns the new level when this row completed a block of
    /// `LINES_PER_LEVEL` lines.
    pub fn record_line(&mut self) -> Option<u32> {
        self.lines = self.lines.saturating_add(1);
        self.score = self.score.saturating_add(SCORE_PER_LINE);

        if self.lines % LINES_PER_LEVEL == 0 {
            self.level += 1;
            self.drop_interval_ms *= DROP_INTERVAL_FACTOR;
            Some(self.level)
        } else {
            None
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
