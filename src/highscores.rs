//! Run results and the high score leaderboard
//!
//! The simulation publishes one [`RunResult`] per finished run. Whatever
//! wants it (leaderboard, analytics, a JS callback) implements [`ResultSink`].
//! The leaderboard keeps the top 10 and round-trips through JSON so a host
//! can persist it wherever it likes.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Final numbers of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub score: u64,
    pub max_combo: u32,
    pub depth_cleared: u32,
}

/// Receives each finished run exactly once
pub trait ResultSink {
    fn submit(&mut self, result: &RunResult);
}

/// Discards results
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResults;

impl ResultSink for NullResults {
    fn submit(&mut self, _result: &RunResult) {}
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub result: RunResult,
    /// Host-supplied timestamp (ms), 0 if unknown
    #[serde(default)]
    pub timestamp: f64,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.result.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.result.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a result if it qualifies. Returns the rank achieved (1-indexed).
    pub fn add(&mut self, result: RunResult, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(result.score)?;
        self.entries.insert(rank - 1, HighScoreEntry { result, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("New high score #{}: {}", rank, result.score);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.result.score)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored leaderboard, re-sorting and trimming whatever was stored
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.result.score.cmp(&a.result.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }
}

impl ResultSink for HighScores {
    fn submit(&mut self, result: &RunResult) {
        self.add(*result, 0.0);
    }
}
