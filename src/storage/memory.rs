//! In-memory store for tests and `--no-save` sessions.

use super::ScoreStore;
use crate::game::LeaderboardEntry;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u32,
    pub entries: Vec<LeaderboardEntry>,
    pub name: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self {
            best,
            ..Default::default()
        }
    }

    pub fn with_player(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

impl ScoreStore for MemoryStore {
    fn best_score(&self) -> u32 {
        self.best
    }

    fn set_best_score(&mut self, score: u32) {
        self.best = score;
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.entries.clone()
    }

    fn set_leaderboard(&mut self, entries: &[LeaderboardEntry]) {
        self.entries = entries.to_vec();
    }

    fn player_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn set_player_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }
}
