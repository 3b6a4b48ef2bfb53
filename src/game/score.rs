//! Score counter, best score and the local top-10 leaderboard.

use super::types::LeaderboardEntry;
use crate::constants::LEADERBOARD_SIZE;
use crate::storage::ScoreStore;
use chrono::Utc;

pub struct ScoreManager {
    /// Pipes passed in the current run.
    pub score: u32,
    /// Best score ever recorded. Persisted as soon as it changes.
    pub best: u32,
    /// Set once the current run beats the previous best.
    pub new_best: bool,
    store: Box<dyn ScoreStore>,
}

impl ScoreManager {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let best = store.best_score();
        Self {
            score: 0,
            best,
            new_best: false,
            store,
        }
    }

    pub fn increment(&mut self) {
        self.score += 1;
        if self.score > self.best {
            self.best = self.score;
            self.new_best = true;
            self.store.set_best_score(self.best);
        }
    }

    /// Start a new run. The best score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.new_best = false;
    }

    /// Record a finished run and return the updated top entries.
    pub fn add_to_leaderboard(&mut self, score: u32, name: &str) -> Vec<LeaderboardEntry> {
        self.add_to_leaderboard_at(score, name, Utc::now().timestamp_millis())
    }

    pub fn add_to_leaderboard_at(
        &mut self,
        score: u32,
        name: &str,
        timestamp: i64,
    ) -> Vec<LeaderboardEntry> {
        let mut board = self.store.leaderboard();
        board.push(LeaderboardEntry {
            score,
            name: name.to_string(),
            timestamp,
        });
        // Stable sort: earlier entries win ties.
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board.truncate(LEADERBOARD_SIZE);
        self.store.set_leaderboard(&board);
        board
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.store.leaderboard()
    }

    pub fn player_name(&self) -> Option<String> {
        self.store.player_name()
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.store.set_player_name(name);
    }
}

impl std::fmt::Debug for ScoreManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreManager")
            .field("score", &self.score)
            .field("best", &self.best)
            .field("new_best", &self.new_best)
            .finish_non_exhaustive()
    }
}
