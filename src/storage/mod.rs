//! Persistence for the best score, the local leaderboard and the player name.
//!
//! Stores never fail at this surface: unreadable data comes back as the
//! default and failed writes are logged and dropped.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::game::LeaderboardEntry;

/// Key/value persistence used by the score manager and name prompt.
pub trait ScoreStore {
    fn best_score(&self) -> u32;
    fn set_best_score(&mut self, score: u32);

    fn leaderboard(&self) -> Vec<LeaderboardEntry>;
    fn set_leaderboard(&mut self, entries: &[LeaderboardEntry]);

    fn player_name(&self) -> Option<String>;
    fn set_player_name(&mut self, name: &str);
}
