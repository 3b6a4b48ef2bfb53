//! Shared online leaderboard.
//!
//! Submissions are fire-and-forget. Fetches resolve on a one-shot channel to
//! either the top entries or `None` when the service is unreachable.

pub mod http;

pub use http::HttpLeaderboard;

use crate::game::LeaderboardEntry;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),

    #[error("leaderboard response unreadable: {0}")]
    Decode(#[from] std::io::Error),
}

/// One-shot reply to a fetch. `None` = no data (offline or failed).
pub type FetchReply = Receiver<Option<Vec<LeaderboardEntry>>>;

pub trait RemoteLeaderboard {
    fn submit(&self, name: &str, score: u32);

    /// Request the top `limit` entries. Never blocks.
    fn fetch_top(&self, limit: usize) -> FetchReply;
}

/// No service configured.
#[derive(Debug, Default)]
pub struct OfflineLeaderboard;

impl RemoteLeaderboard for OfflineLeaderboard {
    fn submit(&self, _name: &str, _score: u32) {}

    fn fetch_top(&self, _limit: usize) -> FetchReply {
        let (tx, rx) = bounded(1);
        let _ = tx.send(None);
        rx
    }
}

#[derive(Debug, Default)]
struct QueueState {
    submitted: Vec<(String, u32)>,
    pending: Vec<(usize, Sender<Option<Vec<LeaderboardEntry>>>)>,
}

/// Test double: fetches resolve only when told to. Clones share state.
/// Single-threaded (`Rc`), not meant for the real game.
#[derive(Debug, Default, Clone)]
pub struct QueuedLeaderboard {
    state: Rc<RefCell<QueueState>>,
}

impl QueuedLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<(String, u32)> {
        self.state.borrow().submitted.clone()
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Resolve the oldest outstanding fetch. Returns false if none was waiting.
    pub fn resolve_next(&self, entries: Option<Vec<LeaderboardEntry>>) -> bool {
        let mut state = self.state.borrow_mut();
        if state.pending.is_empty() {
            return false;
        }
        let (limit, tx) = state.pending.remove(0);
        let entries = entries.map(|mut e| {
            e.truncate(limit);
            e
        });
        let _ = tx.send(entries);
        true
    }
}

impl RemoteLeaderboard for QueuedLeaderboard {
    fn submit(&self, name: &str, score: u32) {
        self.state
            .borrow_mut()
            .submitted
            .push((name.to_string(), score));
    }

    fn fetch_top(&self, limit: usize) -> FetchReply {
        let (tx, rx) = bounded(1);
        self.state.borrow_mut().pending.push((limit, tx));
        rx
    }
}
