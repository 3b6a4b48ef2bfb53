//! HTTP/JSON leaderboard client.
//!
//! `POST {base}/scores` with `{"name", "score", "timestamp"}` and
//! `GET {base}/scores?limit=N` returning a JSON array of entries, best first.

use super::{FetchReply, LeaderboardError, RemoteLeaderboard};
use crate::game::LeaderboardEntry;
use chrono::Utc;
use crossbeam_channel::bounded;
use std::thread;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HttpLeaderboard {
    base_url: String,
}

impl HttpLeaderboard {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn scores_url(&self) -> String {
        format!("{}/scores", self.base_url)
    }

    /// Submit a score, blocking until the server answers.
    pub fn post_score(&self, name: &str, score: u32) -> Result<(), LeaderboardError> {
        let entry = LeaderboardEntry {
            score,
            name: name.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };
        ureq::post(&self.scores_url())
            .set("User-Agent", "flappy-fingers")
            .timeout(REQUEST_TIMEOUT)
            .send_json(&entry)
            .map_err(Box::new)?;
        Ok(())
    }

    /// Fetch the top entries, blocking until the server answers.
    pub fn get_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries: Vec<LeaderboardEntry> = ureq::get(&self.scores_url())
            .set("User-Agent", "flappy-fingers")
            .query("limit", &limit.to_string())
            .timeout(REQUEST_TIMEOUT)
            .call()
            .map_err(Box::new)?
            .into_json()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Ok(entries)
    }
}

impl RemoteLeaderboard for HttpLeaderboard {
    fn submit(&self, name: &str, score: u32) {
        let client = self.clone();
        let name = name.to_string();
        let spawned = thread::Builder::new()
            .name("leaderboard-submit".to_string())
            .spawn(move || {
                if let Err(e) = client.post_score(&name, score) {
                    tracing::warn!("score submission failed: {}", e);
                }
            });
        if let Err(e) = spawned {
            tracing::warn!("could not spawn score submission: {}", e);
        }
    }

    fn fetch_top(&self, limit: usize) -> FetchReply {
        let (tx, rx) = bounded(1);
        let client = self.clone();
        let spawned = thread::Builder::new()
            .name("leaderboard-fetch".to_string())
            .spawn({
                let tx = tx.clone();
                move || {
                    let result = match client.get_top(limit) {
                        Ok(entries) => Some(entries),
                        Err(e) => {
                            tracing::warn!("leaderboard fetch failed: {}", e);
                            None
                        }
                    };
                    let _ = tx.send(result);
                }
            });
        if let Err(e) = spawned {
            tracing::warn!("could not spawn leaderboard fetch: {}", e);
            let _ = tx.send(None);
        }
        rx
    }
}
