//! JSON-file store under ~/.flappy-fingers/ (one file per key).

use super::ScoreStore;
use crate::constants::DATA_DIR_NAME;
use crate::game::LeaderboardEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BEST_SCORE_FILE: &str = "best_score.json";
const LEADERBOARD_FILE: &str = "leaderboard.json";
const PLAYER_FILE: &str = "player.json";

/// Get the ~/.flappy-fingers/ directory path.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON, creating the parent directory if needed.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlayerRecord {
    name: String,
}

/// File-backed store. Every operation degrades to a default or a no-op.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at ~/.flappy-fingers/.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::new(data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    fn write<T: Serialize>(&self, filename: &str, data: &T) {
        if let Err(e) = save_json(&self.path(filename), data) {
            tracing::warn!("could not save {}: {}", filename, e);
        }
    }
}

impl ScoreStore for JsonStore {
    fn best_score(&self) -> u32 {
        load_json_or_default::<BestScoreRecord>(&self.path(BEST_SCORE_FILE)).best
    }

    fn set_best_score(&mut self, score: u32) {
        self.write(BEST_SCORE_FILE, &BestScoreRecord { best: score });
    }

    fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        load_json_or_default(&self.path(LEADERBOARD_FILE))
    }

    fn set_leaderboard(&mut self, entries: &[LeaderboardEntry]) {
        self.write(LEADERBOARD_FILE, &entries);
    }

    fn player_name(&self) -> Option<String> {
        let record: PlayerRecord = load_json_or_default(&self.path(PLAYER_FILE));
        let name = record.name.trim().to_string();
        (!name.is_empty()).then_some(name)
    }

    fn set_player_name(&mut self, name: &str) {
        self.write(
            PLAYER_FILE,
            &PlayerRecord {
                name: name.to_string(),
            },
        );
    }
}
