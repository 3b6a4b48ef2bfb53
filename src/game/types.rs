//! Shared data structures for the game core.

use serde::{Deserialize, Serialize};

/// Top-level state of the game loop. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Title screen; waiting for an explicit start action.
    #[default]
    Menu,
    /// Bird hovers in place until the first flap.
    Ready,
    Playing,
    /// Crashed; bird falls to the ground while the restart cooldown runs.
    GameOver,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Menu => "MENU",
            Self::Ready => "READY",
            Self::Playing => "PLAYING",
            Self::GameOver => "GAME_OVER",
        }
    }
}

/// Player intents, independent of the device that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Explicit start from the title screen (not a flap).
    Start,
    /// Flap / confirm / restart, depending on state.
    Flap,
    ToggleMute,
    /// Reopen the name prompt from the title screen.
    Rename,
    NameInput(char),
    NameBackspace,
    NameSubmit,
    NameCancel,
}

/// Axis-aligned rectangle in arena coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap test: rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One row of a local or shared leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    #[serde(default)]
    pub name: String,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 5.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 5.0);
        assert!(!a.overlaps(&right));
        assert!(!right.overlaps(&a));
        assert!(!a.overlaps(&below));
        assert!(!below.overlaps(&a));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(9.5, 9.5, 1.0, 1.0),
            Rect::new(-5.0, 2.0, 5.0, 3.0),
            Rect::new(3.0, -20.0, 2.0, 100.0),
            Rect::new(20.0, 20.0, 0.0, 0.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn test_entry_without_name_deserializes() {
        let entry: LeaderboardEntry = serde_json::from_str(r#"{"score": 12}"#).unwrap();
        assert_eq!(entry.score, 12);
        assert!(entry.name.is_empty());
        assert_eq!(entry.timestamp, 0);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(GameState::Menu.name(), "MENU");
        assert_eq!(GameState::GameOver.name(), "GAME_OVER");
        assert_eq!(GameState::default(), GameState::Menu);
    }
}
