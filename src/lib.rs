//! Flappy Fingers - a terminal side-scroller flown by pinch gestures.
//!
//! The game core is UI-agnostic: `game::GameController` owns all state and is
//! driven by `tick` and `handle_intent`. Audio, persistence, the shared
//! leaderboard and gesture input are injected as trait objects.

pub mod audio;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod gesture;
pub mod input;
pub mod leaderboard;
pub mod storage;
pub mod ui;

pub use config::GameConfig;
pub use game::{Collaborators, GameController, GameState, Intent};
