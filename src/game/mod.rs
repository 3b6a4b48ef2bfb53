//! Core game simulation: bird physics, pipe field, collision, scoring and the
//! state machine that drives them.

pub mod bird;
pub mod collision;
pub mod controller;
pub mod pipes;
pub mod score;
pub mod types;

pub use bird::Bird;
pub use collision::{check_collision, CollisionKind};
pub use controller::{Collaborators, GameController, Snapshot};
pub use pipes::{Pipe, PipeManager};
pub use score::ScoreManager;
pub use types::*;
