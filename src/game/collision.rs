//! Collision detection between the bird, the arena bounds and pipes.

use super::bird::Bird;
use super::pipes::PipeManager;

/// What the bird hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Ground,
    Ceiling,
    Pipe,
}

/// Check the bird's hitbox against the ground, the ceiling and every live pipe.
///
/// Returns `None` when nothing is hit. Ground and ceiling contact are inclusive;
/// pipe contact requires strict overlap.
pub fn check_collision(
    bird: &Bird,
    pipes: &PipeManager,
    arena_height: f64,
    ground_height: f64,
) -> Option<CollisionKind> {
    let bounds = bird.bounds();

    if bounds.bottom() >= arena_height - ground_height {
        return Some(CollisionKind::Ground);
    }

    if bounds.y <= 0.0 {
        return Some(CollisionKind::Ceiling);
    }

    let hit = pipes.pipes().iter().any(|pipe| {
        bounds.overlaps(&pipes.top_rect(pipe)) || bounds.overlaps(&pipes.bottom_rect(pipe))
    });
    hit.then_some(CollisionKind::Pipe)
}
