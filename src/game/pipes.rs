//! Procedural pipe generation, scrolling and pruning.

use super::types::Rect;
use crate::config::GameConfig;
use rand::Rng;

/// A single pipe obstacle (top + bottom pair with a gap).
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge. Scrolls leftward.
    pub x: f64,
    /// Y of the gap centre.
    pub gap_y: f64,
    /// Whether the bird has passed this pipe (for scoring).
    pub passed: bool,
}

/// Spawns, scrolls and prunes pipes. Live pipes are ordered oldest (leftmost) first.
#[derive(Debug, Clone)]
pub struct PipeManager {
    pub arena_width: f64,
    pub arena_height: f64,
    pub ground_height: f64,
    pub pipe_width: f64,
    /// Current gap size. Set by the caller at run start; the ramp shrinks it.
    pub gap: f64,
    pub spacing: f64,
    /// Current scroll speed per tick.
    pub speed: f64,
    pub base_speed: f64,
    pub edge_margin: f64,
    pub max_gap_delta: f64,
    pub prune_margin: f64,
    pipes: Vec<Pipe>,
    /// Pipes spawned since construction.
    spawn_count: u64,
}

impl PipeManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            arena_width: config.arena_width,
            arena_height: config.arena_height,
            ground_height: config.ground_height,
            pipe_width: config.pipe_width,
            gap: config.base_gap,
            spacing: config.pipe_spacing,
            speed: config.base_speed,
            base_speed: config.base_speed,
            edge_margin: config.edge_margin,
            max_gap_delta: config.max_gap_delta,
            prune_margin: crate::constants::PIPE_PRUNE_MARGIN,
            pipes: Vec::new(),
            spawn_count: 0,
        }
    }

    /// Clear all pipes and restore the base speed. The gap is left alone.
    pub fn reset(&mut self) {
        self.pipes.clear();
        self.speed = self.base_speed;
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pipes_mut(&mut self) -> &mut Vec<Pipe> {
        &mut self.pipes
    }

    pub fn spawn_count(&self) -> u64 {
        self.spawn_count
    }

    /// Valid range for a gap centre at the current gap size.
    pub fn gap_range(&self) -> (f64, f64) {
        let half = self.gap / 2.0;
        let min_y = self.edge_margin + half;
        let max_y = self.arena_height - self.ground_height - self.edge_margin - half;
        (min_y, max_y)
    }

    /// Append a pipe just off the right edge.
    ///
    /// After the first pipe, the gap centre stays within `max_gap_delta` of the
    /// previous one so every transition is reachable.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let (min_y, max_y) = self.gap_range();
        let (lo, hi) = match self.pipes.last() {
            Some(last) => (
                min_y.max(last.gap_y - self.max_gap_delta),
                max_y.min(last.gap_y + self.max_gap_delta),
            ),
            None => (min_y, max_y),
        };
        // Degenerate range: pin to the nearest valid centre.
        let gap_y = if hi > lo { rng.gen_range(lo..=hi) } else { lo.min(max_y) };

        self.pipes.push(Pipe {
            x: self.arena_width + self.pipe_width,
            gap_y,
            passed: false,
        });
        self.spawn_count += 1;
    }

    /// Scroll, prune off-screen pipes, and spawn once the newest pipe is far enough in.
    pub fn update<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        let step = self.speed * dt;
        for pipe in &mut self.pipes {
            pipe.x -= step;
        }

        let limit = -self.prune_margin;
        let width = self.pipe_width;
        self.pipes.retain(|p| p.x + width >= limit);

        let needs_spawn = match self.pipes.last() {
            None => true,
            Some(last) => last.x < self.arena_width - self.spacing,
        };
        if needs_spawn {
            self.spawn(rng);
        }
    }

    pub fn top_rect(&self, pipe: &Pipe) -> Rect {
        Rect::new(pipe.x, 0.0, self.pipe_width, pipe.gap_y - self.gap / 2.0)
    }

    pub fn bottom_rect(&self, pipe: &Pipe) -> Rect {
        let top = pipe.gap_y + self.gap / 2.0;
        Rect::new(pipe.x, top, self.pipe_width, self.arena_height - top)
    }

    pub fn increase_speed(&mut self, factor: f64) {
        self.speed *= factor;
    }

    /// Shrink the gap by `step`, never below `min`.
    pub fn shrink_gap(&mut self, step: f64, min: f64) {
        if self.gap > min {
            self.gap = (self.gap - step).max(min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn manager() -> PipeManager {
        PipeManager::new(&GameConfig::default())
    }

    #[test]
    fn test_gap_range_default_arena() {
        let pm = manager();
        assert_eq!(pm.gap_range(), (165.0, 415.0));
    }

    #[test]
    fn test_first_spawn_within_range() {
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut pm = manager();
            pm.spawn(&mut rng);
            let gap_y = pm.pipes()[0].gap_y;
            assert!((165.0..=415.0).contains(&gap_y), "seed {}: {}", seed, gap_y);
            assert_eq!(pm.pipes()[0].x, 480.0 + 56.0);
            assert!(!pm.pipes()[0].passed);
        }
    }

    #[test]
    fn test_consecutive_gaps_within_delta() {
        let mut rng = create_test_rng();
        let mut pm = manager();
        for _ in 0..500 {
            pm.spawn(&mut rng);
        }
        let (min_y, max_y) = pm.gap_range();
        for pair in pm.pipes().windows(2) {
            assert!((pair[1].gap_y - pair[0].gap_y).abs() <= 130.0);
        }
        for pipe in pm.pipes() {
            assert!(pipe.gap_y >= min_y && pipe.gap_y <= max_y);
        }
    }

    #[test]
    fn test_spawn_near_edge_intersects_range() {
        let mut rng = create_test_rng();
        let mut pm = manager();
        pm.pipes_mut().push(Pipe {
            x: 100.0,
            gap_y: 165.0,
            passed: false,
        });
        for _ in 0..50 {
            pm.spawn(&mut rng);
            let last = pm.pipes().last().unwrap().gap_y;
            assert!(last >= 165.0);
            pm.pipes_mut().truncate(1);
        }
    }

    #[test]
    fn test_reset_restores_speed_but_not_gap() {
        let mut pm = manager();
        let mut rng = create_test_rng();
        pm.spawn(&mut rng);
        pm.increase_speed(1.05);
        pm.gap = 130.0;
        pm.reset();
        assert!(pm.pipes().is_empty());
        assert_eq!(pm.speed, 3.0);
        assert_eq!(pm.gap, 130.0);
    }

    #[test]
    fn test_update_spawns_when_empty() {
        let mut pm = manager();
        let mut rng = create_test_rng();
        pm.update(1.0, &mut rng);
        assert_eq!(pm.pipes().len(), 1);
        assert_eq!(pm.spawn_count(), 1);
    }

    #[test]
    fn test_update_scrolls_by_speed_times_dt() {
        let mut pm = manager();
        let mut rng = create_test_rng();
        pm.pipes_mut().push(Pipe {
            x: 300.0,
            gap_y: 300.0,
            passed: false,
        });
        pm.update(1.5, &mut rng);
        assert_eq!(pm.pipes()[0].x, 300.0 - 4.5);
    }

    #[test]
    fn test_spacing_trigger() {
        let mut pm = manager();
        let mut rng = create_test_rng();
        // 480 - 260 = 220: at exactly 220 no spawn, below it spawn.
        pm.pipes_mut().push(Pipe {
            x: 223.0,
            gap_y: 300.0,
            passed: false,
        });
        pm.update(1.0, &mut rng);
        assert_eq!(pm.pipes().len(), 1);
        pm.update(0.1, &mut rng);
        assert_eq!(pm.pipes().len(), 2);
    }

    #[test]
    fn test_prune_boundary() {
        let mut pm = manager();
        let mut rng = create_test_rng();
        // Right edge lands exactly on -10 after a 3.0 step: kept.
        pm.pipes_mut().push(Pipe {
            x: -66.0 + 3.0,
            gap_y: 300.0,
            passed: true,
        });
        pm.pipes_mut().push(Pipe {
            x: 400.0,
            gap_y: 250.0,
            passed: false,
        });
        pm.update(1.0, &mut rng);
        assert_eq!(pm.pipes().len(), 2);
        assert_eq!(pm.pipes()[0].x + pm.pipe_width, -10.0);

        // Next step pushes it past the margin: removed.
        pm.update(1.0, &mut rng);
        assert_eq!(pm.pipes().len(), 1);
        assert_eq!(pm.pipes()[0].gap_y, 250.0);
    }

    #[test]
    fn test_pipes_never_pruned_early() {
        let mut pm = manager();
        let mut rng = create_test_rng();
        for _ in 0..2000 {
            let before: Vec<Pipe> = pm.pipes().to_vec();
            pm.update(1.0, &mut rng);
            let step = pm.speed;
            for old in &before {
                let right_after = old.x - step + pm.pipe_width;
                let still_there = pm.pipes().iter().any(|p| p.gap_y == old.gap_y);
                assert_eq!(still_there, right_after >= -10.0);
            }
        }
    }

    #[test]
    fn test_rects_frame_the_gap() {
        let pm = manager();
        let pipe = Pipe {
            x: 200.0,
            gap_y: 300.0,
            passed: false,
        };
        let top = pm.top_rect(&pipe);
        let bottom = pm.bottom_rect(&pipe);
        assert_eq!(top, Rect::new(200.0, 0.0, 56.0, 225.0));
        assert_eq!(bottom, Rect::new(200.0, 375.0, 56.0, 265.0));
        assert_eq!(bottom.y - top.bottom(), pm.gap);
    }

    #[test]
    fn test_shrink_gap_floors_at_min() {
        let mut pm = manager();
        pm.gap = 121.0;
        pm.shrink_gap(2.0, 120.0);
        assert_eq!(pm.gap, 120.0);
        pm.shrink_gap(2.0, 120.0);
        assert_eq!(pm.gap, 120.0);
    }

    #[test]
    fn test_increase_speed_multiplies() {
        let mut pm = manager();
        pm.increase_speed(1.05);
        pm.increase_speed(1.05);
        assert!((pm.speed - 3.0 * 1.05 * 1.05).abs() < 1e-12);
    }
}
