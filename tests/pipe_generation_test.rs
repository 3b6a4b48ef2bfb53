//! Integration test: pipe field invariants across many seeds
//!
//! Every spawned gap centre must sit inside the margins and within the
//! maximum jump of the previous one, pipes must stay ordered and evenly
//! spaced, and pruning must only drop pipes that are fully off screen.

use flappy_fingers::constants::*;
use flappy_fingers::game::PipeManager;
use flappy_fingers::GameConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: u64 = 40;
const TICKS: usize = 4_000;

/// Run a pipe field with jittery frame times and a shrinking gap.
fn simulate(seed: u64, mut check: impl FnMut(&PipeManager, Option<(f64, f64)>)) {
    let config = GameConfig::default();
    let mut pipes = PipeManager::new(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut jitter = ChaCha8Rng::seed_from_u64(seed ^ 0xF1A9);

    let mut seen = pipes.spawn_count();
    let mut last_gap: Option<f64> = None;
    for tick in 0..TICKS {
        let dt = jitter.gen_range(0.5..=MAX_FRAME_DT);
        pipes.update(dt, &mut rng);

        if tick % 500 == 499 {
            pipes.increase_speed(SPEED_INCREASE_FACTOR);
            pipes.shrink_gap(GAP_DECREASE_AMOUNT * 4.0, MIN_GAP);
        }

        let spawned = if pipes.spawn_count() != seen {
            seen = pipes.spawn_count();
            let newest = pipes.pipes().last().map(|p| p.gap_y);
            let pair = match (last_gap, newest) {
                (Some(prev), Some(cur)) => Some((prev, cur)),
                _ => None,
            };
            last_gap = newest;
            pair
        } else {
            None
        };
        check(&pipes, spawned);
    }
}

#[test]
fn test_gap_centres_stay_inside_margins() {
    for seed in 0..SEEDS {
        simulate(seed, |pipes, _| {
            let gap = pipes.gap;
            for pipe in pipes.pipes() {
                // Pipes keep the gap range they were spawned with; the gap
                // only shrinks, so the current range is a lower bound.
                assert!(pipe.gap_y - gap / 2.0 >= PIPE_EDGE_MARGIN - 1e-9, "seed {seed}");
                assert!(
                    pipe.gap_y + gap / 2.0 <= ARENA_HEIGHT - GROUND_HEIGHT - PIPE_EDGE_MARGIN + 1e-9,
                    "seed {seed}"
                );
            }
        });
    }
}

#[test]
fn test_consecutive_gaps_within_max_delta() {
    let mut worst: f64 = 0.0;
    for seed in 0..SEEDS {
        simulate(seed, |_, spawned| {
            if let Some((prev, cur)) = spawned {
                let delta = (cur - prev).abs();
                assert!(delta <= PIPE_MAX_GAP_DELTA + 1e-9, "seed {seed}: delta {delta}");
                worst = worst.max(delta);
            }
        });
    }
    // The generator does use most of the allowed range.
    assert!(worst > PIPE_MAX_GAP_DELTA * 0.5);
}

#[test]
fn test_pipes_ordered_and_spaced() {
    for seed in 0..SEEDS {
        simulate(seed, |pipes, spawned| {
            let list = pipes.pipes();
            for pair in list.windows(2) {
                assert!(pair[0].x < pair[1].x, "seed {seed}: pipes out of order");
            }
            if spawned.is_some() {
                let n = list.len();
                assert_eq!(list[n - 1].x, ARENA_WIDTH + PIPE_WIDTH);
                assert!(list[n - 2].x < ARENA_WIDTH - PIPE_SPACING);
            }
        });
    }
}

#[test]
fn test_no_visible_pipe_is_pruned() {
    for seed in 0..SEEDS {
        simulate(seed, |pipes, _| {
            for pipe in pipes.pipes() {
                assert!(pipe.x + PIPE_WIDTH >= -PIPE_PRUNE_MARGIN, "seed {seed}");
            }
            // Enough pipes to cover the screen are always live.
            assert!(!pipes.pipes().is_empty());
        });
    }
}
