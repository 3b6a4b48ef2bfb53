//! Flappy Fingers headless autopilot.
//!
//! Plays the real game controller without a UI using a simple flap policy,
//! and reports how far each run got. Used to sanity-check pipe generation:
//! every run also records the largest gap-centre jump between consecutive
//! pipes, which must never exceed the configured limit.
//!
//! Usage:
//!   cargo run --bin autopilot -- [OPTIONS]
//!
//! Options:
//!   --runs N     Number of runs with incrementing seeds (default: 10)
//!   --seed N     RNG seed for the first run (default: 42)
//!   --ticks N    Tick limit per run (default: 36000 = 10 minutes)
//!   --quiet      Only the final summary

use flappy_fingers::audio::SilentAudio;
use flappy_fingers::config::GameConfig;
use flappy_fingers::game::{Collaborators, GameController, GameState, Intent};
use flappy_fingers::gesture::NoGesture;
use flappy_fingers::leaderboard::OfflineLeaderboard;
use flappy_fingers::storage::MemoryStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── CLI Configuration ────────────────────────────────────────────────

struct PilotConfig {
    runs: u32,
    seed: u64,
    ticks: u64,
    quiet: bool,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            seed: 42,
            ticks: 36_000,
            quiet: false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse()) {
        Some(Ok(n)) => n,
        _ => {
            eprintln!("{} requires a number", flag);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_args() -> PilotConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = PilotConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.runs = parse_number(&args, i, "--runs");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_number(&args, i, "--seed");
            }
            "--ticks" => {
                i += 1;
                config.ticks = parse_number(&args, i, "--ticks");
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn print_usage() {
    eprintln!(
        "Flappy Fingers Autopilot\n\
         \n\
         Usage: autopilot [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N     Number of runs with incrementing seeds (default: 10)\n\
         \x20 --seed N     RNG seed for the first run (default: 42)\n\
         \x20 --ticks N    Tick limit per run (default: 36000)\n\
         \x20 --quiet      Only final summary\n\
         \x20 --help, -h   Show this help"
    );
}

// ── Run Statistics ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct RunStats {
    seed: u64,
    score: u32,
    ticks: u64,
    flaps: u64,
    pipes_spawned: u64,
    worst_gap_delta: f64,
    crashed: bool,
}

// ── Flap Policy ──────────────────────────────────────────────────────

/// Gap centre of the first pipe the bird has not yet cleared.
fn next_gap(game: &GameController<StdRng>) -> Option<f64> {
    let bird_left = game.bird.x - game.bird.width / 2.0;
    game.pipes
        .pipes()
        .iter()
        .find(|p| p.x + game.pipes.pipe_width >= bird_left)
        .map(|p| p.gap_y)
}

/// Flap when the bird is about to sink below the target line.
fn should_flap(game: &GameController<StdRng>, config: &GameConfig) -> bool {
    let target = next_gap(game).unwrap_or_else(|| config.bird_start_y());
    let aim = target + game.pipes.gap / 6.0;
    let projected = game.bird.y + game.bird.velocity + config.gravity;
    projected > aim && game.bird.velocity >= 0.0
}

fn run_autopilot(config: &PilotConfig, seed: u64) -> RunStats {
    let game_config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    let collaborators = Collaborators {
        audio: Box::new(SilentAudio::default()),
        store: Box::new(MemoryStore::with_player("autopilot")),
        remote: Box::new(OfflineLeaderboard),
        gesture: Box::new(NoGesture),
    };
    let mut game = GameController::new(
        game_config.clone(),
        collaborators,
        StdRng::seed_from_u64(seed),
    );
    let mut stats = RunStats {
        seed,
        ..Default::default()
    };

    game.handle_intent(Intent::Start);
    game.handle_intent(Intent::Flap);

    let mut last_spawn_count = game.pipes.spawn_count();
    let mut last_gap: Option<f64> = None;

    for tick in 0..config.ticks {
        if should_flap(&game, &game_config) {
            game.handle_intent(Intent::Flap);
            stats.flaps += 1;
        }
        game.tick(1.0);

        if game.pipes.spawn_count() != last_spawn_count {
            last_spawn_count = game.pipes.spawn_count();
            if let Some(newest) = game.pipes.pipes().last() {
                if let Some(prev) = last_gap {
                    stats.worst_gap_delta = stats.worst_gap_delta.max((newest.gap_y - prev).abs());
                }
                last_gap = Some(newest.gap_y);
            }
        }

        if game.state() == GameState::GameOver {
            stats.crashed = true;
            stats.ticks = tick + 1;
            break;
        }
        stats.ticks = tick + 1;
    }

    stats.score = game.score.score;
    stats.pipes_spawned = game.pipes.spawn_count();
    stats
}

fn print_summary(all: &[RunStats], limit: f64) {
    let runs = all.len().max(1) as f64;
    let mean = all.iter().map(|s| s.score as f64).sum::<f64>() / runs;
    let best = all.iter().map(|s| s.score).max().unwrap_or(0);
    let worst_delta = all.iter().map(|s| s.worst_gap_delta).fold(0.0, f64::max);
    let survived = all.iter().filter(|s| !s.crashed).count();

    println!("=== Autopilot Summary ({} runs) ===", all.len());
    println!("  Mean score:      {:.1}", mean);
    println!("  Best score:      {}", best);
    println!("  Survived limit:  {}", survived);
    println!("  Worst gap delta: {:.1} (limit {:.1})", worst_delta, limit);
    if worst_delta > limit + 1e-9 {
        println!("  !! gap delta limit exceeded");
    }
}

fn main() {
    let config = parse_args();
    let limit = GameConfig::default().max_gap_delta;

    if !config.quiet {
        eprintln!(
            "Autopilot: {} run(s), seed={}, tick limit={}",
            config.runs, config.seed, config.ticks
        );
    }

    let mut all_stats = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let seed = config.seed + run as u64;
        let stats = run_autopilot(&config, seed);
        if !config.quiet {
            println!(
                "  Run {} (seed={}): score={} ticks={} flaps={} pipes={} worst_delta={:.1}{}",
                run + 1,
                stats.seed,
                stats.score,
                stats.ticks,
                stats.flaps,
                stats.pipes_spawned,
                stats.worst_gap_delta,
                if stats.crashed { "" } else { " (survived)" },
            );
        }
        all_stats.push(stats);
    }

    print_summary(&all_stats, limit);
}
