use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_fingers::audio::TerminalBell;
use flappy_fingers::build_info;
use flappy_fingers::config::GameConfig;
use flappy_fingers::constants::FRAME_MS;
use flappy_fingers::game::{Collaborators, GameController};
use flappy_fingers::gesture::{GestureInput, LandmarkFeed, NoGesture};
use flappy_fingers::input::{map_key, map_mouse, InputAction};
use flappy_fingers::leaderboard::{HttpLeaderboard, OfflineLeaderboard, RemoteLeaderboard};
use flappy_fingers::storage::json::data_dir;
use flappy_fingers::storage::{JsonStore, MemoryStore, ScoreStore};
use flappy_fingers::ui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "flappy-fingers.log";

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default)]
struct CliArgs {
    leaderboard: Option<String>,
    landmarks: Option<PathBuf>,
    seed: Option<u64>,
    mute: bool,
    no_save: bool,
}

fn print_usage() {
    println!("Flappy Fingers - pinch to flap\n");
    println!("Usage: flappy-fingers [options]\n");
    println!("Options:");
    println!("  --leaderboard URL  Shared leaderboard service base URL");
    println!("  --landmarks PATH   Hand landmark stream (JSON lines, file or FIFO)");
    println!("  --seed N           Fixed RNG seed for pipe layout");
    println!("  --mute             Start with sound muted");
    println!("  --no-save          Keep scores in memory only");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
}

fn exit_with_usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'flappy-fingers --help' for usage.");
    std::process::exit(1);
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        let value = |i: usize| -> String {
            args.get(i + 1)
                .cloned()
                .unwrap_or_else(|| exit_with_usage_error(&format!("{} requires a value", args[i])))
        };
        match args[i].as_str() {
            "--leaderboard" => {
                cli.leaderboard = Some(value(i));
                i += 1;
            }
            "--landmarks" => {
                cli.landmarks = Some(PathBuf::from(value(i)));
                i += 1;
            }
            "--seed" => {
                let raw = value(i);
                cli.seed = Some(raw.parse().unwrap_or_else(|_| {
                    exit_with_usage_error(&format!("--seed requires a number, got {}", raw))
                }));
                i += 1;
            }
            "--mute" => cli.mute = true,
            "--no-save" => cli.no_save = true,
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => exit_with_usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    cli
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging(dir: Option<&PathBuf>) {
    let Some(dir) = dir else {
        return;
    };
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(log_file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn load_config(dir: Option<&PathBuf>, cli: CliArgs) -> GameConfig {
    let mut config = match dir {
        Some(dir) => GameConfig::load_or_default(&dir.join(CONFIG_FILE)),
        None => GameConfig::default(),
    };
    if let Some(url) = cli.leaderboard {
        config.leaderboard_url = Some(url);
    }
    if let Some(path) = cli.landmarks {
        config.landmarks_path = Some(path);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.mute {
        config.muted = true;
    }
    config
}

fn build_collaborators(config: &GameConfig, no_save: bool) -> Collaborators {
    let store: Box<dyn ScoreStore> = match (no_save, JsonStore::open_default()) {
        (false, Ok(store)) => Box::new(store),
        (false, Err(e)) => {
            tracing::warn!("scores will not be saved: {}", e);
            Box::new(MemoryStore::new())
        }
        (true, _) => Box::new(MemoryStore::new()),
    };

    let remote: Box<dyn RemoteLeaderboard> = match &config.leaderboard_url {
        Some(url) => Box::new(HttpLeaderboard::new(url)),
        None => Box::new(OfflineLeaderboard),
    };

    let gesture: Box<dyn GestureInput> = match LandmarkFeed::from_config(config) {
        Some(feed) => Box::new(feed),
        None => Box::new(NoGesture),
    };

    Collaborators {
        audio: Box::new(TerminalBell::new(config.muted)),
        store,
        remote,
        gesture,
    }
}

fn main() -> io::Result<()> {
    let cli = parse_args();
    let dir = data_dir().ok();
    init_logging(dir.as_ref());

    let no_save = cli.no_save;
    let config = load_config(dir.as_ref(), cli);
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let collaborators = build_collaborators(&config, no_save);
    let mut game = GameController::new(config, collaborators, rng);
    tracing::info!("{} starting", build_info::version_line());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game);

    game.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(best = game.score.best, "exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut GameController<StdRng>,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui::draw(frame, &game.snapshot()))?;

        let timeout = Duration::from_secs_f64(FRAME_MS / 1000.0).saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let naming = game.name_entry().is_some();
            let action = match event::read()? {
                Event::Key(key) => map_key(key, game.state(), naming),
                Event::Mouse(mouse) => map_mouse(mouse, game.state(), naming),
                _ => InputAction::Ignore,
            };
            match action {
                InputAction::Intent(intent) => game.handle_intent(intent),
                InputAction::Quit => return Ok(()),
                InputAction::Ignore => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed.as_secs_f64() * 1000.0 >= FRAME_MS {
            last_tick = Instant::now();
            game.tick(elapsed.as_secs_f64() * 1000.0 / FRAME_MS);
        }
    }
}
