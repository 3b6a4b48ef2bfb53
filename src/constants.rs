// Arena constants (logical pixels)
pub const ARENA_WIDTH: f64 = 480.0;
pub const ARENA_HEIGHT: f64 = 640.0;
pub const GROUND_HEIGHT: f64 = 60.0;

// Frame timing constants
pub const FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_DT: f64 = 1.5;

// Bird constants
pub const BIRD_X: f64 = 120.0;
pub const BIRD_START_Y_FRACTION: f64 = 0.45;
pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;
pub const BIRD_HITBOX_INSET: f64 = 4.0;
pub const GRAVITY: f64 = 0.5;
pub const FLAP_STRENGTH: f64 = -8.0;
pub const FLAP_ANIM_TICKS: u32 = 10;
pub const ROTATION_SMOOTHING: f64 = 0.15;
pub const MIN_ROTATION_DEG: f64 = -35.0;
pub const MAX_ROTATION_DEG: f64 = 90.0;
pub const DEATH_SPIN_PER_TICK: f64 = 0.05;

// Pipe constants
pub const PIPE_WIDTH: f64 = 56.0;
pub const PIPE_SPACING: f64 = 260.0;
pub const PIPE_EDGE_MARGIN: f64 = 90.0;
pub const PIPE_MAX_GAP_DELTA: f64 = 130.0;
pub const PIPE_PRUNE_MARGIN: f64 = 10.0;
pub const BASE_PIPE_SPEED: f64 = 3.0;
pub const BASE_GAP: f64 = 150.0;

// Difficulty ramp constants
pub const SPEED_INCREASE_INTERVAL: u32 = 10;
pub const SPEED_INCREASE_FACTOR: f64 = 1.05;
pub const GAP_DECREASE_AMOUNT: f64 = 2.0;
pub const MIN_GAP: f64 = 120.0;

// State machine constants
pub const RESTART_COOLDOWN_TICKS: f64 = 30.0;
pub const GROUND_SCROLL_PERIOD: f64 = 24.0;
pub const READY_GROUND_SPEED: f64 = 1.0;
pub const ADVISORY_MS: f64 = 3000.0;

// Screen flash constants
pub const FLAP_FLASH: f64 = 0.15;
pub const HIT_FLASH: f64 = 0.5;
pub const FLASH_DECAY_PER_TICK: f64 = 0.02;

// Score constants
pub const LEADERBOARD_SIZE: usize = 10;
pub const LEADERBOARD_SHOWN: usize = 5;
pub const MAX_NAME_LEN: usize = 16;

// Gesture constants
pub const PINCH_THRESHOLD: f64 = 0.05;
pub const RELEASE_THRESHOLD: f64 = 0.07;
pub const GESTURE_POLL_INTERVAL: u64 = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

// Save system constants
pub const DATA_DIR_NAME: &str = ".flappy-fingers";
