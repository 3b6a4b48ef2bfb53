//! The game loop state machine: MENU -> READY -> PLAYING -> GAME_OVER -> READY.
//!
//! The controller owns every piece of mutable game state. External
//! collaborators (audio, persistence, remote leaderboard, gesture input) are
//! injected at construction and only ever touched from `tick` and
//! `handle_intent`, so a tick is atomic with respect to all of them.

use super::bird::Bird;
use super::collision::{check_collision, CollisionKind};
use super::pipes::{Pipe, PipeManager};
use super::score::ScoreManager;
use super::types::{GameState, Intent, LeaderboardEntry};
use crate::audio::{Audio, AudioCue};
use crate::config::GameConfig;
use crate::constants::*;
use crate::gesture::{GestureEvent, GestureInput, GestureStatus};
use crate::leaderboard::{FetchReply, RemoteLeaderboard};
use crate::storage::ScoreStore;
use crossbeam_channel::{Receiver, TryRecvError};
use rand::Rng;

const GESTURE_ADVISORY: &str = "Camera unavailable - use Space to play!";

/// External collaborators injected into the controller.
pub struct Collaborators {
    pub audio: Box<dyn Audio>,
    pub store: Box<dyn ScoreStore>,
    pub remote: Box<dyn RemoteLeaderboard>,
    pub gesture: Box<dyn GestureInput>,
}

/// A shared-leaderboard fetch tagged with the run that requested it.
struct PendingFetch {
    run_id: u64,
    reply: FetchReply,
}

/// Read-only view of the game handed to the renderer once per tick.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub pipe_width: f64,
    pub gap: f64,
    pub speed: f64,
    pub arena_width: f64,
    pub arena_height: f64,
    pub ground_height: f64,
    pub ground_offset: f64,
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
    /// Shared leaderboard when available, otherwise the local one.
    pub leaderboard: &'a [LeaderboardEntry],
    pub leaderboard_is_shared: bool,
    pub player_name: Option<&'a str>,
    /// Text typed so far while the name prompt is open.
    pub name_entry: Option<&'a str>,
    pub hand_visible: bool,
    pub gesture_status: GestureStatus,
    pub advisory: Option<&'a str>,
    pub flash: f64,
    pub muted: bool,
    pub restart_ready: bool,
}

pub struct GameController<R: Rng> {
    config: GameConfig,
    state: GameState,
    pub bird: Bird,
    pub pipes: PipeManager,
    pub score: ScoreManager,
    audio: Box<dyn Audio>,
    remote: Box<dyn RemoteLeaderboard>,
    gesture: Box<dyn GestureInput>,
    gesture_rx: Option<Receiver<GestureEvent>>,
    gesture_status: GestureStatus,
    hand_visible: bool,
    advisory: Option<String>,
    /// Milliseconds left before the advisory is hidden.
    advisory_ms: f64,
    advisory_shown: bool,
    rng: R,

    tick_count: u64,
    /// Accumulated animation time in milliseconds (drives cosmetic motion).
    anim_ms: f64,
    ground_offset: f64,
    flash: f64,
    /// Ticks left before a restart intent is honoured.
    restart_cooldown: f64,
    /// Incremented at the start of every run.
    run_id: u64,

    player_name: Option<String>,
    name_entry: Option<String>,
    local_leaderboard: Vec<LeaderboardEntry>,
    shared_leaderboard: Option<Vec<LeaderboardEntry>>,
    pending_fetches: Vec<PendingFetch>,
    last_collision: Option<CollisionKind>,
}

impl<R: Rng> GameController<R> {
    pub fn new(config: GameConfig, collaborators: Collaborators, rng: R) -> Self {
        let Collaborators {
            audio,
            store,
            remote,
            gesture,
        } = collaborators;
        let score = ScoreManager::new(store);
        let player_name = score.player_name();
        let local_leaderboard = score.leaderboard();

        Self {
            bird: Bird::from_config(&config),
            pipes: PipeManager::new(&config),
            score,
            audio,
            remote,
            gesture,
            gesture_rx: None,
            gesture_status: GestureStatus::Off,
            hand_visible: false,
            advisory: None,
            advisory_ms: 0.0,
            advisory_shown: false,
            rng,
            tick_count: 0,
            anim_ms: 0.0,
            ground_offset: 0.0,
            flash: 0.0,
            restart_cooldown: 0.0,
            run_id: 0,
            player_name,
            name_entry: None,
            local_leaderboard,
            shared_leaderboard: None,
            pending_fetches: Vec::new(),
            last_collision: None,
            state: GameState::Menu,
            config,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn restart_cooldown(&self) -> f64 {
        self.restart_cooldown
    }

    pub fn ground_offset(&self) -> f64 {
        self.ground_offset
    }

    pub fn flash(&self) -> f64 {
        self.flash
    }

    pub fn hand_visible(&self) -> bool {
        self.hand_visible
    }

    pub fn gesture_status(&self) -> GestureStatus {
        self.gesture_status
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    pub fn name_entry(&self) -> Option<&str> {
        self.name_entry.as_deref()
    }

    pub fn shared_leaderboard(&self) -> Option<&[LeaderboardEntry]> {
        self.shared_leaderboard.as_deref()
    }

    pub fn last_collision(&self) -> Option<CollisionKind> {
        self.last_collision
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// Leaderboard shown on the game-over screen.
    pub fn displayed_leaderboard(&self) -> &[LeaderboardEntry] {
        self.shared_leaderboard
            .as_deref()
            .unwrap_or(&self.local_leaderboard)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        // Pipes from the last run stay in the manager until the next flap.
        let pipes = match self.state {
            GameState::Playing | GameState::GameOver => self.pipes.pipes(),
            GameState::Menu | GameState::Ready => &[],
        };
        Snapshot {
            state: self.state,
            bird: &self.bird,
            pipes,
            pipe_width: self.pipes.pipe_width,
            gap: self.pipes.gap,
            speed: self.pipes.speed,
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
            ground_height: self.config.ground_height,
            ground_offset: self.ground_offset,
            score: self.score.score,
            best: self.score.best,
            new_best: self.score.new_best,
            leaderboard: self.displayed_leaderboard(),
            leaderboard_is_shared: self.shared_leaderboard.is_some(),
            player_name: self.player_name(),
            name_entry: self.name_entry(),
            hand_visible: self.hand_visible,
            gesture_status: self.gesture_status,
            advisory: self.advisory(),
            flash: self.flash,
            muted: self.audio.is_muted(),
            restart_ready: self.restart_cooldown <= 0.0,
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::ToggleMute => {
                let muted = self.audio.toggle_mute();
                tracing::debug!(muted, "mute toggled");
            }
            Intent::Start => self.start_action(),
            Intent::Flap => self.flap_action(),
            Intent::Rename => {
                if self.state == GameState::Menu && self.name_entry.is_none() {
                    self.open_name_entry();
                }
            }
            Intent::NameInput(c) => {
                if let Some(entry) = self.name_entry.as_mut() {
                    if !c.is_control() && entry.chars().count() < MAX_NAME_LEN {
                        entry.push(c);
                    }
                }
            }
            Intent::NameBackspace => {
                if let Some(entry) = self.name_entry.as_mut() {
                    entry.pop();
                }
            }
            Intent::NameSubmit => self.confirm_name(),
            Intent::NameCancel => {
                self.name_entry = None;
            }
        }
    }

    /// MENU start button: bring up input devices, then name prompt or READY.
    fn start_action(&mut self) {
        if self.state != GameState::Menu || self.name_entry.is_some() {
            return;
        }
        self.audio.resume();
        self.audio.play(AudioCue::Swoosh);
        self.start_gesture();

        if self.player_name.is_none() {
            self.open_name_entry();
        } else {
            self.enter_ready();
        }
    }

    fn flap_action(&mut self) {
        self.audio.resume();
        match self.state {
            GameState::Menu => {}
            GameState::Ready => self.start_run(),
            GameState::Playing => {
                self.bird.flap();
                self.audio.play(AudioCue::Flap);
                self.flash = FLAP_FLASH;
            }
            GameState::GameOver => {
                if self.restart_cooldown <= 0.0 {
                    self.restart();
                }
            }
        }
    }

    fn open_name_entry(&mut self) {
        self.name_entry = Some(self.player_name.clone().unwrap_or_default());
        self.audio.play(AudioCue::MenuOpen);
    }

    fn confirm_name(&mut self) {
        let Some(entry) = self.name_entry.as_ref() else {
            return;
        };
        let name = entry.trim().to_string();
        if name.is_empty() {
            return;
        }
        self.score.set_player_name(&name);
        tracing::info!(name = %name, "player name set");
        self.player_name = Some(name);
        self.name_entry = None;
        self.enter_ready();
    }

    fn start_gesture(&mut self) {
        if self.gesture_status != GestureStatus::Off {
            return;
        }
        match self.gesture.start() {
            Ok(rx) => {
                self.gesture_rx = Some(rx);
                self.gesture_status = GestureStatus::Starting;
            }
            Err(e) => self.gesture_unavailable(&e.to_string()),
        }
    }

    fn gesture_unavailable(&mut self, reason: &str) {
        tracing::warn!("gesture input unavailable: {}", reason);
        self.gesture_status = GestureStatus::Unavailable;
        self.gesture_rx = None;
        self.hand_visible = false;
        if !self.advisory_shown {
            self.advisory_shown = true;
            self.advisory = Some(GESTURE_ADVISORY.to_string());
            self.advisory_ms = ADVISORY_MS;
        }
    }

    /// Dismiss the one-time gesture advisory.
    pub fn clear_advisory(&mut self) {
        self.advisory = None;
    }

    /// Stop gesture tracking and release its source.
    pub fn shutdown(&mut self) {
        self.gesture.stop();
        self.gesture_rx = None;
        self.hand_visible = false;
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn enter_ready(&mut self) {
        tracing::info!("entering {}", GameState::Ready.name());
        self.state = GameState::Ready;
    }

    /// READY -> PLAYING.
    fn start_run(&mut self) {
        self.run_id += 1;
        self.state = GameState::Playing;
        self.bird.reset(self.config.bird_x, self.config.bird_start_y());
        self.pipes.reset();
        self.pipes.gap = self.config.base_gap;
        self.score.reset();
        self.last_collision = None;
        self.bird.flap();
        self.audio.play(AudioCue::Flap);
        self.audio.play(AudioCue::Swoosh);
        self.flash = FLAP_FLASH;
        tracing::info!(run = self.run_id, "run started");
    }

    /// PLAYING -> GAME_OVER.
    fn game_over(&mut self, kind: CollisionKind) {
        self.state = GameState::GameOver;
        self.last_collision = Some(kind);
        self.audio.play(AudioCue::Hit);
        self.restart_cooldown = self.config.restart_cooldown;
        self.flash = HIT_FLASH;

        let score = self.score.score;
        let name = self.player_name.clone().unwrap_or_default();
        self.local_leaderboard = self.score.add_to_leaderboard(score, &name);
        self.remote.submit(&name, score);
        self.pending_fetches.push(PendingFetch {
            run_id: self.run_id,
            reply: self.remote.fetch_top(LEADERBOARD_SIZE),
        });
        tracing::info!(run = self.run_id, score, best = self.score.best, ?kind, "game over");
    }

    /// GAME_OVER -> READY.
    fn restart(&mut self) {
        self.audio.play(AudioCue::Swoosh);
        self.shared_leaderboard = None;
        self.enter_ready();
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Advance one frame. `raw_dt` is elapsed time normalised to a 60 Hz frame.
    pub fn tick(&mut self, raw_dt: f64) {
        let dt = raw_dt.clamp(0.0, self.config.max_dt);
        self.tick_count += 1;
        self.anim_ms += dt * FRAME_MS;

        if self.tick_count % self.config.gesture_poll_interval == 0 {
            self.poll_gesture();
        }
        self.poll_remote();

        match self.state {
            GameState::Menu => {}
            GameState::Ready => {
                self.bird.idle(self.config.bird_start_y(), self.anim_ms);
                self.ground_offset = (self.ground_offset + READY_GROUND_SPEED * dt) % GROUND_SCROLL_PERIOD;
            }
            GameState::Playing => self.tick_playing(dt),
            GameState::GameOver => {
                if self.restart_cooldown > 0.0 {
                    self.restart_cooldown -= dt;
                }
                let rest_y = self.bird.resting_y(self.config.ground_y());
                self.bird.fall(dt, rest_y);
            }
        }

        if self.flash > 0.0 {
            self.flash = (self.flash - FLASH_DECAY_PER_TICK * dt).max(0.0);
        }
        if self.advisory.is_some() {
            self.advisory_ms -= dt * FRAME_MS;
            if self.advisory_ms <= 0.0 {
                self.advisory = None;
            }
        }
    }

    fn tick_playing(&mut self, dt: f64) {
        self.bird.update(dt, self.anim_ms);
        self.pipes.update(dt, &mut self.rng);
        self.ground_offset = (self.ground_offset + self.pipes.speed * dt) % GROUND_SCROLL_PERIOD;

        let bird_x = self.bird.x;
        let width = self.pipes.pipe_width;
        let mut newly_passed = 0;
        for pipe in self.pipes.pipes_mut() {
            if !pipe.passed && pipe.x + width < bird_x {
                pipe.passed = true;
                newly_passed += 1;
            }
        }
        for _ in 0..newly_passed {
            self.score_point();
        }

        if let Some(kind) = check_collision(
            &self.bird,
            &self.pipes,
            self.config.arena_height,
            self.config.ground_height,
        ) {
            if kind == CollisionKind::Ground {
                let rest_y = self.bird.resting_y(self.config.ground_y());
                self.bird.land(rest_y);
            }
            self.game_over(kind);
        }
    }

    fn score_point(&mut self) {
        self.score.increment();
        self.audio.play(AudioCue::Score);

        let score = self.score.score;
        if score > 0 && score % self.config.speed_increase_interval == 0 {
            self.pipes.increase_speed(self.config.speed_increase_factor);
            self.pipes.shrink_gap(self.config.gap_step, self.config.min_gap);
            tracing::debug!(
                score,
                speed = self.pipes.speed,
                gap = self.pipes.gap,
                "difficulty increased"
            );
        }
    }

    fn poll_gesture(&mut self) {
        let Some(rx) = self.gesture_rx.as_ref() else {
            return;
        };
        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for event in events {
            match event {
                GestureEvent::Ready => {
                    tracing::info!("gesture input ready");
                    self.gesture_status = GestureStatus::Ready;
                }
                GestureEvent::Unavailable(reason) => self.gesture_unavailable(&reason),
                GestureEvent::Pinch => {
                    tracing::debug!("pinch");
                    self.flap_action();
                }
                GestureEvent::Hand(visible) => self.hand_visible = visible,
            }
        }

        if disconnected && self.gesture_rx.is_some() {
            tracing::info!("gesture stream ended");
            self.gesture_rx = None;
            self.hand_visible = false;
        }
    }

    fn poll_remote(&mut self) {
        let pending = std::mem::take(&mut self.pending_fetches);
        for fetch in pending {
            match fetch.reply.try_recv() {
                Ok(Some(entries)) => {
                    if self.state == GameState::GameOver && fetch.run_id == self.run_id {
                        self.shared_leaderboard = Some(entries);
                    } else {
                        tracing::debug!(run = fetch.run_id, "discarding stale leaderboard");
                    }
                }
                Ok(None) | Err(TryRecvError::Disconnected) => {}
                Err(TryRecvError::Empty) => self.pending_fetches.push(fetch),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueLog;
    use crate::gesture::NoGesture;
    use crate::leaderboard::{OfflineLeaderboard, QueuedLeaderboard};
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn controller_with(
        store: MemoryStore,
        audio: CueLog,
        remote: Box<dyn RemoteLeaderboard>,
    ) -> GameController<ChaCha8Rng> {
        GameController::new(
            GameConfig::default(),
            Collaborators {
                audio: Box::new(audio),
                store: Box::new(store),
                remote,
                gesture: Box::new(NoGesture),
            },
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    fn controller() -> GameController<ChaCha8Rng> {
        controller_with(
            MemoryStore::with_player("ada"),
            CueLog::new(),
            Box::new(OfflineLeaderboard),
        )
    }

    fn crash(game: &mut GameController<ChaCha8Rng>) {
        game.bird.y = 572.0;
        game.bird.velocity = 0.0;
        game.tick(1.0);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_starts_in_menu() {
        let game = controller();
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.run_id(), 0);
    }

    #[test]
    fn test_flap_ignored_in_menu() {
        let mut game = controller();
        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::Menu);
    }

    #[test]
    fn test_start_with_known_name_goes_ready() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        assert_eq!(game.state(), GameState::Ready);
        assert!(game.name_entry().is_none());
    }

    #[test]
    fn test_start_without_name_opens_prompt() {
        let audio = CueLog::new();
        let mut game = controller_with(
            MemoryStore::new(),
            audio.clone(),
            Box::new(OfflineLeaderboard),
        );
        game.handle_intent(Intent::Start);
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.name_entry(), Some(""));
        assert_eq!(audio.count(AudioCue::MenuOpen), 1);

        // Blank names are rejected.
        game.handle_intent(Intent::NameInput(' '));
        game.handle_intent(Intent::NameSubmit);
        assert_eq!(game.state(), GameState::Menu);

        for c in "bob".chars() {
            game.handle_intent(Intent::NameInput(c));
        }
        game.handle_intent(Intent::NameSubmit);
        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.player_name(), Some("bob"));
        assert_eq!(game.score.player_name().as_deref(), Some("bob"));
    }

    #[test]
    fn test_name_length_capped_and_backspace() {
        let mut game = controller_with(
            MemoryStore::new(),
            CueLog::new(),
            Box::new(OfflineLeaderboard),
        );
        game.handle_intent(Intent::Start);
        for _ in 0..40 {
            game.handle_intent(Intent::NameInput('x'));
        }
        assert_eq!(game.name_entry().unwrap().len(), MAX_NAME_LEN);
        game.handle_intent(Intent::NameBackspace);
        assert_eq!(game.name_entry().unwrap().len(), MAX_NAME_LEN - 1);
        game.handle_intent(Intent::NameCancel);
        assert!(game.name_entry().is_none());
        assert_eq!(game.state(), GameState::Menu);
    }

    #[test]
    fn test_gesture_unavailable_sets_advisory() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        assert_eq!(game.gesture_status(), GestureStatus::Unavailable);
        assert_eq!(game.advisory(), Some(GESTURE_ADVISORY));
        game.clear_advisory();
        assert!(game.advisory().is_none());
    }

    #[test]
    fn test_advisory_expires() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        assert!(game.advisory().is_some());
        for _ in 0..170 {
            game.tick(1.0);
        }
        assert!(game.advisory().is_some());
        for _ in 0..20 {
            game.tick(1.0);
        }
        assert!(game.advisory().is_none());
    }

    #[test]
    fn test_first_flap_starts_run() {
        let audio = CueLog::new();
        let mut game = controller_with(
            MemoryStore::with_player("ada"),
            audio.clone(),
            Box::new(OfflineLeaderboard),
        );
        game.handle_intent(Intent::Start);
        game.pipes.gap = 124.0;
        game.score.score = 9;
        game.handle_intent(Intent::Flap);

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.run_id(), 1);
        assert_eq!(game.bird.velocity, FLAP_STRENGTH);
        assert_eq!(game.bird.x, BIRD_X);
        assert_eq!(game.pipes.gap, BASE_GAP);
        assert!(game.pipes.pipes().is_empty());
        assert_eq!(game.score.score, 0);
        assert!(audio.count(AudioCue::Flap) >= 1);
    }

    #[test]
    fn test_dt_clamped() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        let v0 = game.bird.velocity;
        game.tick(10.0);
        assert_eq!(game.bird.velocity, v0 + GRAVITY * MAX_FRAME_DT);
    }

    #[test]
    fn test_ready_bird_hovers() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        let start_y = game.config().bird_start_y();
        for _ in 0..120 {
            game.tick(1.0);
            assert!((game.bird.y - start_y).abs() <= 8.0 + 1e-9);
        }
        assert_eq!(game.state(), GameState::Ready);
        assert!(game.ground_offset() < GROUND_SCROLL_PERIOD);
    }

    #[test]
    fn test_passing_pipe_scores_once() {
        let audio = CueLog::new();
        let mut game = controller_with(
            MemoryStore::with_player("ada"),
            audio.clone(),
            Box::new(OfflineLeaderboard),
        );
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        audio.clear();
        let pipe_width = game.pipes.pipe_width;
        game.pipes.pipes_mut().push(Pipe {
            x: game.bird.x - pipe_width + 1.0,
            gap_y: game.bird.y,
            passed: false,
        });
        game.tick(1.0);
        assert_eq!(game.score.score, 1);
        game.tick(1.0);
        game.tick(1.0);
        assert_eq!(game.score.score, 1);
        assert_eq!(audio.count(AudioCue::Score), 1);
    }

    #[test]
    fn test_ground_crash_clamps_bird() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        game.bird.y = 570.0;
        game.bird.velocity = 20.0;
        game.tick(1.0);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.last_collision(), Some(CollisionKind::Ground));
        assert_eq!(game.bird.y, 580.0 - BIRD_HEIGHT / 2.0);
        assert_eq!(game.bird.velocity, 0.0);
    }

    #[test]
    fn test_game_over_records_and_submits() {
        let remote = QueuedLeaderboard::new();
        let mut game = controller_with(
            MemoryStore::with_player("ada"),
            CueLog::new(),
            Box::new(remote.clone()),
        );
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        game.score.increment();
        game.score.increment();
        crash(&mut game);

        assert_eq!(remote.submitted(), vec![("ada".to_string(), 2)]);
        assert_eq!(remote.pending(), 1);
        assert_eq!(game.displayed_leaderboard().len(), 1);
        assert_eq!(game.displayed_leaderboard()[0].score, 2);
        assert_eq!(game.restart_cooldown(), RESTART_COOLDOWN_TICKS);
    }

    #[test]
    fn test_restart_cooldown_boundary() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        crash(&mut game);

        for _ in 0..29 {
            game.tick(1.0);
        }
        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::GameOver);

        game.tick(1.0);
        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::Ready);
    }

    #[test]
    fn test_ready_snapshot_hides_previous_pipes() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        for _ in 0..10 {
            game.tick(1.0);
        }
        crash(&mut game);
        assert!(!game.snapshot().pipes.is_empty());

        for _ in 0..RESTART_COOLDOWN_TICKS as usize {
            game.tick(1.0);
        }
        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::Ready);
        assert!(!game.pipes.pipes().is_empty());
        assert!(game.snapshot().pipes.is_empty());

        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.pipes.pipes().iter().all(|p| p.x >= ARENA_WIDTH));
    }

    #[test]
    fn test_shared_leaderboard_applies_to_current_run() {
        let remote = QueuedLeaderboard::new();
        let mut game = controller_with(
            MemoryStore::with_player("ada"),
            CueLog::new(),
            Box::new(remote.clone()),
        );
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        crash(&mut game);

        let shared = vec![LeaderboardEntry {
            score: 99,
            name: "zed".to_string(),
            timestamp: 1,
        }];
        remote.resolve_next(Some(shared.clone()));
        game.tick(1.0);
        assert_eq!(game.shared_leaderboard(), Some(shared.as_slice()));
        assert_eq!(game.displayed_leaderboard()[0].name, "zed");

        for _ in 0..40 {
            game.tick(1.0);
        }
        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::Ready);
        assert!(game.shared_leaderboard().is_none());
    }

    #[test]
    fn test_stale_leaderboard_discarded() {
        let remote = QueuedLeaderboard::new();
        let mut game = controller_with(
            MemoryStore::with_player("ada"),
            CueLog::new(),
            Box::new(remote.clone()),
        );
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        crash(&mut game);
        for _ in 0..31 {
            game.tick(1.0);
        }
        game.handle_intent(Intent::Flap);
        assert_eq!(game.state(), GameState::Ready);

        // Reply for run 1 lands while READY: ignored.
        remote.resolve_next(Some(vec![LeaderboardEntry {
            score: 50,
            name: "old".to_string(),
            timestamp: 1,
        }]));
        game.tick(1.0);
        assert!(game.shared_leaderboard().is_none());

        // Run 2 crashes; nothing from run 1 resurfaces.
        game.handle_intent(Intent::Flap);
        crash(&mut game);
        game.tick(1.0);
        assert!(game.shared_leaderboard().is_none());
        assert_eq!(remote.pending(), 1);
    }

    #[test]
    fn test_flash_decays() {
        let mut game = controller();
        game.handle_intent(Intent::Start);
        game.handle_intent(Intent::Flap);
        assert_eq!(game.flash(), FLAP_FLASH);
        for _ in 0..20 {
            game.tick(1.0);
        }
        assert_eq!(game.flash(), 0.0);
    }

    #[test]
    fn test_mute_toggle() {
        let mut game = controller();
        assert!(!game.is_muted());
        game.handle_intent(Intent::ToggleMute);
        assert!(game.is_muted());
        assert!(game.snapshot().muted);
    }
}
