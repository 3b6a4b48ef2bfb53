//! Fire-and-forget sound cues.
//!
//! Sound synthesis lives outside the game core; the controller only names the
//! event that happened.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Flap,
    Score,
    Hit,
    Swoosh,
    MenuOpen,
}

impl AudioCue {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flap => "flap",
            Self::Score => "score",
            Self::Hit => "hit",
            Self::Swoosh => "swoosh",
            Self::MenuOpen => "menu-open",
        }
    }
}

pub trait Audio {
    /// Unlock output after a user gesture. No-op by default.
    fn resume(&mut self) {}

    fn play(&mut self, cue: AudioCue);

    /// Flip the mute flag and return the new value.
    fn toggle_mute(&mut self) -> bool;

    fn is_muted(&self) -> bool;
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct SilentAudio {
    muted: bool,
}

impl Audio for SilentAudio {
    fn play(&mut self, cue: AudioCue) {
        tracing::trace!(cue = cue.name(), "silent cue");
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Rings the terminal bell on impact.
#[derive(Debug, Default)]
pub struct TerminalBell {
    muted: bool,
}

impl TerminalBell {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }
}

impl Audio for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        if self.muted || cue != AudioCue::Hit {
            return;
        }
        let mut out = io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            tracing::debug!("bell failed: {}", e);
        }
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Test double that records audible cues into a shared list.
/// Single-threaded (`Rc`), not meant for the real game.
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    played: Rc<RefCell<Vec<AudioCue>>>,
    muted: bool,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, in order.
    pub fn played(&self) -> Vec<AudioCue> {
        self.played.borrow().clone()
    }

    pub fn count(&self, cue: AudioCue) -> usize {
        self.played.borrow().iter().filter(|c| **c == cue).count()
    }

    pub fn clear(&self) {
        self.played.borrow_mut().clear();
    }
}

impl Audio for CueLog {
    fn play(&mut self, cue: AudioCue) {
        if !self.muted {
            self.played.borrow_mut().push(cue);
        }
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
