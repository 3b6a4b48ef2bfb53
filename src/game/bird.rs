//! The player avatar: position, velocity, rotation and wing animation.

use super::types::Rect;
use crate::config::GameConfig;
use crate::constants::*;

/// Physical state of the bird. Created once and reused across runs.
#[derive(Debug, Clone)]
pub struct Bird {
    /// Centre x. Fixed after spawn.
    pub x: f64,
    /// Centre y (grows downward).
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity per tick (positive = downward).
    pub velocity: f64,
    /// Rotation in radians (positive = nose down).
    pub rotation: f64,
    /// Ticks of flap animation remaining.
    pub flap_frame: u32,
    /// Cosmetic wing angle in degrees.
    pub wing_angle: f64,
    pub gravity: f64,
    pub flap_strength: f64,
}

impl Bird {
    pub fn new(x: f64, y: f64, gravity: f64, flap_strength: f64) -> Self {
        Self {
            x,
            y,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            velocity: 0.0,
            rotation: 0.0,
            flap_frame: 0,
            wing_angle: 0.0,
            gravity,
            flap_strength,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.bird_x,
            config.bird_start_y(),
            config.gravity,
            config.flap_strength,
        )
    }

    /// Set velocity to the flap impulse (not additive) and restart the wing animation.
    pub fn flap(&mut self) {
        self.velocity = self.flap_strength;
        self.flap_frame = FLAP_ANIM_TICKS;
    }

    /// Integrate one tick of physics.
    ///
    /// `anim_ms` is accumulated animation time, used only for the idle wing bob.
    pub fn update(&mut self, dt: f64, anim_ms: f64) {
        self.velocity += self.gravity * dt;
        self.y += self.velocity * dt;

        let target = target_rotation(self.velocity);
        self.rotation += (target - self.rotation) * ROTATION_SMOOTHING;

        self.animate_wing(anim_ms);
    }

    fn animate_wing(&mut self, anim_ms: f64) {
        if self.flap_frame > 0 {
            self.flap_frame -= 1;
            self.wing_angle = (self.flap_frame as f64 * 0.9).sin() * 35.0;
        } else {
            self.wing_angle = (anim_ms * 0.006).sin() * 8.0;
        }
    }

    /// Hover around `base_y` while waiting for the first flap.
    pub fn idle(&mut self, base_y: f64, anim_ms: f64) {
        self.y = base_y + (anim_ms * 0.003).sin() * 8.0;
        self.rotation = 0.0;
        self.wing_angle = (anim_ms * 0.006).sin() * 10.0;
    }

    /// Post-crash fall toward `rest_y`. Returns true once the bird is resting.
    pub fn fall(&mut self, dt: f64, rest_y: f64) -> bool {
        if self.y >= rest_y {
            return true;
        }
        self.velocity += self.gravity * dt;
        self.y += self.velocity * dt;
        self.rotation = (self.rotation + DEATH_SPIN_PER_TICK * dt).min(std::f64::consts::FRAC_PI_2);
        if self.y >= rest_y {
            self.land(rest_y);
            return true;
        }
        false
    }

    /// Pin the bird on the ground.
    pub fn land(&mut self, rest_y: f64) {
        self.y = rest_y;
        self.velocity = 0.0;
    }

    /// Centre y at which the bird sits on a ground surface at `ground_y`.
    pub fn resting_y(&self, ground_y: f64) -> f64 {
        ground_y - self.height / 2.0
    }

    /// Collision hitbox, inset from the sprite on every side.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.width / 2.0 + BIRD_HITBOX_INSET,
            self.y - self.height / 2.0 + BIRD_HITBOX_INSET,
            self.width - 2.0 * BIRD_HITBOX_INSET,
            self.height - 2.0 * BIRD_HITBOX_INSET,
        )
    }

    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.velocity = 0.0;
        self.rotation = 0.0;
        self.flap_frame = 0;
    }
}

/// Rotation the bird eases toward for a given velocity, in radians.
pub fn target_rotation(velocity: f64) -> f64 {
    (velocity * 4.0)
        .clamp(MIN_ROTATION_DEG, MAX_ROTATION_DEG)
        .to_radians()
}
