//! # Player
//!
//! Camera-carried player state: position at eye height, yaw/pitch, health,
//! progression, spells and inventory.
//!
//! ## Progression
//!
//! Experience carries over between levels. One gain can cross several
//! thresholds; each crossing subtracts the threshold, raises the level,
//! grows the next threshold by 1.5x (floored), adds 20 maximum health and
//! heals fully.

use delve_economy::Inventory;
use delve_shared::constants::{EYE_HEIGHT, LOOK_SENSITIVITY, MAX_PITCH, MOVE_SPEED, ROT_SPEED};
use delve_shared::Vec3;

use super::feedback::Feedback;
use super::spells::SpellBook;
use crate::physics;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Health at level 1.
pub const STARTING_HEALTH: u32 = 100;

/// Experience needed for level 2.
pub const FIRST_LEVEL_THRESHOLD: u32 = 100;

/// Threshold growth per level.
pub const LEVEL_THRESHOLD_GROWTH: f64 = 1.5;

/// Maximum health added per level.
pub const MAX_HEALTH_PER_LEVEL: u32 = 20;

/// How long the damage overlay shows.
pub const HURT_FEEDBACK_DURATION: f64 = 0.5;

// ============================================================================
// PLAYER
// ============================================================================

/// The player.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Camera position; `y` is eye height.
    pub position: Vec3,
    /// Heading in radians. 0 looks down -Z.
    pub yaw: f32,
    /// Look elevation in radians, within `[-MAX_PITCH, MAX_PITCH]`.
    pub pitch: f32,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Experience needed for the next level.
    pub next_level: u32,
    /// Current level, from 1.
    pub level: u32,
    /// Terminal. Blocks movement, casting, interaction and hostile attacks.
    pub dead: bool,
    /// Damage overlay.
    pub feedback: Feedback,
    /// Spell selection and cooldown.
    pub spells: SpellBook,
    /// Carried items and equipment.
    pub inventory: Inventory,
}

impl Player {
    /// Creates a level 1 player standing at `(x, z)`.
    #[must_use]
    pub fn new(x: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, EYE_HEIGHT, z),
            yaw: 0.0,
            pitch: 0.0,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            experience: 0,
            next_level: FIRST_LEVEL_THRESHOLD,
            level: 1,
            dead: false,
            feedback: Feedback::Normal,
            spells: SpellBook::default(),
            inventory: Inventory::new(),
        }
    }

    /// Applies look deltas. Pitch is clamped.
    pub fn look(&mut self, look_x: f32, look_y: f32) {
        self.yaw -= look_x * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - look_y * LOOK_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Turns at `turn * ROT_SPEED` radians per second.
    pub fn turn(&mut self, turn: f32, dt: f32) {
        self.yaw += turn * ROT_SPEED * dt;
    }

    /// Horizontal displacement for this tick's walk intent.
    ///
    /// Forward and strafe combine into one direction normalized to
    /// `MOVE_SPEED * dt`, so diagonals aren't faster.
    #[must_use]
    pub fn walk_delta(&self, forward: f32, strafe: f32, dt: f32) -> Vec3 {
        let wish = physics::forward_vector(self.yaw) * forward + physics::right_vector(self.yaw) * strafe;
        wish.normalize_or_zero() * (MOVE_SPEED * dt)
    }

    /// Unit view direction.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        physics::view_direction(self.yaw, self.pitch)
    }

    /// Adds experience and levels up as many times as it covers.
    ///
    /// # Returns
    ///
    /// The number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;

        while self.next_level > 0 && self.experience >= self.next_level {
            self.experience -= self.next_level;
            self.level += 1;
            self.next_level = (f64::from(self.next_level) * LEVEL_THRESHOLD_GROWTH).floor() as u32;
            self.max_health += MAX_HEALTH_PER_LEVEL;
            self.health = self.max_health;
            gained += 1;
        }

        gained
    }

    /// Applies a landed attack and starts the damage overlay.
    ///
    /// Ignored once dead.
    ///
    /// # Returns
    ///
    /// `true` if this hit killed the player.
    pub fn take_damage(&mut self, amount: u32, now: f64) -> bool {
        if self.dead {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.feedback.trigger(now, HURT_FEEDBACK_DURATION);
        if self.health == 0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Returns true while the damage overlay shows.
    #[must_use]
    pub const fn is_hurt(&self) -> bool {
        self.feedback.is_flashing()
    }
}
