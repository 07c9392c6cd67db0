//! # Gameplay Systems
//!
//! This module contains the entity and combat layer:
//! - Player state and progression
//! - Hostiles (monsters and the boss) and their AI
//! - Spell bolts and hit resolution
//! - Chests

pub mod chest;
pub mod feedback;
pub mod hostile;
pub mod player;
pub mod projectile;
pub mod spells;

pub use chest::{find_openable, Chest, INTERACT_RANGE};
pub use feedback::Feedback;
pub use hostile::{
    AiState, Hostile, HostileId, HostileKind, AGGRO_RADIUS, BOSS_MELEE_RADIUS, HIT_FLASH_DURATION,
    MONSTER_MELEE_RADIUS,
};
pub use player::{Player, HURT_FEEDBACK_DURATION};
pub use projectile::{Projectile, HIT_RADIUS, PROJECTILE_LIFETIME, PROJECTILE_SPEED};
pub use spells::SpellBook;
