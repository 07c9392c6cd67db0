//! # Hostiles
//!
//! Monsters and the boss share one struct with a kind tag. Each step a
//! living hostile picks its state from the horizontal distance to the
//! player:
//!
//! ```text
//!  distance >= AGGRO_RADIUS          -> IdleFar    (stand still)
//!  melee <= distance < AGGRO_RADIUS  -> Pursuing   (step toward player)
//!  distance < melee                  -> Attacking  (roll to hit, no move)
//!  health == 0                       -> Dead       (terminal)
//! ```
//!
//! Dead hostiles stay in the list so ids remain valid, but they are skipped
//! by AI, projectiles and the sprite snapshot.

use std::fmt;

use delve_economy::{parse_color, BossTemplate, MonsterTemplate};
use delve_procedural::{ChunkRenderer, WorldManager};
use delve_shared::{SpriteInstance, Vec3};
use rand::Rng;

use super::feedback::Feedback;
use crate::physics;
use crate::rng::SimRng;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Hostiles farther than this ignore the player.
pub const AGGRO_RADIUS: f32 = 15.0;

/// Monster attack reach.
pub const MONSTER_MELEE_RADIUS: f32 = 1.5;

/// Boss attack reach.
pub const BOSS_MELEE_RADIUS: f32 = 2.5;

/// Chance a monster in reach lands a hit, per step.
pub const MONSTER_ATTACK_CHANCE: f32 = 0.01;

/// Chance the boss in reach lands a hit, per step.
pub const BOSS_ATTACK_CHANCE: f32 = 0.02;

/// Boss pursuit speed.
pub const BOSS_SPEED: f32 = 1.5;

/// Height of the boss billboard's centre.
pub const BOSS_HEIGHT: f32 = 1.0;

/// How long a hit tints the sprite.
pub const HIT_FLASH_DURATION: f64 = 0.1;

/// Tint while flashing.
pub const HIT_TINT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Base experience for a monster kill; a roll in `[0, 10)` is added.
pub const MONSTER_KILL_EXPERIENCE: u32 = 10;

/// Experience for killing the boss.
pub const BOSS_KILL_EXPERIENCE: u32 = 50;

/// Sprite template index reported for the boss.
pub const BOSS_SPRITE_TEMPLATE: u32 = u32::MAX;

// ============================================================================
// TYPES
// ============================================================================

/// Stable handle to a hostile: its index in the simulation's list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostileId(pub u32);

impl fmt::Display for HostileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a hostile is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostileKind {
    /// A regular monster, built from the catalog template at this index.
    Monster {
        /// Catalog index of the monster template.
        template: usize,
    },
    /// The boss.
    Boss,
}

impl HostileKind {
    /// Attack reach.
    #[must_use]
    pub const fn melee_radius(self) -> f32 {
        match self {
            Self::Monster { .. } => MONSTER_MELEE_RADIUS,
            Self::Boss => BOSS_MELEE_RADIUS,
        }
    }

    /// Per-step hit chance when in reach.
    #[must_use]
    pub const fn attack_chance(self) -> f32 {
        match self {
            Self::Monster { .. } => MONSTER_ATTACK_CHANCE,
            Self::Boss => BOSS_ATTACK_CHANCE,
        }
    }

    /// Returns true for the boss.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Boss)
    }

    /// Rolls the experience a kill awards.
    pub fn kill_experience<G: Rng + ?Sized>(self, rng: &mut G) -> u32 {
        match self {
            Self::Monster { .. } => MONSTER_KILL_EXPERIENCE + rng.gen_range(0..10),
            Self::Boss => BOSS_KILL_EXPERIENCE,
        }
    }
}

/// AI state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AiState {
    /// Player out of aggro range.
    #[default]
    IdleFar,
    /// Closing in.
    Pursuing,
    /// In reach, rolling to hit.
    Attacking,
    /// Terminal.
    Dead,
}

/// A monster or the boss.
#[derive(Clone, Debug, PartialEq)]
pub struct Hostile {
    /// Handle.
    pub id: HostileId,
    /// Kind tag.
    pub kind: HostileKind,
    /// Display name.
    pub name: String,
    /// Billboard centre. Y is derived from scale at spawn.
    pub position: Vec3,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Damage per landed attack.
    pub damage: u32,
    /// Pursuit speed in units per second.
    pub speed: f32,
    /// Billboard size.
    pub scale: f32,
    /// Base tint.
    pub color: [f32; 4],
    /// Current AI state.
    pub state: AiState,
    /// Hit flash.
    pub feedback: Feedback,
}

impl Hostile {
    /// Builds a monster standing on the floor at `(x, z)`.
    #[must_use]
    pub fn monster(id: HostileId, template_index: usize, template: &MonsterTemplate, x: f32, z: f32) -> Self {
        Self {
            id,
            kind: HostileKind::Monster { template: template_index },
            name: template.name.clone(),
            position: Vec3::new(x, template.scale * 0.5, z),
            health: template.hp,
            max_health: template.hp,
            damage: template.attack_damage(),
            speed: template.move_speed(),
            scale: template.scale,
            color: parse_color(&template.color),
            state: AiState::IdleFar,
            feedback: Feedback::Normal,
        }
    }

    /// Builds the boss at `(x, z)`.
    #[must_use]
    pub fn boss(id: HostileId, template: &BossTemplate, x: f32, z: f32) -> Self {
        Self {
            id,
            kind: HostileKind::Boss,
            name: template.name.clone(),
            position: Vec3::new(x, BOSS_HEIGHT, z),
            health: template.hp,
            max_health: template.hp,
            damage: template.damage,
            speed: BOSS_SPEED,
            scale: template.scale,
            color: parse_color(&template.color),
            state: AiState::IdleFar,
            feedback: Feedback::Normal,
        }
    }

    /// Returns true once health has reached zero.
    #[inline]
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == AiState::Dead
    }

    /// State the hostile should be in for a player at `player`.
    #[must_use]
    pub fn desired_state(&self, player: Vec3) -> AiState {
        if self.is_dead() {
            return AiState::Dead;
        }
        let distance = self.position.horizontal_distance(player);
        if distance < self.kind.melee_radius() {
            AiState::Attacking
        } else if distance < AGGRO_RADIUS {
            AiState::Pursuing
        } else {
            AiState::IdleFar
        }
    }

    /// Runs one AI step.
    ///
    /// # Returns
    ///
    /// The damage dealt to the player this step, if an attack landed.
    pub fn update<R: ChunkRenderer>(
        &mut self,
        dt: f32,
        world: &mut WorldManager<R>,
        player: Vec3,
        rng: &mut SimRng,
    ) -> Option<u32> {
        self.state = self.desired_state(player);

        match self.state {
            AiState::IdleFar | AiState::Dead => None,
            AiState::Pursuing => {
                let y = self.position.y;
                let moved = physics::step_toward(world, self.position, player, self.speed * dt);
                self.position = moved.position.with_y(y);
                None
            }
            AiState::Attacking => rng.chance(self.kind.attack_chance()).then_some(self.damage),
        }
    }

    /// Applies projectile damage and starts the hit flash.
    ///
    /// # Returns
    ///
    /// `true` if this hit killed the hostile.
    pub fn apply_damage(&mut self, amount: u32, now: f64) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.feedback.trigger(now, HIT_FLASH_DURATION);
        if self.health == 0 {
            self.state = AiState::Dead;
            return true;
        }
        false
    }

    /// Billboard for the renderer. Dead hostiles are invisible.
    #[must_use]
    pub fn sprite(&self) -> SpriteInstance {
        let color = if self.feedback.is_flashing() { HIT_TINT } else { self.color };
        let template = match self.kind {
            HostileKind::Monster { template } => template as u32,
            HostileKind::Boss => BOSS_SPRITE_TEMPLATE,
        };
        SpriteInstance::new(self.position, self.scale, color, !self.is_dead(), template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_economy::GameCatalog;
    use delve_procedural::{NullRenderer, WorldConfig};

    fn skeleton(x: f32, z: f32) -> Hostile {
        let catalog = GameCatalog::default();
        Hostile::monster(HostileId(0), 0, &catalog.monsters[0], x, z)
    }

    fn world() -> WorldManager<NullRenderer> {
        WorldManager::new(WorldConfig::default(), NullRenderer)
    }

    #[test]
    fn test_monster_from_template() {
        let m = skeleton(1.0, 2.0);
        assert_eq!(m.health, 30);
        assert_eq!(m.damage, 5);
        assert_eq!(m.position.y, 0.5);
        assert_eq!(m.state, AiState::IdleFar);
    }

    #[test]
    fn test_boss_from_template() {
        let boss = Hostile::boss(HostileId(9), &BossTemplate::default(), 5.0, 5.0);
        assert_eq!(boss.health, 200);
        assert_eq!(boss.damage, 15);
        assert_eq!(boss.position.y, BOSS_HEIGHT);
        assert!(boss.kind.is_boss());
    }

    #[test]
    fn test_state_by_distance() {
        let m = skeleton(0.5, 0.5);
        assert_eq!(m.desired_state(Vec3::on_floor(0.5, 1.5)), AiState::Attacking);
        assert_eq!(m.desired_state(Vec3::on_floor(0.5, 5.5)), AiState::Pursuing);
        assert_eq!(m.desired_state(Vec3::on_floor(0.5, 20.5)), AiState::IdleFar);

        let boss = Hostile::boss(HostileId(1), &BossTemplate::default(), 0.5, 0.5);
        assert_eq!(boss.desired_state(Vec3::on_floor(0.5, 2.5)), AiState::Attacking);
    }

    #[test]
    fn test_pursuit_closes_distance() {
        let mut world = world();
        let mut rng = SimRng::default();
        let mut m = skeleton(-2.0, 0.5);
        let player = Vec3::new(2.0, 1.2, 0.5);

        let before = m.position.horizontal_distance(player);
        let hit = m.update(0.5, &mut world, player, &mut rng);
        assert!(hit.is_none());
        assert_eq!(m.state, AiState::Pursuing);
        assert!((before - m.position.horizontal_distance(player) - 0.5).abs() < 1e-5);
        assert_eq!(m.position.y, 0.5);
    }

    #[test]
    fn test_attacking_does_not_move() {
        let mut world = world();
        let mut rng = SimRng::default();
        let mut m = skeleton(0.5, 0.5);
        let player = Vec3::new(0.5, 1.2, 1.5);

        let mut landed = 0;
        for _ in 0..2000 {
            if let Some(damage) = m.update(1.0 / 60.0, &mut world, player, &mut rng) {
                assert_eq!(damage, 5);
                landed += 1;
            }
        }
        assert_eq!(m.position, Vec3::new(0.5, 0.5, 0.5));
        // ~1% of 2000 steps
        assert!((5..60).contains(&landed), "{landed}");
    }

    #[test]
    fn test_damage_and_death() {
        let mut m = skeleton(0.0, 0.0);
        assert!(!m.apply_damage(12, 0.0));
        assert_eq!(m.health, 18);
        assert!(m.feedback.is_flashing());

        assert!(m.apply_damage(100, 0.5));
        assert!(m.is_dead());
        assert!(!m.sprite().is_visible());

        // Already dead: no second kill.
        assert!(!m.apply_damage(5, 1.0));
    }

    #[test]
    fn test_dead_hostile_is_inert() {
        let mut world = world();
        let mut rng = SimRng::default();
        let mut m = skeleton(0.5, 0.5);
        m.apply_damage(1000, 0.0);

        for _ in 0..100 {
            assert!(m.update(0.1, &mut world, Vec3::on_floor(0.5, 1.0), &mut rng).is_none());
        }
        assert_eq!(m.state, AiState::Dead);
    }

    #[test]
    fn test_flash_tint() {
        let mut m = skeleton(0.0, 0.0);
        m.apply_damage(1, 0.0);
        assert_eq!(m.sprite().color, HIT_TINT);

        m.feedback.update(HIT_FLASH_DURATION);
        assert_eq!(m.sprite().color, m.color);
    }

    #[test]
    fn test_kill_experience() {
        let mut rng = SimRng::default();
        for _ in 0..100 {
            let xp = HostileKind::Monster { template: 0 }.kill_experience(&mut rng);
            assert!((10..20).contains(&xp));
        }
        assert_eq!(HostileKind::Boss.kill_experience(&mut rng), BOSS_KILL_EXPERIENCE);
    }
}
