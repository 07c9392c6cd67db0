//! # Projectiles
//!
//! Spell bolts fly in a straight line for a fixed lifetime. Each step a bolt
//! moves, then tests the boss (if alive) and every living monster in list
//! order; the first hostile within `HIT_RADIUS` takes the damage and the bolt
//! is gone.

use delve_economy::parse_color;
use delve_economy::SpellTemplate;
use delve_shared::{SpriteInstance, Vec3};

use super::hostile::Hostile;

/// Bolt speed in units per second.
pub const PROJECTILE_SPEED: f32 = 10.0;

/// Seconds a bolt lives.
pub const PROJECTILE_LIFETIME: f32 = 2.0;

/// Distance from a hostile's centre that counts as a hit.
pub const HIT_RADIUS: f32 = 1.0;

/// Spawn offset along the view direction.
pub const SPAWN_FORWARD_OFFSET: f32 = 0.5;

/// Spawn offset below the eye.
pub const SPAWN_DROP: f32 = 0.2;

/// Billboard size of a bolt.
pub const PROJECTILE_SCALE: f32 = 0.2;

/// A bolt in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Current position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Seconds left.
    pub life: f32,
    /// Damage copied from the spell at cast time.
    pub damage: u32,
    /// Index of the spell that cast it.
    pub spell: usize,
    /// Tint.
    pub color: [f32; 4],
}

impl Projectile {
    /// Casts `spell` from `eye` along the unit vector `direction`.
    #[must_use]
    pub fn cast(eye: Vec3, direction: Vec3, spell_index: usize, spell: &SpellTemplate) -> Self {
        let mut position = eye + direction * SPAWN_FORWARD_OFFSET;
        position.y -= SPAWN_DROP;
        Self {
            position,
            velocity: direction * PROJECTILE_SPEED,
            life: PROJECTILE_LIFETIME,
            damage: spell.damage,
            spell: spell_index,
            color: parse_color(&spell.color),
        }
    }

    /// Moves the bolt and burns lifetime.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.life -= dt;
    }

    /// Returns true once the lifetime has run out.
    #[inline]
    #[must_use]
    pub fn expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Index of the hostile this bolt hits, if any.
    ///
    /// The boss is tested before any monster.
    #[must_use]
    pub fn find_target(&self, hostiles: &[Hostile]) -> Option<usize> {
        let in_reach = |h: &Hostile| !h.is_dead() && h.position.distance(self.position) < HIT_RADIUS;

        hostiles
            .iter()
            .position(|h| h.kind.is_boss() && in_reach(h))
            .or_else(|| hostiles.iter().position(|h| !h.kind.is_boss() && in_reach(h)))
    }

    /// Billboard for the renderer.
    #[must_use]
    pub fn sprite(&self) -> SpriteInstance {
        SpriteInstance::new(self.position, PROJECTILE_SCALE, self.color, true, self.spell as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::hostile::HostileId;
    use delve_economy::{BossTemplate, GameCatalog};

    fn bolt_at(position: Vec3) -> Projectile {
        let catalog = GameCatalog::default();
        let mut p = Projectile::cast(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0, &catalog.spells[0]);
        p.position = position;
        p
    }

    #[test]
    fn test_cast_offsets() {
        let catalog = GameCatalog::default();
        let p = Projectile::cast(Vec3::new(0.5, 1.2, 0.5), Vec3::new(0.0, 0.0, -1.0), 1, &catalog.spells[1]);

        assert!((p.position.z - 0.0).abs() < 1e-6);
        assert!((p.position.y - 1.0).abs() < 1e-6);
        assert_eq!(p.velocity, Vec3::new(0.0, 0.0, -PROJECTILE_SPEED));
        assert_eq!(p.damage, 15);
        assert_eq!(p.life, PROJECTILE_LIFETIME);
    }

    #[test]
    fn test_advance_and_expire() {
        let mut p = bolt_at(Vec3::ZERO);
        p.advance(1.0);
        assert!((p.position.z + 10.0).abs() < 1e-5);
        assert!(!p.expired());
        p.advance(1.0);
        assert!(p.expired());
    }

    #[test]
    fn test_boss_checked_first() {
        let catalog = GameCatalog::default();
        let hostiles = vec![
            Hostile::monster(HostileId(0), 0, &catalog.monsters[0], 0.0, 0.0),
            Hostile::boss(HostileId(1), &BossTemplate::default(), 0.3, 0.0),
        ];
        let p = bolt_at(Vec3::new(0.1, 0.7, 0.0));
        assert_eq!(p.find_target(&hostiles), Some(1));
    }

    #[test]
    fn test_dead_hostiles_not_hit() {
        let catalog = GameCatalog::default();
        let mut hostiles = vec![
            Hostile::monster(HostileId(0), 0, &catalog.monsters[0], 0.0, 0.0),
            Hostile::monster(HostileId(1), 1, &catalog.monsters[1], 0.2, 0.0),
        ];
        hostiles[0].apply_damage(1000, 0.0);

        let p = bolt_at(Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(p.find_target(&hostiles), Some(1));
    }

    #[test]
    fn test_miss() {
        let catalog = GameCatalog::default();
        let hostiles = vec![Hostile::monster(HostileId(0), 0, &catalog.monsters[0], 0.0, 0.0)];
        assert_eq!(bolt_at(Vec3::new(3.0, 0.5, 0.0)).find_target(&hostiles), None);
    }
}
