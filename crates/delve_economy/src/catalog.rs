//! # Game Catalog
//!
//! Read-only templates for items, monsters, the boss, spells and world
//! objects. Loaded once at startup from TOML, or taken from the built-in
//! default; the simulation never mutates it.
//!
//! ## Format
//!
//! ```toml
//! [[items]]
//! id = "rusty_sword"
//! name = "Rusty Sword"
//! type = "weapon"
//! damage = 5
//! spawn_chance = 0.5
//!
//! [[monsters]]
//! id = "skeleton"
//! name = "Skeleton"
//! hp = 30
//! damage = 5
//!
//! [boss]
//! id = "guardian"
//! hp = 200
//!
//! [[spells]]
//! id = "rune"
//! name = "Rune"
//! damage = 10
//! cooldown = 0.5
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::loot::Weighted;

/// Spawn weight used when a template doesn't set one.
pub const DEFAULT_SPAWN_WEIGHT: f32 = 0.1;

/// Damage of a monster template without a `damage` field.
pub const DEFAULT_MONSTER_DAMAGE: u32 = 5;

/// Speed of a monster template without a `speed` field.
pub const DEFAULT_MONSTER_SPEED: f32 = 1.0;

/// What an item is used for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Goes in the main hand.
    Weapon,
    /// Used up on use.
    Consumable,
    /// Goes in the armor slot.
    Armor,
    /// Anything else.
    #[default]
    Misc,
}

/// Display rarity of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Gray.
    #[default]
    Common,
    /// Green.
    Uncommon,
    /// Blue.
    Rare,
    /// Purple.
    Epic,
    /// Orange.
    Legendary,
}

/// An item definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Item category.
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    /// Weapon damage bonus.
    #[serde(default)]
    pub damage: u32,
    /// Health restored by a consumable.
    #[serde(default)]
    pub heal: u32,
    /// Display rarity.
    #[serde(default)]
    pub rarity: Rarity,
    /// Inventory icon (emoji or path).
    #[serde(default)]
    pub icon: String,
    /// Sprite asset path.
    #[serde(default)]
    pub sprite: String,
    /// Relative loot weight.
    #[serde(default)]
    pub spawn_chance: Option<f32>,
}

/// A regular monster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Starting and maximum health.
    pub hp: u32,
    /// Damage per landed attack.
    #[serde(default)]
    pub damage: Option<u32>,
    /// Pursuit speed in units per second.
    #[serde(default)]
    pub speed: Option<f32>,
    /// Base tint, `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,
    /// Billboard size.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Sprite asset path.
    #[serde(default)]
    pub sprite: String,
    /// Sound cue name.
    #[serde(default)]
    pub sound: String,
    /// Relative spawn weight.
    #[serde(default)]
    pub spawn_chance: Option<f32>,
}

impl MonsterTemplate {
    /// Damage per attack, with the default applied.
    #[must_use]
    pub fn attack_damage(&self) -> u32 {
        self.damage.unwrap_or(DEFAULT_MONSTER_DAMAGE)
    }

    /// Pursuit speed, with the default applied.
    #[must_use]
    pub fn move_speed(&self) -> f32 {
        self.speed.unwrap_or(DEFAULT_MONSTER_SPEED)
    }
}

/// The boss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTemplate {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Starting and maximum health.
    pub hp: u32,
    /// Damage per landed attack.
    pub damage: u32,
    /// Base tint, `#rrggbb`.
    pub color: String,
    /// Billboard size.
    pub scale: f32,
    /// Sprite asset path.
    pub sprite: String,
    /// Sound cue name.
    pub sound: String,
}

impl Default for BossTemplate {
    fn default() -> Self {
        Self {
            id: "guardian".into(),
            name: "Guardian".into(),
            hp: 200,
            damage: 15,
            color: "#ffffff".into(),
            scale: 1.5,
            sprite: "assets/sprites/mob1.png".into(),
            sound: "roar".into(),
        }
    }
}

/// A castable spell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellTemplate {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Damage carried by each projectile.
    pub damage: u32,
    /// Projectile tint, `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,
    /// Seconds between casts.
    #[serde(default)]
    pub cooldown: f32,
    /// Sound cue name.
    #[serde(default)]
    pub sound: String,
}

/// Kind of world object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Opens once and grants loot.
    #[default]
    Chest,
    /// Scenery.
    Decor,
}

/// A placeable world object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectTemplate {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Object category.
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    /// Closed sprite.
    #[serde(default)]
    pub sprite: String,
    /// Opened sprite.
    #[serde(default)]
    pub sprite_open: String,
    /// Billboard size.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Item ids this object can grant.
    #[serde(default)]
    pub loot_table: Vec<String>,
    /// Relative spawn weight.
    #[serde(default)]
    pub spawn_chance: Option<f32>,
}

/// Look of the maze itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Floor texture.
    pub floor: String,
    /// Wall texture.
    pub wall: String,
    /// Clear color, `#rrggbb`.
    pub sky_color: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            floor: "assets/textures/floor.png".into(),
            wall: "assets/textures/wall.png".into(),
            sky_color: "#050505".into(),
        }
    }
}

/// All game data templates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameCatalog {
    /// Item templates, in catalog order.
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
    /// Monster templates, in catalog order.
    pub monsters: Vec<MonsterTemplate>,
    /// The boss.
    #[serde(default)]
    pub boss: BossTemplate,
    /// Spells, in switching order.
    pub spells: Vec<SpellTemplate>,
    /// World object templates.
    #[serde(default)]
    pub objects: Vec<ObjectTemplate>,
    /// Maze textures and colors.
    #[serde(default)]
    pub environment: Environment,
}

impl GameCatalog {
    /// Parses and validates a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed TOML and the validation
    /// errors listed on [`GameCatalog::validate`].
    pub fn from_toml_str(text: &str) -> CatalogResult<Self> {
        let catalog: Self = toml::from_str(text)?;
        catalog.validate()?;
        tracing::debug!(
            items = catalog.items.len(),
            monsters = catalog.monsters.len(),
            spells = catalog.spells.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file can't be read, otherwise as
    /// [`GameCatalog::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the invariants the simulation relies on.
    ///
    /// # Errors
    ///
    /// - `EmptySection` if `monsters` or `spells` is empty
    /// - `DuplicateId` if two templates in a section share an id
    /// - `InvalidValue` for zero health, negative or non-finite weights,
    ///   negative cooldowns or non-positive scales
    pub fn validate(&self) -> CatalogResult<()> {
        if self.monsters.is_empty() {
            return Err(CatalogError::EmptySection("monsters"));
        }
        if self.spells.is_empty() {
            return Err(CatalogError::EmptySection("spells"));
        }

        check_unique("items", self.items.iter().map(|t| t.id.as_str()))?;
        check_unique("monsters", self.monsters.iter().map(|t| t.id.as_str()))?;
        check_unique("spells", self.spells.iter().map(|t| t.id.as_str()))?;
        check_unique("objects", self.objects.iter().map(|t| t.id.as_str()))?;

        for item in &self.items {
            check_weight(&item.id, item.spawn_chance)?;
        }
        for monster in &self.monsters {
            check_positive_hp(&monster.id, monster.hp)?;
            check_weight(&monster.id, monster.spawn_chance)?;
            check_scale(&monster.id, monster.scale)?;
            if monster.speed.is_some_and(|s| !s.is_finite() || s < 0.0) {
                return Err(invalid(&monster.id, "speed", "must be a non-negative number"));
            }
        }
        check_positive_hp(&self.boss.id, self.boss.hp)?;
        check_scale(&self.boss.id, self.boss.scale)?;
        for spell in &self.spells {
            if !spell.cooldown.is_finite() || spell.cooldown < 0.0 {
                return Err(invalid(&spell.id, "cooldown", "must be a non-negative number"));
            }
        }
        for object in &self.objects {
            check_weight(&object.id, object.spawn_chance)?;
            check_scale(&object.id, object.scale)?;
        }

        Ok(())
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Catalog index of a monster id.
    #[must_use]
    pub fn monster_index(&self, id: &str) -> Option<usize> {
        self.monsters.iter().position(|t| t.id == id)
    }

    /// Spell at a switching index, falling back to the first spell.
    #[must_use]
    pub fn spell_or_first(&self, index: usize) -> Option<&SpellTemplate> {
        self.spells.get(index).or_else(|| self.spells.first())
    }

    /// First object of the given kind.
    #[must_use]
    pub fn first_object_of(&self, kind: ObjectKind) -> Option<&ObjectTemplate> {
        self.objects.iter().find(|t| t.kind == kind)
    }

    /// Items a new player starts with: the first weapon and the first
    /// consumable, falling back to the first and second items.
    #[must_use]
    pub fn starting_kit(&self) -> Vec<&ItemTemplate> {
        let weapon = self
            .items
            .iter()
            .find(|t| t.kind == ItemKind::Weapon)
            .or_else(|| self.items.first());
        let consumable = self
            .items
            .iter()
            .find(|t| t.kind == ItemKind::Consumable)
            .or_else(|| self.items.get(1));

        weapon.into_iter().chain(consumable).collect()
    }
}

impl Default for GameCatalog {
    /// The built-in catalog.
    fn default() -> Self {
        Self {
            items: vec![
                ItemTemplate {
                    id: "rusty_sword".into(),
                    name: "Rusty Sword".into(),
                    kind: ItemKind::Weapon,
                    damage: 5,
                    heal: 0,
                    rarity: Rarity::Common,
                    icon: "🗡️".into(),
                    sprite: "assets/items/sword.png".into(),
                    spawn_chance: Some(0.5),
                },
                ItemTemplate {
                    id: "potion_heal".into(),
                    name: "Potion".into(),
                    kind: ItemKind::Consumable,
                    damage: 0,
                    heal: 20,
                    rarity: Rarity::Common,
                    icon: "🧪".into(),
                    sprite: "assets/items/potion.png".into(),
                    spawn_chance: Some(0.3),
                },
            ],
            monsters: vec![
                monster("skeleton", "Skeleton", 30, 5, "#dddddd", 1.0, "bones", 0.6),
                monster("goblin", "Goblin", 20, 5, "#dddddd", 1.0, "bones", 0.6),
                monster("slime", "Slime", 20, 3, "#00ff00", 0.8, "squish", 0.4),
            ],
            boss: BossTemplate::default(),
            spells: vec![
                spell("rune", "Rune", 10, "#ffffff", 0.5, "zap"),
                spell("void", "Void", 15, "#aa00ff", 1.0, "woosh"),
                spell("fire", "Fire", 20, "#ffaa00", 1.5, "burn"),
            ],
            objects: vec![ObjectTemplate {
                id: "chest_common".into(),
                name: "Chest".into(),
                kind: ObjectKind::Chest,
                sprite: "assets/sprites/chest_closed.png".into(),
                sprite_open: "assets/sprites/chest_opened.png".into(),
                scale: 0.8,
                loot_table: vec!["rusty_sword".into(), "potion_heal".into()],
                spawn_chance: Some(0.1),
            }],
            environment: Environment::default(),
        }
    }
}

impl Weighted for ItemTemplate {
    fn spawn_weight(&self) -> f32 {
        self.spawn_chance.unwrap_or(DEFAULT_SPAWN_WEIGHT)
    }
}

impl Weighted for MonsterTemplate {
    fn spawn_weight(&self) -> f32 {
        self.spawn_chance.unwrap_or(DEFAULT_SPAWN_WEIGHT)
    }
}

impl Weighted for ObjectTemplate {
    fn spawn_weight(&self) -> f32 {
        self.spawn_chance.unwrap_or(DEFAULT_SPAWN_WEIGHT)
    }
}

/// Parses `#rrggbb` into linear RGBA in `[0, 1]`. Anything else is white.
#[must_use]
pub fn parse_color(hex: &str) -> [f32; 4] {
    let digits = hex.trim_start_matches('#');
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) if digits.len() == 6 => [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ],
        _ => [1.0; 4],
    }
}

fn default_color() -> String {
    "#dddddd".into()
}

const fn default_scale() -> f32 {
    1.0
}

#[allow(clippy::too_many_arguments)]
fn monster(
    id: &str,
    name: &str,
    hp: u32,
    damage: u32,
    color: &str,
    scale: f32,
    sound: &str,
    spawn_chance: f32,
) -> MonsterTemplate {
    MonsterTemplate {
        id: id.into(),
        name: name.into(),
        hp,
        damage: Some(damage),
        speed: None,
        color: color.into(),
        scale,
        sprite: format!("assets/sprites/{id}.png"),
        sound: sound.into(),
        spawn_chance: Some(spawn_chance),
    }
}

fn spell(id: &str, name: &str, damage: u32, color: &str, cooldown: f32, sound: &str) -> SpellTemplate {
    SpellTemplate {
        id: id.into(),
        name: name.into(),
        damage,
        color: color.into(),
        cooldown,
        sound: sound.into(),
    }
}

fn check_unique<'a>(section: &'static str, ids: impl Iterator<Item = &'a str>) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                section,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

fn check_weight(id: &str, weight: Option<f32>) -> CatalogResult<()> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => {
            Err(invalid(id, "spawn_chance", "must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

fn check_positive_hp(id: &str, hp: u32) -> CatalogResult<()> {
    if hp == 0 {
        return Err(invalid(id, "hp", "must be positive"));
    }
    Ok(())
}

fn check_scale(id: &str, scale: f32) -> CatalogResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(invalid(id, "scale", "must be positive"));
    }
    Ok(())
}

fn invalid(id: &str, field: &'static str, reason: &'static str) -> CatalogError {
    CatalogError::InvalidValue {
        id: id.to_owned(),
        field,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [[monsters]]
        id = "rat"
        hp = 5

        [[spells]]
        id = "spark"
        damage = 3
    "#;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = GameCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.items.len(), 2);
        assert_eq!(catalog.monsters.len(), 3);
        assert_eq!(catalog.spells.len(), 3);
        assert_eq!(catalog.boss.hp, 200);
    }

    #[test]
    fn test_minimal_catalog_applies_defaults() {
        let catalog = GameCatalog::from_toml_str(MINIMAL).expect("minimal catalog parses");
        let rat = &catalog.monsters[0];

        assert_eq!(rat.attack_damage(), DEFAULT_MONSTER_DAMAGE);
        assert!((rat.move_speed() - DEFAULT_MONSTER_SPEED).abs() < f32::EPSILON);
        assert!((rat.spawn_weight() - DEFAULT_SPAWN_WEIGHT).abs() < f32::EPSILON);
        assert!((rat.scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(catalog.boss, BossTemplate::default());
        assert!(catalog.items.is_empty());
    }

    #[test]
    fn test_catalog_round_trips_through_toml() {
        let catalog = GameCatalog::default();
        let text = toml::to_string(&catalog).expect("catalog serializes");
        let parsed = GameCatalog::from_toml_str(&text).expect("catalog parses");
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_empty_spells_rejected() {
        let text = r#"
            spells = []

            [[monsters]]
            id = "rat"
            hp = 5
        "#;
        assert!(matches!(
            GameCatalog::from_toml_str(text),
            Err(CatalogError::EmptySection("spells"))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut catalog = GameCatalog::default();
        let copy = catalog.monsters[0].clone();
        catalog.monsters.push(copy);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateId { section: "monsters", .. })
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut catalog = GameCatalog::default();
        catalog.items[0].spawn_chance = Some(-1.0);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidValue { field: "spawn_chance", .. })
        ));
    }

    #[test]
    fn test_zero_hp_rejected() {
        let mut catalog = GameCatalog::default();
        catalog.monsters[1].hp = 0;
        assert!(matches!(catalog.validate(), Err(CatalogError::InvalidValue { field: "hp", .. })));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        assert!(matches!(GameCatalog::from_toml_str("monsters = 3"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            GameCatalog::from_file("/definitely/not/here.toml"),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_starting_kit() {
        let catalog = GameCatalog::default();
        let kit: Vec<_> = catalog.starting_kit().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(kit, ["rusty_sword", "potion_heal"]);

        let mut misc_only = catalog.clone();
        for item in &mut misc_only.items {
            item.kind = ItemKind::Misc;
        }
        let kit: Vec<_> = misc_only.starting_kit().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(kit, ["rusty_sword", "potion_heal"]);
    }

    #[test]
    fn test_spell_fallback() {
        let catalog = GameCatalog::default();
        assert_eq!(catalog.spell_or_first(2).map(|s| s.id.as_str()), Some("fire"));
        assert_eq!(catalog.spell_or_first(99).map(|s| s.id.as_str()), Some("rune"));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0000"), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parse_color("not a color"), [1.0; 4]);
        assert_eq!(parse_color("#fff"), [1.0; 4]);
    }
}
