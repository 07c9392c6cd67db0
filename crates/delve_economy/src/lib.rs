//! # DELVE Economy System
//!
//! Game data and the player's belongings.
//!
//! ## Design Principles
//!
//! 1. **External configuration** - All templates live in TOML files
//! 2. **Read-only data** - The simulation never mutates the catalog
//! 3. **Degrade, don't fail** - Missing references fall back to a default
//!    template; a full inventory reports `false`
//!
//! ## Example
//!
//! ```rust
//! use delve_economy::{GameCatalog, Inventory};
//!
//! let catalog = GameCatalog::default();
//! let mut inventory = Inventory::new();
//! for item in catalog.starting_kit() {
//!     assert!(inventory.add_item(item.clone()));
//! }
//! assert_eq!(inventory.len(), 2);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod loot;

pub use catalog::{
    parse_color, BossTemplate, Environment, GameCatalog, ItemKind, ItemTemplate, MonsterTemplate,
    ObjectKind, ObjectTemplate, Rarity, SpellTemplate, DEFAULT_SPAWN_WEIGHT,
};
pub use error::{CatalogError, CatalogResult};
pub use inventory::{EquipSlot, Inventory, Item, INVENTORY_CAPACITY};
pub use loot::{pick_weighted, roll_loot, Weighted};
