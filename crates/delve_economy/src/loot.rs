//! # Weighted Selection
//!
//! Roulette-wheel selection over templates with a spawn weight, used for
//! monster spawns and chest loot.
//!
//! A roll draws `r` uniformly from `[0, total)` and walks the entries in
//! catalog order, subtracting each weight until `r <= 0`. If rounding leaves
//! `r` positive after the last entry, the first entry wins.

use rand::Rng;

use crate::catalog::{GameCatalog, ItemTemplate, ObjectTemplate};

/// Anything that can be picked by spawn weight.
pub trait Weighted {
    /// Relative weight. Non-positive weights are never picked unless every
    /// weight is non-positive.
    fn spawn_weight(&self) -> f32;
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn spawn_weight(&self) -> f32 {
        (**self).spawn_weight()
    }
}

/// Picks one entry by weight.
///
/// # Arguments
///
/// * `entries` - Candidates in catalog order
/// * `rng` - Simulation RNG
///
/// # Returns
///
/// `None` only for an empty slice. If the total weight is zero, the first
/// entry is returned.
pub fn pick_weighted<'a, T: Weighted, R: Rng + ?Sized>(entries: &'a [T], rng: &mut R) -> Option<&'a T> {
    let first = entries.first()?;
    let total: f32 = entries.iter().map(|e| e.spawn_weight().max(0.0)).sum();
    if total <= 0.0 {
        return Some(first);
    }

    let mut remaining = rng.gen_range(0.0..total);
    for entry in entries {
        remaining -= entry.spawn_weight().max(0.0);
        if remaining <= 0.0 {
            return Some(entry);
        }
    }

    Some(first)
}

/// Rolls the item an opened object grants.
///
/// Candidates are the object's loot table entries that exist in the catalog,
/// picked by item weight. An empty or fully unresolved loot table falls back
/// to a uniform pick over every catalog item.
pub fn roll_loot<'a, R: Rng + ?Sized>(
    catalog: &'a GameCatalog,
    object: &ObjectTemplate,
    rng: &mut R,
) -> Option<&'a ItemTemplate> {
    let candidates: Vec<&ItemTemplate> = object
        .loot_table
        .iter()
        .filter_map(|id| {
            let item = catalog.item(id);
            if item.is_none() {
                tracing::warn!(object = %object.id, item = %id, "loot table references unknown item");
            }
            item
        })
        .collect();

    if candidates.is_empty() {
        if catalog.items.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..catalog.items.len());
        return catalog.items.get(index);
    }

    pick_weighted(&candidates, rng).copied()
}
