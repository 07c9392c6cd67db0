//! # Inventory System
//!
//! An ordered, bounded list of item instances plus three equipment slots.
//!
//! Failures never panic: adding to a full inventory reports `false`, and
//! out-of-range indices are a no-op.

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemKind, ItemTemplate};

/// Maximum items carried (equipment doesn't count).
pub const INVENTORY_CAPACITY: usize = 20;

/// An item instance: a copy of its template taken when it was granted.
pub type Item = ItemTemplate;

/// Equipment slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    /// Weapon hand.
    MainHand,
    /// Shield / second hand.
    OffHand,
    /// Body armor.
    Armor,
}

impl EquipSlot {
    /// All slots, in display order.
    pub const ALL: [Self; 3] = [Self::MainHand, Self::OffHand, Self::Armor];

    /// Natural slot for an item kind.
    #[must_use]
    pub const fn for_kind(kind: ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Weapon => Some(Self::MainHand),
            ItemKind::Armor => Some(Self::Armor),
            ItemKind::Consumable | ItemKind::Misc => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::MainHand => 0,
            Self::OffHand => 1,
            Self::Armor => 2,
        }
    }
}

/// The player's bag and equipment.
#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
    equipment: [Option<Item>; 3],
}

impl Inventory {
    /// Creates an empty inventory with the standard capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }

    /// Creates an empty inventory holding at most `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            equipment: [None, None, None],
        }
    }

    /// Carried items, in order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of carried items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is carried.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum carried items.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks if the inventory is full.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Gets the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Item in an equipment slot.
    #[must_use]
    pub fn equipped(&self, slot: EquipSlot) -> Option<&Item> {
        self.equipment[slot.index()].as_ref()
    }

    /// Appends an item.
    ///
    /// # Returns
    ///
    /// `false` (and no change) when the inventory is full.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes and returns the item at `index`, shifting later items down.
    ///
    /// Out-of-range indices return `None`.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Equips the item at `index` into `slot`.
    ///
    /// If the slot is occupied the previous item takes the equipped item's
    /// place in the list; otherwise the item leaves the list.
    ///
    /// # Returns
    ///
    /// `false` (and no change) for an out-of-range index.
    pub fn equip(&mut self, index: usize, slot: EquipSlot) -> bool {
        if index >= self.items.len() {
            return false;
        }

        let target = &mut self.equipment[slot.index()];
        let equipped = match target.take() {
            Some(previous) => std::mem::replace(&mut self.items[index], previous),
            None => self.items.remove(index),
        };
        *target = Some(equipped);
        true
    }

    /// Moves the item in `slot` back into the list.
    ///
    /// # Returns
    ///
    /// `false` if the slot is empty or the inventory is full.
    pub fn unequip(&mut self, slot: EquipSlot) -> bool {
        if self.is_full() {
            return false;
        }
        match self.equipment[slot.index()].take() {
            Some(item) => {
                self.items.push(item);
                true
            }
            None => false,
        }
    }

    /// Summed weapon damage of everything equipped.
    #[must_use]
    pub fn equipped_damage(&self) -> u32 {
        self.equipment.iter().flatten().map(|item| item.damage).sum()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
