//! # DELVE Event System
//!
//! One-way notifications from the simulation to its collaborators.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────────┐
//! │ Simulation  │─────>│   Event     │─────>│ UI collaborator  │
//! │   (tick)    │      │   Channel   │      │ (log, bars, sfx) │
//! └─────────────┘      └─────────────┘      └──────────────────┘
//! ```
//!
//! Events flow FROM the tick TO the outside. Nothing in the tick reads them
//! back. The channel is bounded; when it is full, events are dropped and the
//! tick carries on.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use delve_economy::EquipSlot;

use crate::gameplay::HostileId;

/// Things that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    // =========================================================================
    // Spell Events
    // =========================================================================
    /// The selected spell changed.
    SpellSwitched {
        /// New spell index.
        index: usize,
        /// Spell template id.
        spell_id: String,
    },

    /// A projectile left the player's hand.
    ProjectileFired {
        /// Spell template id.
        spell_id: String,
        /// Spawn position.
        position: [f32; 3],
        /// Damage it carries.
        damage: u32,
    },

    // =========================================================================
    // Combat Events
    // =========================================================================
    /// A projectile hit a hostile. Sent before `HostileKilled` on a kill.
    HostileHit {
        /// Hostile that was hit.
        hostile: HostileId,
        /// Damage dealt.
        damage: u32,
        /// Health left.
        health_remaining: u32,
        /// Maximum health, for the target bar.
        max_health: u32,
    },

    /// A hostile died.
    HostileKilled {
        /// Hostile that died.
        hostile: HostileId,
        /// Display name.
        name: String,
        /// Experience awarded.
        experience: u32,
    },

    /// A hostile landed an attack.
    PlayerDamaged {
        /// Attacker.
        attacker: HostileId,
        /// Damage taken.
        damage: u32,
        /// Health left.
        health_remaining: u32,
    },

    /// The player's health reached zero.
    PlayerDied,

    /// The player gained a level.
    LevelUp {
        /// New level.
        level: u32,
        /// New maximum health.
        max_health: u32,
    },

    // =========================================================================
    // Loot Events
    // =========================================================================
    /// A chest was opened.
    ChestOpened {
        /// Index of the chest in the world object list.
        chest: usize,
        /// Chest position.
        position: [f32; 3],
    },

    /// An item went into the inventory.
    ItemLooted {
        /// Item template id.
        item_id: String,
        /// Display name.
        name: String,
    },

    /// Loot was rolled but the inventory had no room.
    InventoryFull {
        /// Item template id that was lost.
        item_id: String,
    },

    /// An item moved into an equipment slot.
    ItemEquipped {
        /// Item template id.
        item_id: String,
        /// Slot it went into.
        slot: EquipSlot,
    },
}

/// Event bus between the simulation and its collaborators.
///
/// Pre-allocates a bounded channel so a stalled consumer can't grow memory.
pub struct EventBus {
    /// Sender end - held by the simulation.
    sender: Sender<GameEvent>,
    /// Receiver end - held by consumers.
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before new ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Throws away everything queued and not yet received.
    ///
    /// # Returns
    ///
    /// Number of events discarded.
    pub fn discard_pending(&self) -> usize {
        self.receiver.try_iter().count()
    }

    /// Creates a connected sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped because the channel is full
    /// or every receiver is gone.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::trace!(?event, "event channel full, dropping");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Receives all pending events without blocking.
    #[inline]
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event, or `None` if nothing is pending.
    #[inline]
    pub fn try_recv(&self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_send_receive() {
        let (sender, receiver) = EventBus::create_pair(16);

        assert!(sender.send(GameEvent::LevelUp { level: 2, max_health: 120 }));
        assert!(receiver.has_events());

        match receiver.try_recv() {
            Some(GameEvent::LevelUp { level, max_health }) => {
                assert_eq!(level, 2);
                assert_eq!(max_health, 120);
            }
            other => panic!("Wrong event: {other:?}"),
        }
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn test_event_drain_keeps_order() {
        let (sender, receiver) = EventBus::create_pair(100);

        for level in 0..10 {
            let _ = sender.send(GameEvent::LevelUp { level, max_health: 100 });
        }
        assert_eq!(receiver.pending_count(), 10);

        let levels: Vec<u32> = receiver
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::LevelUp { level, .. } => Some(level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, (0..10).collect::<Vec<_>>());
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_full_channel_drops() {
        let (sender, receiver) = EventBus::create_pair(2);
        assert!(sender.send(GameEvent::PlayerDied));
        assert!(sender.send(GameEvent::PlayerDied));
        assert!(!sender.send(GameEvent::PlayerDied));
        assert_eq!(receiver.drain().len(), 2);
    }

    #[test]
    fn test_discard_pending_frees_capacity() {
        let bus = EventBus::new(2);
        let sender = bus.sender();
        assert!(sender.send(GameEvent::PlayerDied));
        assert!(sender.send(GameEvent::PlayerDied));
        assert!(!sender.send(GameEvent::PlayerDied));

        assert_eq!(bus.discard_pending(), 2);
        assert!(sender.send(GameEvent::PlayerDied));
        assert_eq!(bus.receiver().pending_count(), 1);
    }

    #[test]
    fn test_disconnected_send_fails() {
        let bus = EventBus::new(4);
        let sender = bus.sender();
        drop(bus);
        assert!(!sender.send(GameEvent::PlayerDied));
    }
}
