//! # DELVE
//!
//! The main game crate: a first-person dungeon crawler core on top of the
//! procedural maze.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              DELVE CORE                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐   │
//! │  │ delve_procedural│     │   Simulation    │     │  delve_economy  │   │
//! │  │                 │<────│                 │────>│                 │   │
//! │  │  • Noise        │     │  • Player       │     │  • Catalog      │   │
//! │  │  • Chunk store  │     │  • Hostiles     │     │  • Loot         │   │
//! │  │  • Streaming    │     │  • Projectiles  │     │  • Inventory    │   │
//! │  │  • Collision    │     │  • Chests       │     │                 │   │
//! │  └────────┬────────┘     └────────┬────────┘     └─────────────────┘   │
//! │           │                       │                                     │
//! │           v                       v                                     │
//! │  ┌─────────────────┐     ┌─────────────────┐                           │
//! │  │  ChunkRenderer  │     │ Sprite snapshot │                           │
//! │  │  (collaborator) │     │  + event stream │                           │
//! │  └─────────────────┘     └─────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `game_loop`: the `Simulation` and its fixed-order tick
//! - `gameplay`: player, hostiles, projectiles, spells, chests
//! - `physics`: sliding movement and view vectors
//! - `events`: bounded event stream for UI collaborators
//! - `input`: resolved per-tick intent
//! - `config`: run settings loaded from TOML
//! - `rng`: seeded simulation RNG
//!
//! ## Example
//!
//! ```rust
//! use delve::{InputIntent, Simulation};
//!
//! let mut sim = Simulation::with_defaults();
//! let stats = sim.tick(1.0 / 60.0, &InputIntent::walk(1.0, 0.0));
//! assert_eq!(stats.frame, 1);
//! assert_eq!(sim.hostiles().len(), 6);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod events;
pub mod game_loop;
pub mod gameplay;
pub mod input;
pub mod physics;
pub mod rng;

// Re-export the layers
pub use delve_economy as economy;
pub use delve_procedural as procedural;
pub use delve_shared as shared;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, SimulationConfig};
pub use events::{EventBus, EventReceiver, EventSender, GameEvent};
pub use game_loop::{FrameStats, RenderSnapshot, Simulation};
pub use gameplay::{AiState, Chest, Feedback, Hostile, HostileId, HostileKind, Player, Projectile};
pub use input::InputIntent;
pub use rng::SimRng;
