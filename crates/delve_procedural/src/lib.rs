//! # DELVE Procedural Generation
//!
//! Deterministic maze generation and chunk streaming for an infinite world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: A chunk's grid is a pure function of seed and coordinate
//! 2. **Chunked**: The maze is generated in 16x16 chunks, on first access
//! 3. **Streamable**: Rendered form is built and dropped independently of the grid
//! 4. **Fail-safe**: Anything collision can't resolve is solid
//!
//! ## Core Components
//!
//! - `LatticeNoise`: sine-hash value noise with bilinear smoothing
//! - `ChunkGenerator`: thresholds noise into wall/floor grids
//! - `ChunkStore`: lazy grid map with realize/release
//! - `WorldStreamer`: keeps the square around the player realized
//! - `collision`: `is_blocked`, open-cell search, minimap wall query
//! - `WorldManager`: owns store and streamer for the simulation
//!
//! ## Example
//!
//! ```rust
//! use delve_procedural::{ChunkMesher, WorldConfig, WorldManager};
//! use delve_shared::Vec3;
//!
//! let mut world = WorldManager::new(WorldConfig::default(), ChunkMesher::new());
//!
//! // Player at the spawn clearing
//! let report = world.tick(Vec3::on_floor(0.5, 0.5));
//! assert_eq!(report.realized, 25);
//! assert!(!world.is_blocked(Vec3::on_floor(0.5, 0.5)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod chunk;
pub mod collision;
pub mod noise;
pub mod render;
pub mod store;
pub mod streaming;
pub mod world_manager;

pub use chunk::{Cell, ChunkCoord, ChunkGenerator, ChunkGrid, CHUNK_SIZE, RENDER_DISTANCE};
pub use collision::{find_open_cell_near, is_blocked, wall_cells_near, CellLocation};
pub use noise::{LatticeNoise, WorldSeed};
pub use render::{ChunkMesh, ChunkMesher, ChunkRenderer, NullRenderer};
pub use store::{Chunk, ChunkState, ChunkStore};
pub use streaming::{StreamReport, WorldConfig, WorldStreamer};
pub use world_manager::{WorldManager, WorldStats};
