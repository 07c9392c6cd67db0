//! # World Manager
//!
//! One owner for the chunk store and the streamer. The simulation holds a
//! `WorldManager` and goes through it for streaming ticks and terrain
//! queries.

use delve_shared::Vec3;
use rand::Rng;

use crate::chunk::{ChunkCoord, ChunkGenerator};
use crate::collision;
use crate::noise::WorldSeed;
use crate::render::ChunkRenderer;
use crate::store::{Chunk, ChunkStore};
use crate::streaming::{StreamReport, WorldConfig, WorldStreamer};

/// Counters describing the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks with a generated grid (never decreases).
    pub generated_chunks: usize,
    /// Chunks currently realized.
    pub realized_chunks: usize,
    /// Realizations since creation.
    pub realized_this_session: u64,
    /// Releases since creation.
    pub released_this_session: u64,
}

/// Store plus streamer for one world.
pub struct WorldManager<R: ChunkRenderer> {
    config: WorldConfig,
    store: ChunkStore<R>,
    streamer: WorldStreamer,
}

impl<R: ChunkRenderer> WorldManager<R> {
    /// Creates a world with no chunks generated yet.
    #[must_use]
    pub fn new(config: WorldConfig, renderer: R) -> Self {
        let generator = ChunkGenerator::new(WorldSeed::new(config.seed));
        Self {
            config,
            store: ChunkStore::new(generator, renderer),
            streamer: WorldStreamer::new(config.render_distance),
        }
    }

    /// The settings this world was built with.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Streams chunks around the reference position. Call once per tick.
    pub fn tick(&mut self, position: Vec3) -> StreamReport {
        self.streamer.tick(&mut self.store, position)
    }

    /// See [`ChunkStore::get_chunk`].
    pub fn get_chunk(&mut self, coord: ChunkCoord) -> &Chunk<R::Handle> {
        self.store.get_chunk(coord)
    }

    /// See [`collision::is_blocked`].
    pub fn is_blocked(&mut self, position: Vec3) -> bool {
        collision::is_blocked(&mut self.store, position)
    }

    /// See [`collision::find_open_cell_near`].
    pub fn find_open_cell_near<G: Rng + ?Sized>(&mut self, position: Vec3, rng: &mut G) -> Vec3 {
        collision::find_open_cell_near(&mut self.store, position, rng)
    }

    /// See [`collision::wall_cells_near`].
    pub fn wall_cells_near(&mut self, position: Vec3, radius_chunks: u32) -> Vec<(i32, i32)> {
        collision::wall_cells_near(&mut self.store, position, radius_chunks)
    }

    /// Read access to the store.
    #[must_use]
    pub const fn store(&self) -> &ChunkStore<R> {
        &self.store
    }

    /// The renderer collaborator.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        self.store.renderer()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            generated_chunks: self.store.generated_count(),
            realized_chunks: self.store.realized_count(),
            realized_this_session: self.store.realized_this_session(),
            released_this_session: self.store.released_this_session(),
        }
    }
}
