//! # Chunk Store
//!
//! Sparse map from chunk coordinate to generated grid plus an optional
//! realized handle.
//!
//! ## Lifecycle
//!
//! ```text
//! (absent) --get_chunk--> Generated --realize--> Realized
//!                             ^                      |
//!                             +-------release--------+
//! ```
//!
//! Grids are generated once and kept for the lifetime of the store. Only
//! the realized handle is ever discarded.

use std::collections::HashMap;

use crate::chunk::{ChunkCoord, ChunkGenerator, ChunkGrid};
use crate::render::ChunkRenderer;

/// Realization state of a stored chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// Grid exists, nothing is rendered.
    Generated,
    /// Grid exists and the renderer holds a handle for it.
    Realized,
}

/// One stored chunk.
#[derive(Debug)]
pub struct Chunk<H> {
    grid: ChunkGrid,
    handle: Option<H>,
}

impl<H> Chunk<H> {
    /// The chunk's cells.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    /// The realized handle, if the chunk is in range.
    #[inline]
    #[must_use]
    pub const fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ChunkState {
        if self.handle.is_some() {
            ChunkState::Realized
        } else {
            ChunkState::Generated
        }
    }
}

/// Lazily generating chunk map that owns its renderer.
pub struct ChunkStore<R: ChunkRenderer> {
    generator: ChunkGenerator,
    renderer: R,
    chunks: HashMap<ChunkCoord, Chunk<R::Handle>>,
    realized_this_session: u64,
    released_this_session: u64,
}

impl<R: ChunkRenderer> ChunkStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(generator: ChunkGenerator, renderer: R) -> Self {
        Self {
            generator,
            renderer,
            chunks: HashMap::new(),
            realized_this_session: 0,
            released_this_session: 0,
        }
    }

    /// Returns the chunk at `coord`, generating it on first access.
    pub fn get_chunk(&mut self, coord: ChunkCoord) -> &Chunk<R::Handle> {
        entry(&mut self.chunks, &self.generator, coord)
    }

    /// Returns the grid at `coord`, generating it on first access.
    pub fn grid(&mut self, coord: ChunkCoord) -> &ChunkGrid {
        &self.get_chunk(coord).grid
    }

    /// Looks up a chunk without generating it.
    #[must_use]
    pub fn peek(&self, coord: ChunkCoord) -> Option<&Chunk<R::Handle>> {
        self.chunks.get(&coord)
    }

    /// Builds the renderable form of `coord` if it isn't built yet.
    ///
    /// Idempotent: a realized chunk returns its existing handle and the
    /// renderer is not called again.
    pub fn realize(&mut self, coord: ChunkCoord) -> &R::Handle {
        let chunk = entry(&mut self.chunks, &self.generator, coord);

        if chunk.handle.is_none() {
            self.realized_this_session += 1;
            tracing::debug!(chunk = %coord, "realizing chunk");
        }

        let renderer = &mut self.renderer;
        chunk
            .handle
            .get_or_insert_with(|| renderer.build(coord, &chunk.grid))
    }

    /// Discards the renderable form of `coord`, keeping its grid.
    ///
    /// Returns `true` if a handle was disposed. Unknown or already released
    /// chunks are a no-op.
    pub fn release(&mut self, coord: ChunkCoord) -> bool {
        let Some(handle) = self.chunks.get_mut(&coord).and_then(|c| c.handle.take()) else {
            return false;
        };

        tracing::debug!(chunk = %coord, "releasing chunk");
        self.renderer.dispose(coord, handle);
        self.released_this_session += 1;
        true
    }

    /// Coordinates that currently hold a realized handle.
    #[must_use]
    pub fn realized_coords(&self) -> Vec<ChunkCoord> {
        self.chunks
            .iter()
            .filter(|(_, chunk)| chunk.handle.is_some())
            .map(|(&coord, _)| coord)
            .collect()
    }

    /// Number of realized chunks.
    #[must_use]
    pub fn realized_count(&self) -> usize {
        self.chunks.values().filter(|c| c.handle.is_some()).count()
    }

    /// Number of chunks whose grid has been generated.
    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.chunks.len()
    }

    /// Realize calls that actually built a handle.
    #[must_use]
    pub const fn realized_this_session(&self) -> u64 {
        self.realized_this_session
    }

    /// Release calls that actually disposed a handle.
    #[must_use]
    pub const fn released_this_session(&self) -> u64 {
        self.released_this_session
    }

    /// The generator grids are produced with.
    #[must_use]
    pub const fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// The renderer collaborator.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Entry for `coord`, generated on miss.
fn entry<'a, H>(
    chunks: &'a mut HashMap<ChunkCoord, Chunk<H>>,
    generator: &ChunkGenerator,
    coord: ChunkCoord,
) -> &'a mut Chunk<H> {
    chunks.entry(coord).or_insert_with(|| Chunk {
        grid: generator.generate(coord),
        handle: None,
    })
}
