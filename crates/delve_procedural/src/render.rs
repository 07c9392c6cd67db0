//! # Rendering Collaborator
//!
//! The store never draws anything. When a chunk enters range it asks a
//! [`ChunkRenderer`] to build an opaque handle from the grid, and when the
//! chunk leaves range it hands the handle back for disposal.
//!
//! [`ChunkMesher`] is the headless renderer: it lays out the wall blocks and
//! floor/ceiling tiles a scene graph would instantiate, and tracks how many
//! meshes are alive so tests and the headless driver can observe streaming.

use delve_shared::Vec3;

use crate::chunk::{ChunkCoord, ChunkGrid};

/// Height of a wall block in world units.
pub const WALL_HEIGHT: f32 = 3.0;

/// Builds and disposes the renderable form of chunks.
pub trait ChunkRenderer {
    /// Opaque visual produced for one chunk.
    type Handle;

    /// Builds the visual for `grid`, located at `coord`.
    fn build(&mut self, coord: ChunkCoord, grid: &ChunkGrid) -> Self::Handle;

    /// Disposes a visual previously returned by [`ChunkRenderer::build`].
    fn dispose(&mut self, coord: ChunkCoord, handle: Self::Handle);
}

/// Renderer that builds nothing. Useful when only collision matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl ChunkRenderer for NullRenderer {
    type Handle = ();

    fn build(&mut self, _coord: ChunkCoord, _grid: &ChunkGrid) {}

    fn dispose(&mut self, _coord: ChunkCoord, _handle: ()) {}
}

/// Instance layout of one realized chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// World position of the chunk's corner.
    pub origin: Vec3,
    /// Centre of each wall block, relative to `origin`.
    pub walls: Vec<Vec3>,
    /// Floor tile positions, relative to `origin`. Each floor tile also
    /// gets a ceiling tile at `WALL_HEIGHT`.
    pub floors: Vec<Vec3>,
}

impl ChunkMesh {
    /// Total scene objects: walls plus a floor and a ceiling per open cell.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.walls.len() + self.floors.len() * 2
    }
}

/// Headless chunk renderer.
#[derive(Debug, Default)]
pub struct ChunkMesher {
    live: usize,
    built_total: u64,
    disposed_total: u64,
}

impl ChunkMesher {
    /// Creates a mesher with no live meshes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes built and not yet disposed.
    #[must_use]
    pub const fn live(&self) -> usize {
        self.live
    }

    /// Meshes built since creation.
    #[must_use]
    pub const fn built_total(&self) -> u64 {
        self.built_total
    }

    /// Meshes disposed since creation.
    #[must_use]
    pub const fn disposed_total(&self) -> u64 {
        self.disposed_total
    }
}

impl ChunkRenderer for ChunkMesher {
    type Handle = ChunkMesh;

    fn build(&mut self, coord: ChunkCoord, grid: &ChunkGrid) -> ChunkMesh {
        let mut mesh = ChunkMesh {
            origin: Vec3::on_floor(coord.world_x() as f32, coord.world_z() as f32),
            ..ChunkMesh::default()
        };

        for (x, z, cell) in grid.iter() {
            if cell.is_wall() {
                mesh.walls.push(Vec3::new(x as f32, WALL_HEIGHT / 2.0, z as f32));
            } else {
                mesh.floors.push(Vec3::on_floor(x as f32, z as f32));
            }
        }

        self.live += 1;
        self.built_total += 1;
        mesh
    }

    fn dispose(&mut self, coord: ChunkCoord, handle: ChunkMesh) {
        tracing::trace!(chunk = %coord, objects = handle.object_count(), "disposing chunk mesh");
        self.live = self.live.saturating_sub(1);
        self.disposed_total += 1;
    }
}
