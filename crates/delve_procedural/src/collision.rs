//! # Collision Queries
//!
//! Point queries against the generated maze. Collision reads grids only, so
//! it works in chunks that were never realized; an unknown chunk is
//! generated on the spot.
//!
//! Anything that can't be resolved to a cell is solid.

use delve_shared::Vec3;
use rand::Rng;

use crate::chunk::{ChunkCoord, CHUNK_SIZE};
use crate::render::ChunkRenderer;
use crate::store::ChunkStore;

/// Random probes made by [`find_open_cell_near`] before giving up.
pub const OPEN_CELL_PROBES: usize = 50;

/// Chunk and local cell containing a world position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellLocation {
    /// Containing chunk.
    pub chunk: ChunkCoord,
    /// Local X in `[0, CHUNK_SIZE)`.
    pub local_x: i32,
    /// Local Z in `[0, CHUNK_SIZE)`.
    pub local_z: i32,
}

impl CellLocation {
    /// Resolves a continuous position with floor semantics on both axes.
    #[must_use]
    pub fn of(position: Vec3) -> Self {
        let cell_x = position.x.floor() as i32;
        let cell_z = position.z.floor() as i32;
        let size = CHUNK_SIZE as i32;
        Self {
            chunk: ChunkCoord::from_cell(cell_x, cell_z),
            local_x: cell_x.rem_euclid(size),
            local_z: cell_z.rem_euclid(size),
        }
    }

    /// World position of the cell's centre, on the floor.
    #[must_use]
    pub fn center(self) -> Vec3 {
        Vec3::on_floor(
            self.chunk.world_x().wrapping_add(self.local_x) as f32 + 0.5,
            self.chunk.world_z().wrapping_add(self.local_z) as f32 + 0.5,
        )
    }
}

/// Returns true if `position` lies in a wall cell.
pub fn is_blocked<R: ChunkRenderer>(store: &mut ChunkStore<R>, position: Vec3) -> bool {
    let loc = CellLocation::of(position);
    store
        .grid(loc.chunk)
        .get_signed(loc.local_x, loc.local_z)
        .map_or(true, |cell| cell.is_wall())
}

/// Finds a floor cell in the chunk containing `position`.
///
/// Makes up to [`OPEN_CELL_PROBES`] uniform probes and returns the centre of
/// the first open cell. If every probe hits a wall, `position` is returned
/// unchanged.
pub fn find_open_cell_near<R: ChunkRenderer, G: Rng + ?Sized>(
    store: &mut ChunkStore<R>,
    position: Vec3,
    rng: &mut G,
) -> Vec3 {
    let chunk = CellLocation::of(position).chunk;
    let grid = store.grid(chunk);

    for _ in 0..OPEN_CELL_PROBES {
        let local_x = rng.gen_range(0..CHUNK_SIZE);
        let local_z = rng.gen_range(0..CHUNK_SIZE);
        if grid.get(local_x, local_z).is_some_and(|cell| !cell.is_wall()) {
            let found = CellLocation {
                chunk,
                local_x: local_x as i32,
                local_z: local_z as i32,
            };
            return found.center().with_y(position.y);
        }
    }

    tracing::debug!(chunk = %chunk, "no open cell found, keeping position");
    position
}

/// World cell coordinates of every wall within `radius_chunks` of `position`.
///
/// Walks the square of chunks around the containing chunk, row by row.
pub fn wall_cells_near<R: ChunkRenderer>(
    store: &mut ChunkStore<R>,
    position: Vec3,
    radius_chunks: u32,
) -> Vec<(i32, i32)> {
    let center = CellLocation::of(position).chunk;
    let mut walls = Vec::new();

    for coord in center.square_around(radius_chunks) {
        let grid = store.grid(coord);
        walls.extend(
            grid.iter()
                .filter(|(_, _, cell)| cell.is_wall())
                .map(|(x, z, _)| {
                    (coord.world_x().wrapping_add(x as i32), coord.world_z().wrapping_add(z as i32))
                }),
        );
    }

    walls
}
