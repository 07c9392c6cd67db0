//! # Chunk System
//!
//! The maze is organized into fixed-size square chunks:
//! - Generation happens one chunk at a time, on first access
//! - A chunk's grid never changes once generated
//! - Rendering state is tracked separately (see `store`)
//!
//! ## Chunk Format
//!
//! Chunks are 16x16 cells on the X/Z plane. Each cell is a wall or a floor,
//! indexed as `[z][x]`.

use delve_shared::Vec3;
use serde::{Deserialize, Serialize};

use crate::noise::{LatticeNoise, WorldSeed};

/// Chunk width/depth in cells.
pub const CHUNK_SIZE: usize = 16;

/// Chunks within this Chebyshev distance of the player are realized.
pub const RENDER_DISTANCE: u32 = 2;

/// Cells with `|x| < SPAWN_CLEARING && |z| < SPAWN_CLEARING` are always floor.
pub const SPAWN_CLEARING: i32 = 3;

/// Zoom applied to world coordinates before sampling the smooth term.
pub const NOISE_ZOOM: f64 = 0.15;

/// Amplitude of the per-cell detail term.
pub const DETAIL_AMPLITUDE: f64 = 0.1;

/// Cells whose noise falls below this are walls.
pub const WALL_THRESHOLD: f64 = 0.35;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not cells).
    pub x: i32,
    /// Z coordinate (in chunks, not cells).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts world cell coordinates to chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn from_cell(cell_x: i32, cell_z: i32) -> Self {
        Self {
            x: cell_x.div_euclid(CHUNK_SIZE as i32),
            z: cell_z.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// Chunk containing a continuous world position.
    #[inline]
    #[must_use]
    pub fn from_world(position: Vec3) -> Self {
        Self::from_cell(position.x.floor() as i32, position.z.floor() as i32)
    }

    /// Returns the world X coordinate of the chunk's origin (corner).
    ///
    /// Wraps for chunks past the `i32` cell range.
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x.wrapping_mul(CHUNK_SIZE as i32)
    }

    /// Returns the world Z coordinate of the chunk's origin.
    #[inline]
    #[must_use]
    pub const fn world_z(self) -> i32 {
        self.z.wrapping_mul(CHUNK_SIZE as i32)
    }

    /// Chebyshev (chessboard) distance in chunks.
    #[inline]
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        if dx > dz { dx } else { dz }
    }

    /// All coordinates within `radius` (Chebyshev) of this one, row by row.
    pub fn square_around(self, radius: u32) -> impl Iterator<Item = Self> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dz| (-r..=r).map(move |dx| Self::new(self.x.wrapping_add(dx), self.z.wrapping_add(dz))))
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.z)
    }
}

/// A single maze cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    /// Walkable.
    #[default]
    Floor = 0,
    /// Solid, blocks movement.
    Wall = 1,
}

impl Cell {
    /// Returns true if this cell blocks movement.
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// The generated cells of one chunk.
///
/// Immutable once built: there is no `set` API.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChunkGrid {
    /// Cell data (indexed as [z][x]).
    cells: [[Cell; CHUNK_SIZE]; CHUNK_SIZE],
}

impl ChunkGrid {
    /// Gets a cell at local coordinates.
    ///
    /// Returns `None` outside `[0, CHUNK_SIZE)`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, z: usize) -> Option<Cell> {
        self.cells.get(z).and_then(|row| row.get(x)).copied()
    }

    /// Signed-index variant of [`ChunkGrid::get`].
    #[inline]
    #[must_use]
    pub fn get_signed(&self, x: i32, z: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let z = usize::try_from(z).ok()?;
        self.get(x, z)
    }

    /// Number of wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_wall()).count()
    }

    /// Iterates `(local_x, local_z, cell)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(z, row)| row.iter().enumerate().map(move |(x, &cell)| (x, z, cell)))
    }
}

impl std::fmt::Debug for ChunkGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ChunkGrid {{")?;
        for row in &self.cells {
            let line: String = row.iter().map(|c| if c.is_wall() { '#' } else { '.' }).collect();
            writeln!(f, "  {line}")?;
        }
        write!(f, "}}")
    }
}

/// Chunk generator using lattice noise.
#[derive(Clone, Copy, Debug)]
pub struct ChunkGenerator {
    /// Noise field shared by the smooth and detail terms.
    noise: LatticeNoise,
}

impl ChunkGenerator {
    /// Creates a new chunk generator.
    #[must_use]
    pub const fn new(seed: WorldSeed) -> Self {
        Self {
            noise: LatticeNoise::new(seed),
        }
    }

    /// Generates the grid of one chunk.
    ///
    /// Pure: the same coordinate always produces the same grid.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> ChunkGrid {
        let mut cells = [[Cell::Floor; CHUNK_SIZE]; CHUNK_SIZE];

        for (local_z, row) in cells.iter_mut().enumerate() {
            for (local_x, cell) in row.iter_mut().enumerate() {
                let cell_x = coord.world_x().wrapping_add(local_x as i32);
                let cell_z = coord.world_z().wrapping_add(local_z as i32);
                *cell = self.classify(cell_x, cell_z);
            }
        }

        tracing::debug!(chunk = %coord, "generated chunk grid");
        ChunkGrid { cells }
    }

    /// Classifies one world cell.
    #[must_use]
    pub fn classify(&self, cell_x: i32, cell_z: i32) -> Cell {
        if is_spawn_clearing(cell_x, cell_z) {
            return Cell::Floor;
        }

        let smooth = self
            .noise
            .sample(f64::from(cell_x) * NOISE_ZOOM, f64::from(cell_z) * NOISE_ZOOM);
        let detail = self.noise.hash(i64::from(cell_x), i64::from(cell_z)) * DETAIL_AMPLITUDE;

        if smooth + detail < WALL_THRESHOLD {
            Cell::Wall
        } else {
            Cell::Floor
        }
    }
}

impl Default for ChunkGenerator {
    fn default() -> Self {
        Self::new(WorldSeed::CLASSIC)
    }
}

/// Returns true inside the guaranteed-open square around the origin.
#[inline]
#[must_use]
pub const fn is_spawn_clearing(cell_x: i32, cell_z: i32) -> bool {
    let r = SPAWN_CLEARING.unsigned_abs();
    cell_x.unsigned_abs() < r && cell_z.unsigned_abs() < r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coord_from_cell() {
        assert_eq!(ChunkCoord::from_cell(0, 0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_cell(15, 15), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_cell(16, 16), ChunkCoord::new(1, 1));
        assert_eq!(ChunkCoord::from_cell(-1, -1), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_cell(-16, -16), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_cell(-17, -17), ChunkCoord::new(-2, -2));
    }

    #[test]
    fn test_chunk_coord_from_world_floors() {
        assert_eq!(ChunkCoord::from_world(Vec3::on_floor(-0.5, 0.5)), ChunkCoord::new(-1, 0));
        assert_eq!(ChunkCoord::from_world(Vec3::on_floor(15.99, -16.0)), ChunkCoord::new(0, -1));
        assert_eq!(ChunkCoord::from_world(Vec3::on_floor(16.0, -16.01)), ChunkCoord::new(1, -2));
    }

    #[test]
    fn test_chebyshev_distance() {
        let origin = ChunkCoord::new(0, 0);
        assert_eq!(origin.chebyshev_distance(ChunkCoord::new(3, -1)), 3);
        assert_eq!(origin.chebyshev_distance(ChunkCoord::new(-2, 2)), 2);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn test_square_around_covers_radius() {
        let coords: Vec<_> = ChunkCoord::new(4, -2).square_around(2).collect();
        assert_eq!(coords.len(), 25);
        assert!(coords.iter().all(|c| c.chebyshev_distance(ChunkCoord::new(4, -2)) <= 2));
    }

    #[test]
    fn test_chunk_generation_determinism() {
        let gen1 = ChunkGenerator::new(WorldSeed::new(42));
        let gen2 = ChunkGenerator::new(WorldSeed::new(42));

        for coord in [ChunkCoord::new(5, 10), ChunkCoord::new(-3, -7), ChunkCoord::new(0, -1)] {
            assert_eq!(gen1.generate(coord), gen2.generate(coord), "Mismatch at {coord}");
        }
    }

    #[test]
    fn test_spawn_clearing_is_floor() {
        let gen = ChunkGenerator::default();
        for z in -2..=2 {
            for x in -2..=2 {
                assert_eq!(gen.classify(x, z), Cell::Floor, "({x}, {z}) must be clear");
            }
        }
    }

    #[test]
    fn test_extreme_cells_classify() {
        assert!(!is_spawn_clearing(i32::MIN, 0));
        assert!(!is_spawn_clearing(0, i32::MIN));
        assert!(is_spawn_clearing(-2, 2));

        let gen = ChunkGenerator::default();
        let _ = gen.classify(i32::MIN, i32::MIN);
        let _ = gen.generate(ChunkCoord::new(i32::MAX, i32::MIN));
        assert_eq!(ChunkCoord::new(i32::MAX, 0).world_x(), i32::MAX.wrapping_mul(16));
    }

    #[test]
    fn test_maze_has_walls_and_floors() {
        let gen = ChunkGenerator::default();
        let mut walls = 0;
        let mut total = 0;
        for coord in ChunkCoord::new(0, 0).square_around(3) {
            let grid = gen.generate(coord);
            walls += grid.wall_count();
            total += CHUNK_SIZE * CHUNK_SIZE;
        }
        assert!(walls > 0, "maze should contain walls");
        assert!(walls < total, "maze should contain floor");
    }

    #[test]
    fn test_grid_out_of_range_is_none() {
        let grid = ChunkGenerator::default().generate(ChunkCoord::new(0, 0));
        assert!(grid.get(CHUNK_SIZE, 0).is_none());
        assert!(grid.get(0, CHUNK_SIZE).is_none());
        assert!(grid.get_signed(-1, 3).is_none());
        assert!(grid.get(15, 15).is_some());
    }
}
