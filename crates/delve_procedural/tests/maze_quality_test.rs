//! # Maze Quality Tests
//!
//! Checks the shape of the generated maze: open rooms, solid walls, a clear
//! spawn and consistent lookups across chunk borders.

use delve_procedural::{
    is_blocked, ChunkCoord, ChunkGenerator, ChunkStore, NullRenderer, WorldSeed, CHUNK_SIZE,
};
use delve_shared::Vec3;

fn store(seed: u64) -> ChunkStore<NullRenderer> {
    ChunkStore::new(ChunkGenerator::new(WorldSeed::new(seed)), NullRenderer)
}

/// Test: The maze is mostly open but has a real share of walls.
#[test]
fn test_wall_ratio_is_playable() {
    let gen = ChunkGenerator::default();
    let mut walls = 0usize;
    let mut total = 0usize;

    for coord in ChunkCoord::new(0, 0).square_around(8) {
        walls += gen.generate(coord).wall_count();
        total += CHUNK_SIZE * CHUNK_SIZE;
    }

    let ratio = walls as f64 / total as f64;
    println!("Wall ratio: {:.1}%", ratio * 100.0);
    assert!(ratio > 0.05, "Too few walls: {:.1}%", ratio * 100.0);
    assert!(ratio < 0.6, "Too many walls: {:.1}%", ratio * 100.0);
}

/// Test: Walls clump into regions instead of salt-and-pepper speckle.
#[test]
fn test_walls_form_regions() {
    let gen = ChunkGenerator::default();
    let mut walls = 0usize;
    let mut walls_with_wall_neighbor = 0usize;

    for cz in -40..40 {
        for cx in -40..40 {
            if gen.classify(cx, cz).is_wall() {
                walls += 1;
                let neighbors = [(1, 0), (-1, 0), (0, 1), (0, -1)];
                if neighbors.iter().any(|(dx, dz)| gen.classify(cx + dx, cz + dz).is_wall()) {
                    walls_with_wall_neighbor += 1;
                }
            }
        }
    }

    assert!(walls > 0);
    let clumped = walls_with_wall_neighbor as f64 / walls as f64;
    assert!(clumped > 0.5, "Only {:.1}% of walls touch another wall", clumped * 100.0);
}

/// Test: The spawn clearing is open for every seed.
#[test]
fn test_spawn_clearing_for_any_seed() {
    for seed in [0, 1, 42, 8191, 1 << 40] {
        let mut store = store(seed);
        for z in -2..=2 {
            for x in -2..=2 {
                let position = Vec3::on_floor(x as f32 + 0.5, z as f32 + 0.5);
                assert!(!is_blocked(&mut store, position), "seed {seed}: ({x}, {z}) blocked");
            }
        }
    }
}

/// Test: Lookups agree with the generator across the negative chunk border.
#[test]
fn test_negative_border_lookup() {
    let gen = ChunkGenerator::default();
    let mut store = store(0);

    for cell in -40..40 {
        let expected = gen.classify(cell, 7).is_wall();
        let world = Vec3::on_floor(cell as f32 + 0.5, 7.5);
        assert_eq!(is_blocked(&mut store, world), expected, "cell x = {cell}");
    }
}
