//! # Infinite Walk Integration Test
//!
//! Walks the reference point across the maze and checks that the realized
//! set stays bounded while grids stay stable.

use delve_procedural::{
    ChunkCoord, ChunkMesher, ChunkState, WorldConfig, WorldManager, CHUNK_SIZE,
};
use delve_shared::Vec3;

fn world() -> WorldManager<ChunkMesher> {
    WorldManager::new(WorldConfig::default(), ChunkMesher::new())
}

/// Test: Walk 2,000 cells east, realized set never exceeds the margin square.
#[test]
fn test_long_walk_keeps_realized_set_bounded() {
    let mut world = world();
    let margin_square = {
        let side = 2 * (world.config().render_distance as usize + 1) + 1;
        side * side
    };

    for step in 0..2_000 {
        let position = Vec3::on_floor(step as f32 + 0.5, 0.5);
        world.tick(position);

        let stats = world.stats();
        assert!(
            stats.realized_chunks <= margin_square,
            "{} chunks realized at step {step}",
            stats.realized_chunks
        );
        assert_eq!(world.renderer().live(), stats.realized_chunks);
    }

    let stats = world.stats();
    let chunks_walked = 2_000 / CHUNK_SIZE;
    assert!(stats.generated_chunks >= chunks_walked * 5);
    assert!(stats.released_this_session > 0);
}

/// Test: After a teleport, every old chunk past the margin is released but
/// its grid is still the one generated before.
#[test]
fn test_teleport_releases_and_retains() {
    let mut world = world();
    world.tick(Vec3::on_floor(0.5, 0.5));

    let before: Vec<_> = ChunkCoord::new(0, 0)
        .square_around(2)
        .map(|c| (c, world.get_chunk(c).grid().clone()))
        .collect();

    world.tick(Vec3::on_floor(-1000.0, 1000.0));

    for (coord, grid) in before {
        let chunk = world.get_chunk(coord);
        assert_eq!(chunk.state(), ChunkState::Generated, "{coord} still realized");
        assert_eq!(chunk.grid(), &grid, "{coord} grid changed");
    }
}

/// Test: Walking back and forth over a chunk border doesn't churn meshes.
#[test]
fn test_border_oscillation_has_no_churn() {
    let mut world = world();
    world.tick(Vec3::on_floor(15.9, 0.5));
    world.tick(Vec3::on_floor(16.1, 0.5));

    let built = world.renderer().built_total();
    for i in 0..100 {
        let x = if i % 2 == 0 { 15.9 } else { 16.1 };
        world.tick(Vec3::on_floor(x, 0.5));
    }

    assert_eq!(world.renderer().built_total(), built);
    assert_eq!(world.renderer().disposed_total(), 0);
}

/// Test: Two worlds walking the same path produce identical terrain.
#[test]
fn test_deterministic_terrain() {
    let mut a = world();
    let mut b = world();

    for step in 0..200 {
        let position = Vec3::on_floor(step as f32 * 0.7 - 40.0, step as f32 * -1.3);
        a.tick(position);
        b.tick(position);
        assert_eq!(a.is_blocked(position), b.is_blocked(position));
    }

    for coord in ChunkCoord::new(-3, -8).square_around(3) {
        assert_eq!(a.get_chunk(coord).grid(), b.get_chunk(coord).grid());
    }
}
