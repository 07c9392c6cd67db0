//! # DELVE Physics
//!
//! Kinematic movement against the maze grid.
//!
//! Features:
//! - Axis-separated sliding (X first, then Z)
//! - View vectors from yaw/pitch
//! - Point collision: a body is a point on the floor plane
//!
//! Yaw 0 looks down -Z. Positive yaw turns left (counter-clockwise seen
//! from above). Positive pitch looks up.

use delve_procedural::{ChunkRenderer, WorldManager};
use delve_shared::Vec3;

/// Moves below this length are ignored.
pub const MIN_STEP: f32 = 1e-4;

// ============================================================================
// VIEW VECTORS
// ============================================================================

/// Horizontal unit vector the camera faces at `yaw`.
#[inline]
#[must_use]
pub fn forward_vector(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal unit vector to the camera's right at `yaw`.
#[inline]
#[must_use]
pub fn right_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Full 3D unit view direction.
#[inline]
#[must_use]
pub fn view_direction(yaw: f32, pitch: f32) -> Vec3 {
    let flat = pitch.cos();
    Vec3::new(-yaw.sin() * flat, pitch.sin(), -yaw.cos() * flat)
}

// ============================================================================
// MOVEMENT
// ============================================================================

/// Outcome of a sliding move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    /// Where the body ended up.
    pub position: Vec3,
    /// The X component was rejected.
    pub blocked_x: bool,
    /// The Z component was rejected.
    pub blocked_z: bool,
}

impl MoveResult {
    /// Returns true if any component was rejected.
    #[must_use]
    pub const fn collided(&self) -> bool {
        self.blocked_x || self.blocked_z
    }
}

/// Moves a point by `delta` with axis-separated collision.
///
/// The X component is tried first from `from`; the Z component is then
/// tried from wherever X left the body. Each component is kept only if its
/// target cell is open, so a diagonal move into a wall slides along it.
/// The vertical component of `delta` is ignored.
pub fn slide_move<R: ChunkRenderer>(world: &mut WorldManager<R>, from: Vec3, delta: Vec3) -> MoveResult {
    let mut position = from;
    let mut blocked_x = false;
    let mut blocked_z = false;

    if delta.x.abs() > MIN_STEP {
        let candidate = Vec3::new(position.x + delta.x, position.y, position.z);
        if world.is_blocked(candidate) {
            blocked_x = true;
        } else {
            position = candidate;
        }
    }

    if delta.z.abs() > MIN_STEP {
        let candidate = Vec3::new(position.x, position.y, position.z + delta.z);
        if world.is_blocked(candidate) {
            blocked_z = true;
        } else {
            position = candidate;
        }
    }

    MoveResult {
        position,
        blocked_x,
        blocked_z,
    }
}

/// Moves a point up to `distance` toward `target` on the floor plane.
///
/// Never overshoots the target.
pub fn step_toward<R: ChunkRenderer>(
    world: &mut WorldManager<R>,
    from: Vec3,
    target: Vec3,
    distance: f32,
) -> MoveResult {
    let offset = Vec3::new(target.x - from.x, 0.0, target.z - from.z);
    let length = offset.length();
    if length <= MIN_STEP || distance <= 0.0 {
        return MoveResult {
            position: from,
            blocked_x: false,
            blocked_z: false,
        };
    }

    let step = offset * (distance.min(length) / length);
    slide_move(world, from, step)
}
