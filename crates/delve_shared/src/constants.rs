//! # Tuning Constants
//!
//! Values shared between the simulation and its collaborators.
//!
//! **NOTE:** Per-template numbers (health, damage, spawn weight) live in the
//! game data catalog, not here.

// =============================================================================
// PLAYER
// =============================================================================

/// Player walk speed (world units per second).
pub const MOVE_SPEED: f32 = 3.5;

/// Keyboard/stick turn speed (radians per second at full deflection).
pub const ROT_SPEED: f32 = 2.0;

/// Camera height above the floor (world units).
pub const EYE_HEIGHT: f32 = 1.2;

/// Radians of yaw/pitch per unit of mouse look delta.
pub const LOOK_SENSITIVITY: f32 = 0.002;

/// Pitch clamp (radians, both directions).
pub const MAX_PITCH: f32 = 1.5;

// =============================================================================
// FRAME
// =============================================================================

/// Nominal simulation rate (ticks per second).
pub const TICK_RATE: u32 = 60;

/// Largest step the simulation accepts before clamping.
///
/// A tab returning from the background would otherwise teleport everything.
pub const MAX_DELTA_TIME: f32 = 0.1;
