//! # DELVE Shared
//!
//! Common types used by every DELVE crate.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a renderer, a windowing crate or an audio
//! backend. Those live on the other side of the collaborator traits.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{EYE_HEIGHT, MOVE_SPEED, ROT_SPEED, TICK_RATE};
pub use math::{SpriteInstance, Vec3};
