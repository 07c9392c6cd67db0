//! # World Streaming
//!
//! Keeps the square of chunks around a moving reference point realized.
//!
//! Every chunk within `render_distance` (Chebyshev) of the reference chunk is
//! realized. A realized chunk is released only once it is more than
//! `render_distance + 1` away, so standing on a chunk border never makes the
//! outer ring flicker between realized and released.

use delve_shared::Vec3;
use serde::{Deserialize, Serialize};

use crate::chunk::{ChunkCoord, RENDER_DISTANCE};
use crate::render::ChunkRenderer;
use crate::store::ChunkStore;

/// World generation and streaming settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Generation seed. `0` is the classic maze.
    pub seed: u64,
    /// Chebyshev radius, in chunks, kept realized around the player.
    pub render_distance: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            render_distance: RENDER_DISTANCE,
        }
    }
}

/// What one streaming tick changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// Chunk the reference point is in.
    pub center: ChunkCoord,
    /// Chunks that went from generated to realized.
    pub realized: usize,
    /// Chunks that were released.
    pub released: usize,
}

/// Decides which chunks are realized. The only writer of realization state.
#[derive(Clone, Copy, Debug)]
pub struct WorldStreamer {
    render_distance: u32,
    last_center: Option<ChunkCoord>,
}

impl WorldStreamer {
    /// Creates a streamer with the given radius.
    #[must_use]
    pub const fn new(render_distance: u32) -> Self {
        Self {
            render_distance,
            last_center: None,
        }
    }

    /// The realize radius.
    #[must_use]
    pub const fn render_distance(&self) -> u32 {
        self.render_distance
    }

    /// Chunk the reference point was in at the last tick.
    #[must_use]
    pub const fn last_center(&self) -> Option<ChunkCoord> {
        self.last_center
    }

    /// Realizes the square around `position` and releases chunks past the margin.
    pub fn tick<R: ChunkRenderer>(&mut self, store: &mut ChunkStore<R>, position: Vec3) -> StreamReport {
        let center = ChunkCoord::from_world(position);
        let mut report = StreamReport {
            center,
            ..StreamReport::default()
        };

        for coord in center.square_around(self.render_distance) {
            let was_realized = store.peek(coord).is_some_and(|c| c.handle().is_some());
            store.realize(coord);
            if !was_realized {
                report.realized += 1;
            }
        }

        let release_beyond = self.render_distance + 1;
        for coord in store.realized_coords() {
            if coord.chebyshev_distance(center) > release_beyond && store.release(coord) {
                report.released += 1;
            }
        }

        if self.last_center != Some(center) {
            tracing::debug!(
                chunk = %center,
                realized = report.realized,
                released = report.released,
                "streaming center moved"
            );
            self.last_center = Some(center);
        }

        report
    }
}

impl Default for WorldStreamer {
    fn default() -> Self {
        Self::new(RENDER_DISTANCE)
    }
}
