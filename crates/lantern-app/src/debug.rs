//! Serializable snapshot of the session state for logs.

use lantern_coords::ChunkCoord;
use lantern_view::{Camera, FrameStats};
use lantern_world::ChunkManager;
use serde::Serialize;

/// Tile count of one loaded chunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChunkTiles {
    pub chunk: ChunkCoord,
    pub tiles: usize,
}

/// What a debug overlay would show, captured at one frame.
#[derive(Clone, Debug, Serialize)]
pub struct DebugSnapshot {
    pub frame: u64,
    pub seed: u64,
    pub chunk_count: usize,
    pub chunk_tiles: Vec<ChunkTiles>,
    pub viewer_chunk: Option<ChunkCoord>,
    pub viewer_grid: [f64; 2],
    pub zoom: f64,
    pub offset: [f64; 2],
    pub scaled_images: usize,
    pub missing_textures: usize,
    pub stats: FrameStats,
}

impl DebugSnapshot {
    pub fn capture(frame: u64, world: &ChunkManager, camera: &Camera, stats: FrameStats) -> Self {
        let grid = world.viewer_grid_position();
        let offset = camera.offset();
        Self {
            frame,
            seed: world.terrain().seed(),
            chunk_count: world.chunk_count(),
            chunk_tiles: world
                .tile_counts()
                .into_iter()
                .map(|(chunk, tiles)| ChunkTiles { chunk, tiles })
                .collect(),
            viewer_chunk: world.viewer_chunk(),
            viewer_grid: [grid.x, grid.y],
            zoom: camera.zoom(),
            offset: [offset.x, offset.y],
            scaled_images: camera.cache_len(),
            missing_textures: world.missing_textures(),
            stats,
        }
    }

    /// Compact JSON for a single log line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
