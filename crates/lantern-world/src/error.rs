use thiserror::Error;

/// Errors raised when constructing the chunk manager.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Chunk edge length must be at least one tile.
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    /// At least the ring of chunks around the viewer must stay loaded.
    #[error("render distance must be at least 1")]
    InvalidRenderDistance,

    /// Tiles too small to project.
    #[error("tile size {0}px is outside 4..=65535")]
    InvalidTileSize(u64),
}
