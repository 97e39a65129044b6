use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while loading face textures.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The face texture directory does not exist.
    #[error("face texture directory not found: {0}")]
    MissingDir(PathBuf),

    /// A texture file exists but could not be decoded.
    #[error("failed to load {path}: {source}")]
    Decode {
        /// File that failed.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Scale factor or placeholder size of zero.
    #[error("invalid texture size: {0}")]
    InvalidSize(String),
}
