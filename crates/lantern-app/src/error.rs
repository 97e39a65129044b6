use thiserror::Error;

/// Startup and session failures. Any of these ends the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] lantern_config::ConfigError),

    #[error("terrain: {0}")]
    Terrain(#[from] lantern_terrain::TerrainError),

    #[error("assets: {0}")]
    Assets(#[from] lantern_assets::AssetError),

    #[error("world: {0}")]
    World(#[from] lantern_world::WorldError),

    #[error("view: {0}")]
    View(#[from] lantern_view::ViewError),

    #[error("failed to write frame: {0}")]
    Image(#[from] image::ImageError),

    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}
