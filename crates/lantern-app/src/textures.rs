//! Builds the face texture library for a session.

use std::collections::BTreeSet;

use lantern_assets::{AssetError, FaceKind, TextureLibrary};
use lantern_config::Config;

use crate::AppError;

/// Loads face textures for every configured tile type.
///
/// A missing face directory is not fatal: every tile type gets generated
/// placeholder faces instead. The fallback tile type always ends up with
/// a full face set.
pub fn build_textures(config: &Config) -> Result<TextureLibrary, AppError> {
    let assets = &config.assets;
    let fallback = assets.fallback_tile_type.as_str();
    let tile_types: Vec<&str> = config
        .terrain
        .biome_tiles
        .values()
        .map(String::as_str)
        .chain(std::iter::once(fallback))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let tile_px = assets.base_texture_size * assets.texture_scale;

    let mut library = TextureLibrary::new();
    match library.load_dir(&assets.face_dir, &tile_types, assets.texture_scale) {
        Ok(_) => {}
        Err(AssetError::MissingDir(dir)) => {
            tracing::warn!(
                dir = %dir.display(),
                "face texture directory missing, generating placeholders"
            );
            for tile_type in &tile_types {
                library.placeholder(tile_type, tile_px)?;
            }
        }
        Err(e) => return Err(e.into()),
    }

    if FaceKind::ALL
        .iter()
        .any(|&kind| !library.contains(fallback, kind))
    {
        tracing::warn!(fallback, "fallback tile type incomplete, generating placeholder");
        library.placeholder(fallback, tile_px)?;
    }
    Ok(library)
}
