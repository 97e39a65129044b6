//! Tile faces and the renderer that resolves their textures.

use lantern_assets::{FaceKind, FaceTextureSource, ImageHandle};
use lantern_coords::{DVec2, TileCoord};
use lantern_terrain::TileType;
use rustc_hash::FxHashSet;

use crate::{Tile, layer};

/// A visible surface of a tile.
#[derive(Clone, Debug)]
pub struct Face {
    /// Coordinate of the owning tile.
    pub tile: TileCoord,
    pub kind: FaceKind,
    /// Tile layer plus the per-kind offset.
    pub layer: f32,
    pub anchor: DVec2,
    /// `None` when neither the tile type nor the fallback has a texture.
    pub image: Option<ImageHandle>,
}

/// Creates faces, falling back to a default tile type's textures.
pub struct FaceRenderer {
    source: Box<dyn FaceTextureSource>,
    fallback: TileType,
    warned: FxHashSet<(TileType, FaceKind)>,
}

impl FaceRenderer {
    pub fn new(source: Box<dyn FaceTextureSource>, fallback: TileType) -> Self {
        Self {
            source,
            fallback,
            warned: FxHashSet::default(),
        }
    }

    /// Builds the `kind` face for `tile` and installs it, dropping any
    /// previous face of that kind.
    pub fn create_face(&mut self, tile: &mut Tile, kind: FaceKind) {
        let image = self.resolve(&tile.tile_type, kind);
        tile.set_face(Face {
            tile: tile.coord,
            kind,
            layer: tile.layer + layer::face_offset(kind),
            anchor: tile.anchor,
            image,
        });
    }

    /// Texture for `(tile_type, kind)`, else the fallback's, else nothing.
    /// Each missing pair is reported once.
    fn resolve(&mut self, tile_type: &TileType, kind: FaceKind) -> Option<ImageHandle> {
        if let Some(image) = self.source.face_texture(tile_type.as_str(), kind) {
            return Some(image);
        }
        let fallback = self.source.face_texture(self.fallback.as_str(), kind);
        if self.warned.insert((tile_type.clone(), kind)) {
            if fallback.is_some() {
                tracing::warn!(
                    tile_type = %tile_type,
                    face = %kind,
                    fallback = %self.fallback,
                    "missing face texture, using fallback"
                );
            } else {
                tracing::warn!(
                    tile_type = %tile_type,
                    face = %kind,
                    "missing face texture and fallback, face will not be drawn"
                );
            }
        }
        fallback
    }

    /// Number of distinct `(tile type, face)` pairs that had no texture.
    pub fn missing_count(&self) -> usize {
        self.warned.len()
    }

    pub fn fallback(&self) -> &TileType {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use lantern_assets::TextureLibrary;

    fn library() -> TextureLibrary {
        let mut lib = TextureLibrary::new();
        for kind in FaceKind::ALL {
            lib.insert("red_grass_block", kind, RgbaImage::new(4, 4));
        }
        lib.insert("grass_block", FaceKind::Top, RgbaImage::new(4, 4));
        lib
    }

    fn tile(name: &str) -> Tile {
        Tile::new(
            TileCoord::new(3, -2),
            DVec2::new(320.0, 32.0),
            TileType::new(name),
            layer::GROUND,
            true,
        )
    }

    #[test]
    fn test_face_takes_anchor_and_offset_layer() {
        let mut renderer = FaceRenderer::new(Box::new(library()), TileType::new("red_grass_block"));
        let mut t = tile("grass_block");
        renderer.create_face(&mut t, FaceKind::Top);
        let face = t.face(FaceKind::Top).unwrap();
        assert_eq!(face.tile, TileCoord::new(3, -2));
        assert_eq!(face.anchor, DVec2::new(320.0, 32.0));
        assert!((face.layer - 1.3).abs() < 1e-6);
        assert!(face.image.is_some());
        assert_eq!(renderer.missing_count(), 0);
    }

    #[test]
    fn test_missing_texture_falls_back_and_warns_once() {
        let lib = library();
        let fallback_left = lib.face_texture("red_grass_block", FaceKind::Left).unwrap();
        let mut renderer = FaceRenderer::new(Box::new(lib), TileType::new("red_grass_block"));

        for _ in 0..5 {
            let mut t = tile("grass_block");
            renderer.create_face(&mut t, FaceKind::Left);
            assert_eq!(t.face(FaceKind::Left).unwrap().image, Some(fallback_left.clone()));
        }
        assert_eq!(renderer.missing_count(), 1);
    }

    #[test]
    fn test_missing_fallback_yields_imageless_face() {
        let mut renderer =
            FaceRenderer::new(Box::new(TextureLibrary::new()), TileType::new("red_grass_block"));
        let mut t = tile("sand_block");
        renderer.create_face(&mut t, FaceKind::Right);
        let face = t.face(FaceKind::Right).unwrap();
        assert!(face.image.is_none());
        assert_eq!(renderer.missing_count(), 1);
    }
}
