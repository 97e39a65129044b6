//! Flat records handed to the renderer each frame.

use lantern_assets::{FaceKind, ImageHandle};
use lantern_coords::{DVec2, TileCoord};
use lantern_terrain::TileType;

/// What a renderable stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Tile { coord: TileCoord, tile_type: TileType },
    Face { tile: TileCoord, kind: FaceKind },
    /// Anything not part of the terrain, e.g. the viewer marker.
    Actor { label: String },
}

/// A positioned, layered, optionally textured thing to draw.
#[derive(Clone, Debug)]
pub struct RenderableEntity {
    /// Top-left corner in world screen space (before zoom and offset).
    pub position: DVec2,
    /// Entities without an image are not drawn.
    pub image: Option<ImageHandle>,
    pub layer: f32,
    pub kind: EntityKind,
}

impl RenderableEntity {
    pub fn actor(label: impl Into<String>, position: DVec2, image: ImageHandle, layer: f32) -> Self {
        Self {
            position,
            image: Some(image),
            layer,
            kind: EntityKind::Actor {
                label: label.into(),
            },
        }
    }
}
