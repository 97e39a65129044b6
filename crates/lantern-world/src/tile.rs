//! A single grid tile and its face slots.

use lantern_assets::FaceKind;
use lantern_coords::{DVec2, TileCoord};
use lantern_terrain::TileType;

use crate::Face;

/// Up to one face per kind.
#[derive(Clone, Debug, Default)]
pub struct FaceSlots {
    top: Option<Face>,
    left: Option<Face>,
    right: Option<Face>,
}

impl FaceSlots {
    pub fn get(&self, kind: FaceKind) -> Option<&Face> {
        match kind {
            FaceKind::Top => self.top.as_ref(),
            FaceKind::Left => self.left.as_ref(),
            FaceKind::Right => self.right.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: FaceKind) -> &mut Option<Face> {
        match kind {
            FaceKind::Top => &mut self.top,
            FaceKind::Left => &mut self.left,
            FaceKind::Right => &mut self.right,
        }
    }

    /// Occupied faces in top, left, right order.
    pub fn iter(&self) -> impl Iterator<Item = &Face> {
        [&self.top, &self.left, &self.right]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.right.is_none()
    }
}

/// One grid cell of a generated chunk.
#[derive(Clone, Debug)]
pub struct Tile {
    /// World grid coordinate.
    pub coord: TileCoord,
    /// Screen-space anchor from the isometric projection.
    pub anchor: DVec2,
    pub tile_type: TileType,
    /// Base draw layer; faces add a per-kind offset.
    pub layer: f32,
    /// Whether a solid tile occupies this cell. Open cells only show a top.
    pub solid: bool,
    faces: FaceSlots,
}

impl Tile {
    pub fn new(coord: TileCoord, anchor: DVec2, tile_type: TileType, layer: f32, solid: bool) -> Self {
        Self {
            coord,
            anchor,
            tile_type,
            layer,
            solid,
            faces: FaceSlots::default(),
        }
    }

    pub fn face(&self, kind: FaceKind) -> Option<&Face> {
        self.faces.get(kind)
    }

    pub fn has_face(&self, kind: FaceKind) -> bool {
        self.faces.get(kind).is_some()
    }

    pub fn faces(&self) -> &FaceSlots {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Installs `face` in its slot, returning the previous occupant.
    pub(crate) fn set_face(&mut self, face: Face) -> Option<Face> {
        self.faces.slot_mut(face.kind).replace(face)
    }

    pub(crate) fn clear_faces(&mut self) {
        self.faces = FaceSlots::default();
    }
}
