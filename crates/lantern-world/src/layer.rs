//! Draw layers. Higher values paint later.

use lantern_assets::FaceKind;

pub const WATER: f32 = 0.0;
pub const GROUND: f32 = 1.0;
/// Actors such as the viewer marker.
pub const MAIN: f32 = 9.0;

/// Added to the tile layer so a tile's faces paint top over left over right.
pub fn face_offset(kind: FaceKind) -> f32 {
    match kind {
        FaceKind::Top => 0.3,
        FaceKind::Left => 0.2,
        FaceKind::Right => 0.1,
    }
}
