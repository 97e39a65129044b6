//! Face kinds and the texture lookup seam.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

/// One of the three visible surfaces of an isometric tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceKind {
    Top,
    Left,
    Right,
}

impl FaceKind {
    /// All face kinds, top first.
    pub const ALL: [FaceKind; 3] = [FaceKind::Top, FaceKind::Left, FaceKind::Right];

    /// Suffix used in texture file names (`{tile}_{face}.png`).
    pub fn as_str(self) -> &'static str {
        match self {
            FaceKind::Top => "top",
            FaceKind::Left => "left",
            FaceKind::Right => "right",
        }
    }
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a loaded image. Scaled copies are cached by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// A shared, immutable RGBA image and its identity.
///
/// Equality compares ids only; two handles with the same id are the same
/// image.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    pub id: ImageId,
    pub image: Arc<RgbaImage>,
}

impl ImageHandle {
    pub fn new(id: ImageId, image: RgbaImage) -> Self {
        Self {
            id,
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ImageHandle {}

/// Resolves the texture for a `(tile type, face kind)` pair.
///
/// Implementations must at least provide the fallback tile type's full
/// face set for rendering to degrade gracefully.
pub trait FaceTextureSource {
    fn face_texture(&self, tile_type: &str, kind: FaceKind) -> Option<ImageHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_names() {
        let names: Vec<_> = FaceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["top", "left", "right"]);
        assert_eq!(FaceKind::Left.to_string(), "left");
    }

    #[test]
    fn test_handle_identity_is_id() {
        let a = ImageHandle::new(ImageId(1), RgbaImage::new(2, 2));
        let b = ImageHandle::new(ImageId(1), RgbaImage::new(4, 4));
        let c = ImageHandle::new(ImageId(2), RgbaImage::new(2, 2));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!((b.width(), b.height()), (4, 4));
    }
}
