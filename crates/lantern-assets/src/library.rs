//! In-memory face texture library backed by pre-split PNG files.
//!
//! Face images live in one directory as `{tile_type}_{face}.png`, where
//! `face` is one of `top`, `left`, `right`. They are upscaled by an integer
//! factor with nearest-neighbour filtering so pixel art stays crisp.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rustc_hash::FxHashMap;

use crate::{AssetError, FaceKind, FaceTextureSource, ImageHandle, ImageId};

/// One optional image per face kind, indexed by [`slot`].
type FaceSet = [Option<ImageHandle>; 3];

/// Maps `(tile type, face kind)` to a loaded image.
///
/// Keyed by tile type name so lookups borrow the caller's `&str`.
#[derive(Default)]
pub struct TextureLibrary {
    faces: FxHashMap<String, FaceSet>,
    next_id: u64,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an image, assigning it a fresh id. Replaces any previous image
    /// for the same pair.
    pub fn insert(&mut self, tile_type: &str, kind: FaceKind, image: RgbaImage) -> ImageHandle {
        let handle = ImageHandle::new(ImageId(self.next_id), image);
        self.next_id += 1;
        self.faces.entry(tile_type.to_string()).or_default()[slot(kind)] = Some(handle.clone());
        handle
    }

    /// Loads every face of every tile type in `tile_types` from `dir`.
    ///
    /// Missing files are warned about and skipped. Returns the number of
    /// faces loaded.
    pub fn load_dir(
        &mut self,
        dir: &Path,
        tile_types: &[&str],
        scale: u32,
    ) -> Result<usize, AssetError> {
        if scale == 0 {
            return Err(AssetError::InvalidSize("texture scale is zero".into()));
        }
        if !dir.is_dir() {
            return Err(AssetError::MissingDir(dir.to_path_buf()));
        }

        let mut loaded = 0;
        for tile_type in tile_types {
            for kind in FaceKind::ALL {
                let path = dir.join(format!("{tile_type}_{}.png", kind.as_str()));
                if !path.is_file() {
                    tracing::warn!(path = %path.display(), "face texture not found");
                    continue;
                }
                let image = image::open(&path)
                    .map_err(|source| AssetError::Decode {
                        path: path.clone(),
                        source,
                    })?
                    .to_rgba8();
                let scaled = imageops::resize(
                    &image,
                    image.width() * scale,
                    image.height() * scale,
                    FilterType::Nearest,
                );
                self.insert(tile_type, kind, scaled);
                loaded += 1;
            }
        }
        tracing::info!(dir = %dir.display(), loaded, "loaded face textures");
        Ok(loaded)
    }

    /// Generates a flat-shaded face set for `tile_type` at `size` x `size`
    /// pixels: top brightest, right darkest, transparent outside each face.
    pub fn placeholder(&mut self, tile_type: &str, size: u32) -> Result<(), AssetError> {
        if size == 0 {
            return Err(AssetError::InvalidSize("placeholder size is zero".into()));
        }
        let base = base_color(tile_type);
        for (kind, shade) in [
            (FaceKind::Top, 1.0),
            (FaceKind::Left, 0.75),
            (FaceKind::Right, 0.55),
        ] {
            let color = Rgba([
                (f32::from(base[0]) * shade) as u8,
                (f32::from(base[1]) * shade) as u8,
                (f32::from(base[2]) * shade) as u8,
                255,
            ]);
            let image = RgbaImage::from_fn(size, size, |x, y| {
                // Face outlines are defined on a 32 px sprite.
                let u = (x as f32 + 0.5) * 32.0 / size as f32;
                let v = (y as f32 + 0.5) * 32.0 / size as f32;
                if in_face(kind, u, v) {
                    color
                } else {
                    Rgba([0, 0, 0, 0])
                }
            });
            self.insert(tile_type, kind, image);
        }
        tracing::debug!(tile_type, size, "generated placeholder faces");
        Ok(())
    }

    /// Number of loaded faces across all tile types.
    pub fn len(&self) -> usize {
        self.faces
            .values()
            .map(|set| set.iter().flatten().count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn contains(&self, tile_type: &str, kind: FaceKind) -> bool {
        self.get(tile_type, kind).is_some()
    }

    fn get(&self, tile_type: &str, kind: FaceKind) -> Option<&ImageHandle> {
        self.faces
            .get(tile_type)
            .and_then(|set| set[slot(kind)].as_ref())
    }
}

impl FaceTextureSource for TextureLibrary {
    fn face_texture(&self, tile_type: &str, kind: FaceKind) -> Option<ImageHandle> {
        self.get(tile_type, kind).cloned()
    }
}

fn slot(kind: FaceKind) -> usize {
    match kind {
        FaceKind::Top => 0,
        FaceKind::Left => 1,
        FaceKind::Right => 2,
    }
}

fn in_face(kind: FaceKind, u: f32, v: f32) -> bool {
    let slope = 7.0 / 15.0;
    match kind {
        FaceKind::Top => (u - 16.0).abs() / 16.0 + (v - 8.0).abs() / 8.0 <= 1.0,
        FaceKind::Left => u < 16.0 && v >= 9.0 + u * slope && v <= 24.0 + u * slope,
        FaceKind::Right => {
            let t = (u - 16.0) * slope;
            u >= 16.0 && v >= 16.0 - t && v <= 31.0 - t
        }
    }
}

/// A stable earthy color per tile type name.
fn base_color(tile_type: &str) -> [u8; 3] {
    let hash = tile_type
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
        });
    [
        96 + (hash & 0x7f) as u8,
        96 + ((hash >> 8) & 0x7f) as u8,
        64 + ((hash >> 16) & 0x3f) as u8,
    ]
}
