//! Isometric projection between grid space and screen space.

use glam::DVec2;

/// Maps grid coordinates to isometric screen anchors and back.
///
/// Tiles are `tile_width` x `tile_height` pixels. A step of +1 along grid X
/// moves the anchor by `(+w/2, +h/4)`; a step along grid Y by `(-w/2, +h/4)`.
/// The half and quarter are integer pixel counts, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsoProjector {
    tile_width: u32,
    tile_height: u32,
    half_width: u32,
    quarter_height: u32,
}

impl IsoProjector {
    /// Projector for square face textures of `base_texture_size` pixels
    /// upscaled by `scale`.
    ///
    /// # Panics
    ///
    /// Panics if the resulting tile is smaller than 4 pixels, which would
    /// make the projection non-invertible. Configuration validation rejects
    /// zero sizes before this point.
    pub fn new(base_texture_size: u32, scale: u32) -> Self {
        let size = base_texture_size * scale;
        Self::with_tile_size(size, size)
    }

    /// Projector for explicit tile pixel dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `tile_width < 2` or `tile_height < 4`.
    pub fn with_tile_size(tile_width: u32, tile_height: u32) -> Self {
        assert!(
            tile_width >= 2 && tile_height >= 4,
            "tile size {tile_width}x{tile_height} too small to project"
        );
        Self {
            tile_width,
            tile_height,
            half_width: tile_width / 2,
            quarter_height: tile_height / 4,
        }
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Grid `(x, y)` to screen anchor.
    pub fn cart_to_iso(&self, x: f64, y: f64) -> DVec2 {
        let hw = f64::from(self.half_width);
        let qh = f64::from(self.quarter_height);
        DVec2::new((x - y) * hw, (x + y) * qh)
    }

    /// Screen anchor to continuous grid position. Inverse of [`Self::cart_to_iso`].
    pub fn iso_to_cart(&self, sx: f64, sy: f64) -> DVec2 {
        let u = sx / f64::from(self.half_width);
        let v = sy / f64::from(self.quarter_height);
        DVec2::new((v + u) * 0.5, (v - u) * 0.5)
    }
}

impl Default for IsoProjector {
    fn default() -> Self {
        Self::new(32, 4)
    }
}
