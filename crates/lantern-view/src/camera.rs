//! Viewer-following camera with clamped zoom.

use glam::DVec2;
use image::RgbaImage;
use image::imageops;
use lantern_world::RenderableEntity;
use serde::Serialize;

use crate::{ScaledImageCache, ViewError};

/// Camera construction parameters.
#[derive(Clone, Debug)]
pub struct CameraSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Initial zoom, clamped into the bounds.
    pub zoom: f64,
    /// Amount added or removed by one zoom step.
    pub zoom_step: f64,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 3.0,
            zoom: 1.0,
            zoom_step: 0.1,
            screen_width: 1920,
            screen_height: 1080,
        }
    }
}

/// Counters for one [`Camera::draw`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Entities that carried an image.
    pub considered: usize,
    pub drawn: usize,
    /// Entirely off screen.
    pub culled: usize,
    /// Zoomed to zero width or height.
    pub degenerate: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

/// Centers the viewer on screen and composites entities at the current zoom.
pub struct Camera {
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    screen_size: (u32, u32),
    offset: DVec2,
    cache: ScaledImageCache,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Result<Self, ViewError> {
        let CameraSettings {
            min_zoom,
            max_zoom,
            zoom,
            zoom_step,
            screen_width,
            screen_height,
        } = settings;
        if min_zoom.is_nan() || max_zoom.is_nan() || min_zoom <= 0.0 || min_zoom > max_zoom {
            return Err(ViewError::ZoomBounds {
                min: min_zoom,
                max: max_zoom,
            });
        }
        if zoom_step.is_nan() || zoom_step <= 0.0 {
            return Err(ViewError::ZoomStep(zoom_step));
        }
        if screen_width == 0 || screen_height == 0 {
            return Err(ViewError::ScreenSize {
                width: screen_width,
                height: screen_height,
            });
        }
        let zoom = if zoom.is_nan() { 1.0 } else { zoom };
        Ok(Self {
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            zoom_step,
            screen_size: (screen_width, screen_height),
            offset: DVec2::ZERO,
            cache: ScaledImageCache::new(),
        })
    }

    /// Composites `entities` onto `canvas` with the viewer at screen center.
    ///
    /// Entities are painted in ascending layer order; ties keep their input
    /// order. Entities without an image are skipped.
    pub fn draw<I>(&mut self, viewer: DVec2, entities: I, canvas: &mut RgbaImage) -> FrameStats
    where
        I: IntoIterator<Item = RenderableEntity>,
    {
        let (sw, sh) = self.screen_size;
        let center = DVec2::new(f64::from(sw) / 2.0, f64::from(sh) / 2.0);
        self.offset = viewer * self.zoom - center;

        let mut visible: Vec<RenderableEntity> =
            entities.into_iter().filter(|e| e.image.is_some()).collect();
        visible.sort_by(|a, b| a.layer.total_cmp(&b.layer));

        let mut stats = FrameStats {
            considered: visible.len(),
            ..Default::default()
        };

        for entity in &visible {
            let Some(handle) = &entity.image else {
                continue;
            };
            let w = (f64::from(handle.width()) * self.zoom).round();
            let h = (f64::from(handle.height()) * self.zoom).round();
            if w < 1.0 || h < 1.0 {
                stats.degenerate += 1;
                continue;
            }

            let pos = self.world_to_screen(entity.position);
            let on_screen =
                pos.x < f64::from(sw) && pos.y < f64::from(sh) && pos.x + w > 0.0 && pos.y + h > 0.0;
            if !on_screen {
                stats.culled += 1;
                continue;
            }

            let (scaled, hit) = self.cache.get_or_scale(handle, w as u32, h as u32);
            if hit {
                stats.cache_hits += 1;
            } else {
                stats.cache_misses += 1;
            }
            imageops::overlay(canvas, &*scaled, pos.x.round() as i64, pos.y.round() as i64);
            stats.drawn += 1;
        }

        tracing::trace!(
            drawn = stats.drawn,
            culled = stats.culled,
            cache = self.cache.len(),
            "frame composited"
        );
        stats
    }

    /// Screen position of a world-space point under the last offset.
    pub fn world_to_screen(&self, pos: DVec2) -> DVec2 {
        pos * self.zoom - self.offset
    }

    /// Sets the zoom, clamped into the bounds. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_nan() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.zoom_step);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Offset computed by the last draw.
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    /// Number of scaled images held.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
