//! Headless session: a scripted viewer walks the world while every frame
//! streams chunks and composites the visible scene.

use std::path::Path;

use glam::DVec2;
use image::{Rgba, RgbaImage};
use lantern_assets::{ImageHandle, ImageId, TextureLibrary};
use lantern_config::Config;
use lantern_terrain::{TerrainClassifier, TerrainConfig, resolve_seed};
use lantern_view::{Camera, CameraSettings, FrameStats};
use lantern_world::{ChunkManager, RenderableEntity, WorldSettings, layer};

use crate::game_loop::{FIXED_DT, FixedTimestep};
use crate::{AppError, DebugSnapshot};

const BACKGROUND: Rgba<u8> = Rgba([24, 28, 40, 255]);
const MARKER: Rgba<u8> = Rgba([255, 214, 90, 255]);

/// Moves a point along a closed polyline at constant speed, in grid units.
#[derive(Clone, Debug)]
pub struct ScriptedWalk {
    waypoints: Vec<DVec2>,
    speed: f64,
    next: usize,
    position: DVec2,
}

impl ScriptedWalk {
    /// Starts at the first waypoint heading for the second.
    pub fn new(waypoints: Vec<DVec2>, speed: f64) -> Self {
        let position = waypoints.first().copied().unwrap_or(DVec2::ZERO);
        Self {
            next: 1 % waypoints.len().max(1),
            waypoints,
            speed: speed.max(0.0),
            position,
        }
    }

    /// A square loop around the origin, `side` tiles long.
    pub fn square(side: f64, speed: f64) -> Self {
        Self::new(
            vec![
                DVec2::ZERO,
                DVec2::new(side, 0.0),
                DVec2::new(side, side),
                DVec2::new(0.0, side),
            ],
            speed,
        )
    }

    pub fn step(&mut self, dt: f64) {
        let len = self.waypoints.len();
        if len < 2 {
            return;
        }
        let lap: f64 = (0..len)
            .map(|i| self.waypoints[i].distance(self.waypoints[(i + 1) % len]))
            .sum();
        if lap <= 0.0 {
            return;
        }
        let mut remaining = (self.speed * dt) % lap;
        while remaining > 0.0 {
            let target = self.waypoints[self.next];
            let to = target - self.position;
            let dist = to.length();
            if dist <= remaining {
                self.position = target;
                remaining -= dist;
                self.next = (self.next + 1) % len;
            } else {
                self.position += to / dist * remaining;
                remaining = 0.0;
            }
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }
}

/// World, camera and canvas driven by a fixed-step clock.
pub struct Session {
    world: ChunkManager,
    camera: Camera,
    canvas: RgbaImage,
    walk: ScriptedWalk,
    marker: ImageHandle,
    clock: FixedTimestep,
    snapshot_interval: u32,
    last_stats: FrameStats,
}

impl Session {
    pub fn new(config: &Config, textures: TextureLibrary) -> Result<Self, AppError> {
        let seed = resolve_seed(config.world.seed);
        let terrain = TerrainClassifier::new(TerrainConfig::from_section(&config.terrain, seed)?)?;

        let settings = WorldSettings {
            chunk_size: config.world.chunk_size,
            render_distance: config.world.render_distance,
            base_texture_size: config.assets.base_texture_size,
            texture_scale: config.assets.texture_scale,
            fallback_tile_type: config.assets.fallback_tile_type.clone(),
        };
        let world = ChunkManager::new(settings, terrain, Box::new(textures))?;

        let camera = Camera::new(CameraSettings {
            min_zoom: config.camera.min_zoom,
            max_zoom: config.camera.max_zoom,
            zoom: config.camera.zoom,
            zoom_step: config.camera.zoom_step,
            screen_width: config.window.width,
            screen_height: config.window.height,
        })?;

        let tile_px = world.projector().tile_width();
        let marker = ImageHandle::new(
            ImageId(u64::MAX),
            RgbaImage::from_pixel((tile_px / 4).max(1), (tile_px / 2).max(1), MARKER),
        );

        tracing::info!(
            seed,
            width = config.window.width,
            height = config.window.height,
            "session ready"
        );

        Ok(Self {
            world,
            camera,
            canvas: RgbaImage::from_pixel(config.window.width, config.window.height, BACKGROUND),
            walk: ScriptedWalk::square(f64::from(config.world.chunk_size) * 6.0, 6.0),
            marker,
            clock: FixedTimestep::new(),
            snapshot_interval: config.debug.snapshot_interval,
            last_stats: FrameStats::default(),
        })
    }

    /// Replaces the viewer's path.
    pub fn with_walk(mut self, walk: ScriptedWalk) -> Self {
        self.walk = walk;
        self
    }

    /// Advances one 60 Hz frame: move the viewer, stream, draw.
    pub fn frame(&mut self) {
        let walk = &mut self.walk;
        self.clock.advance(FIXED_DT, |dt, _| walk.step(dt), |_| {});
        self.render();

        let frame = self.clock.frame_count();
        if self.snapshot_interval > 0 && frame % u64::from(self.snapshot_interval) == 0 {
            let snapshot = self.snapshot();
            tracing::info!(snapshot = %snapshot.to_json(), "debug snapshot");
        }
    }

    /// Runs `frames` frames and returns the final snapshot.
    pub fn run(&mut self, frames: u32) -> DebugSnapshot {
        for _ in 0..frames {
            self.frame();
        }
        let snapshot = self.snapshot();
        tracing::info!(
            frames = snapshot.frame,
            chunks = snapshot.chunk_count,
            "session finished"
        );
        snapshot
    }

    fn render(&mut self) {
        let grid = self.walk.position();
        let viewer = self.world.projector().cart_to_iso(grid.x, grid.y);

        let report = self.world.update(viewer);
        if !report.is_empty() {
            tracing::debug!(
                viewer = %report.viewer_chunk,
                loaded = report.loaded.len(),
                unloaded = report.unloaded.len(),
                "viewer changed chunk"
            );
        }

        // The marker stands on the centre of the viewer's tile.
        let tile_w = f64::from(self.world.projector().tile_width());
        let tile_h = f64::from(self.world.projector().tile_height());
        let marker_pos = viewer
            + DVec2::new(
                (tile_w - f64::from(self.marker.width())) / 2.0,
                tile_h / 4.0 - f64::from(self.marker.height()),
            );
        let marker = RenderableEntity::actor("viewer", marker_pos, self.marker.clone(), layer::MAIN);

        for pixel in self.canvas.pixels_mut() {
            *pixel = BACKGROUND;
        }
        let entities = self.world.renderables().chain(std::iter::once(marker));
        self.last_stats = self.camera.draw(viewer, entities, &mut self.canvas);
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        DebugSnapshot::capture(self.clock.frame_count(), &self.world, &self.camera, self.last_stats)
    }

    /// Writes the last composited frame as PNG.
    pub fn save_frame(&self, path: &Path) -> Result<(), AppError> {
        self.canvas.save(path)?;
        tracing::info!(path = %path.display(), "frame written");
        Ok(())
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn world(&self) -> &ChunkManager {
        &self.world
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewer(&self) -> DVec2 {
        self.walk.position()
    }
}
