//! Configuration structs with sensible defaults and RON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "lantern";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output surface settings.
    pub window: WindowConfig,
    /// Chunk streaming settings.
    pub world: WorldConfig,
    /// Noise and biome settings.
    pub terrain: TerrainSection,
    /// Zoom settings.
    pub camera: CameraConfig,
    /// Face texture settings.
    pub assets: AssetsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Chunk streaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Edge length of a chunk in tiles.
    pub chunk_size: u32,
    /// Chebyshev radius, in chunks, kept loaded around the viewer.
    pub render_distance: u32,
}

/// One breakpoint of the biome threshold table.
///
/// A noise value strictly below `below` (and not below any earlier entry)
/// falls into `biome`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiomeThreshold {
    /// Biome label, e.g. `"deep_water"`.
    pub biome: String,
    /// Exclusive upper bound of the bucket.
    pub below: f64,
}

impl BiomeThreshold {
    fn new(biome: &str, below: f64) -> Self {
        Self {
            biome: biome.to_string(),
            below,
        }
    }
}

/// Noise and biome configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainSection {
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// World units per noise unit. Larger values give broader features.
    pub scale: f64,
    /// Noise-space X offset. Derived from the seed when absent.
    pub offset_x: Option<f64>,
    /// Noise-space Y offset. Derived from the seed when absent.
    pub offset_y: Option<f64>,
    /// Ascending biome breakpoints.
    pub thresholds: Vec<BiomeThreshold>,
    /// Biome label -> tile type.
    pub biome_tiles: BTreeMap<String, String>,
    /// Biomes whose cells hold no solid tile.
    pub open_biomes: Vec<String>,
}

/// Zoom configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Starting zoom factor.
    pub zoom: f64,
    /// Increment applied by a single zoom-in / zoom-out step.
    pub zoom_step: f64,
}

/// Face texture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding pre-split `{tile}_{face}.png` images.
    pub face_dir: PathBuf,
    /// Edge length of a source face texture in pixels.
    pub base_texture_size: u32,
    /// Integer upscale applied to textures at load time.
    pub texture_scale: u32,
    /// Tile type used when a specific face texture is missing.
    pub fallback_tile_type: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Frames between diagnostic snapshots (0 disables them).
    pub snapshot_interval: u32,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "Moon Lantern".to_string(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            chunk_size: 8,
            render_distance: 3,
        }
    }
}

impl Default for TerrainSection {
    fn default() -> Self {
        let thresholds = vec![
            BiomeThreshold::new("deep_water", -0.6),
            BiomeThreshold::new("shallow_water", -0.3),
            BiomeThreshold::new("sand", -0.1),
            BiomeThreshold::new("grass", 0.3),
            BiomeThreshold::new("forest", 0.6),
            BiomeThreshold::new("mountain", 0.8),
            BiomeThreshold::new("snow", 1.0),
        ];

        // Only two tile sets ship as art, so most biomes share one.
        let biome_tiles = [
            ("deep_water", "red_grass_block"),
            ("shallow_water", "red_grass_block"),
            ("sand", "red_grass_block"),
            ("grass", "grass_block"),
            ("forest", "grass_block"),
            ("mountain", "red_grass_block"),
            ("snow", "red_grass_block"),
        ]
        .into_iter()
        .map(|(biome, tile)| (biome.to_string(), tile.to_string()))
        .collect();

        Self {
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 100.0,
            offset_x: None,
            offset_y: None,
            thresholds,
            biome_tiles,
            open_biomes: vec!["deep_water".to_string(), "shallow_water".to_string()],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 3.0,
            zoom: 1.0,
            zoom_step: 0.1,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            face_dir: PathBuf::from("assets/textures/faces"),
            base_texture_size: 32,
            texture_scale: 4,
            fallback_tile_type: "red_grass_block".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            snapshot_interval: 60,
        }
    }
}

/// Platform config directory for Lantern (`<os config dir>/lantern`).
///
/// Falls back to the working directory when the OS exposes none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Validation ---

impl Config {
    /// Checks ranges and cross-field constraints that serde cannot express.
    ///
    /// Biome tables are checked when the terrain classifier is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        if self.world.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "world.chunk_size must be at least 1".to_string(),
            ));
        }
        if self.world.render_distance == 0 {
            return Err(ConfigError::Invalid(
                "world.render_distance must be at least 1".to_string(),
            ));
        }
        let cam = &self.camera;
        if cam.min_zoom.is_nan() || cam.min_zoom <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.min_zoom {} must be positive",
                cam.min_zoom
            )));
        }
        if cam.min_zoom > cam.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "camera zoom bounds are inverted: min {} > max {}",
                cam.min_zoom, cam.max_zoom
            )));
        }
        if cam.zoom_step.is_nan() || cam.zoom_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.zoom_step {} must be positive",
                cam.zoom_step
            )));
        }
        let tile_px = u64::from(self.assets.base_texture_size) * u64::from(self.assets.texture_scale);
        if !(4..=u64::from(u16::MAX)).contains(&tile_px) {
            return Err(ConfigError::Invalid(format!(
                "tile size {tile_px}px (base_texture_size x texture_scale) must be within 4..=65535"
            )));
        }
        if self.assets.fallback_tile_type.is_empty() {
            return Err(ConfigError::Invalid(
                "assets.fallback_tile_type must name a tile type".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
