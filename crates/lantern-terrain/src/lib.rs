//! Procedural terrain: multi-octave noise, biome thresholds, and the
//! tile classifier that every chunk and every seam prediction consults.

mod biome;
mod classifier;
mod error;
mod noise_field;

pub use biome::{Biome, TileType};
pub use classifier::{TerrainClassifier, TerrainConfig, resolve_seed};
pub use error::TerrainError;
pub use noise_field::{NoiseField, NoiseParams};
