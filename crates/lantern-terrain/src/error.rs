//! Terrain configuration errors.

use crate::Biome;

/// Errors raised while building a [`TerrainConfig`](crate::TerrainConfig).
///
/// All of them are fatal: terrain cannot be generated from a malformed table.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// A biome label that is not one of the known biomes.
    #[error("unknown biome name: {0:?}")]
    UnknownBiome(String),

    /// The threshold table is empty.
    #[error("biome threshold table is empty")]
    EmptyThresholds,

    /// Thresholds are not strictly ascending.
    #[error("biome thresholds must be strictly ascending: {prev} ({prev_value}) then {next} ({next_value})")]
    UnorderedThresholds {
        /// Earlier biome.
        prev: Biome,
        /// Its bound.
        prev_value: f64,
        /// Later biome.
        next: Biome,
        /// Its bound.
        next_value: f64,
    },

    /// The same biome appears in two buckets.
    #[error("biome {0} appears more than once in the threshold table")]
    DuplicateBiome(Biome),

    /// A reachable biome has no tile type.
    #[error("biome {0} has no tile type")]
    UnmappedBiome(Biome),

    /// A noise parameter is out of range.
    #[error("invalid noise parameter: {0}")]
    InvalidNoise(String),
}
