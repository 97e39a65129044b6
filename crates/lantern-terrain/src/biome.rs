//! Biome labels and tile types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::TerrainError;

/// A biome bucket, in ascending noise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    DeepWater,
    ShallowWater,
    Sand,
    Grass,
    Forest,
    Mountain,
    Snow,
}

impl Biome {
    /// Every biome, lowest noise first.
    pub const ALL: [Biome; 7] = [
        Biome::DeepWater,
        Biome::ShallowWater,
        Biome::Sand,
        Biome::Grass,
        Biome::Forest,
        Biome::Mountain,
        Biome::Snow,
    ];

    /// The label used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Biome::DeepWater => "deep_water",
            Biome::ShallowWater => "shallow_water",
            Biome::Sand => "sand",
            Biome::Grass => "grass",
            Biome::Forest => "forest",
            Biome::Mountain => "mountain",
            Biome::Snow => "snow",
        }
    }
}

impl FromStr for Biome {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Biome::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| TerrainError::UnknownBiome(s.to_string()))
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a renderable tile set, e.g. `grass_block`.
///
/// Cheap to clone; every tile of a given type shares one allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileType(Arc<str>);

impl TileType {
    /// Creates a tile type from its name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The tile type name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
