//! Terrain classifier: world coordinate -> noise -> biome -> tile type.
//!
//! Every answer is a pure function of the coordinate and the immutable
//! [`TerrainConfig`]. Chunk seams rely on this: a cell that is not
//! materialized can be re-derived and will match what loading it would give.

use hashbrown::HashMap;
use lantern_config::TerrainSection;
use lantern_coords::TileCoord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Biome, NoiseField, NoiseParams, TerrainError, TileType};

/// Half-width of the range noise offsets are drawn from.
const OFFSET_RANGE: i32 = 10_000;

/// Returns `seed`, or a freshly drawn random seed when absent.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Immutable terrain parameters shared by every chunk.
#[derive(Clone, Debug)]
pub struct TerrainConfig {
    /// Noise parameters, offsets resolved.
    pub noise: NoiseParams,
    /// `(biome, exclusive upper bound)`, strictly ascending.
    pub thresholds: Vec<(Biome, f64)>,
    /// Biome -> tile type. May map several biomes to one tile type.
    pub tiles: HashMap<Biome, TileType>,
    /// Biomes whose cells hold no solid tile.
    pub open_biomes: Vec<Biome>,
}

impl TerrainConfig {
    /// Build from the configuration file section and a resolved seed.
    ///
    /// Offsets missing from the section are derived from the seed, so the
    /// seed alone reproduces the world.
    pub fn from_section(section: &TerrainSection, seed: u64) -> Result<Self, TerrainError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let derived_x = f64::from(rng.random_range(-OFFSET_RANGE..=OFFSET_RANGE));
        let derived_y = f64::from(rng.random_range(-OFFSET_RANGE..=OFFSET_RANGE));

        let thresholds = section
            .thresholds
            .iter()
            .map(|t| Ok((t.biome.parse::<Biome>()?, t.below)))
            .collect::<Result<Vec<_>, TerrainError>>()?;

        let tiles = section
            .biome_tiles
            .iter()
            .map(|(biome, tile)| Ok((biome.parse::<Biome>()?, TileType::new(tile))))
            .collect::<Result<HashMap<_, _>, TerrainError>>()?;

        let open_biomes = section
            .open_biomes
            .iter()
            .map(|b| b.parse::<Biome>())
            .collect::<Result<Vec<_>, _>>()?;

        let config = Self {
            noise: NoiseParams {
                seed,
                octaves: section.octaves,
                persistence: section.persistence,
                lacunarity: section.lacunarity,
                scale: section.scale,
                offset_x: section.offset_x.unwrap_or(derived_x),
                offset_y: section.offset_y.unwrap_or(derived_y),
            },
            thresholds,
            tiles,
            open_biomes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check noise ranges and biome tables.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let n = &self.noise;
        if n.octaves == 0 {
            return Err(TerrainError::InvalidNoise("octaves must be at least 1".into()));
        }
        for (name, value) in [
            ("scale", n.scale),
            ("persistence", n.persistence),
            ("lacunarity", n.lacunarity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::InvalidNoise(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !n.offset_x.is_finite() || !n.offset_y.is_finite() {
            return Err(TerrainError::InvalidNoise("offsets must be finite".into()));
        }

        if self.thresholds.is_empty() {
            return Err(TerrainError::EmptyThresholds);
        }
        for pair in self.thresholds.windows(2) {
            let ((prev, prev_value), (next, next_value)) = (pair[0], pair[1]);
            if next_value.is_nan() || prev_value.is_nan() || next_value <= prev_value {
                return Err(TerrainError::UnorderedThresholds {
                    prev,
                    prev_value,
                    next,
                    next_value,
                });
            }
        }
        for (i, (biome, _)) in self.thresholds.iter().enumerate() {
            if self.thresholds[..i].iter().any(|(b, _)| b == biome) {
                return Err(TerrainError::DuplicateBiome(*biome));
            }
            if !self.tiles.contains_key(biome) {
                return Err(TerrainError::UnmappedBiome(*biome));
            }
        }
        Ok(())
    }
}

/// Answers "what is at this cell" for any world coordinate.
pub struct TerrainClassifier {
    field: NoiseField,
    config: TerrainConfig,
}

impl TerrainClassifier {
    /// Validate `config` and build the classifier.
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        tracing::info!(
            seed = config.noise.seed,
            octaves = config.noise.octaves,
            offset_x = config.noise.offset_x,
            offset_y = config.noise.offset_y,
            "terrain classifier ready"
        );
        Ok(Self {
            field: NoiseField::new(config.noise.clone()),
            config,
        })
    }

    /// The configuration this classifier was built from.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// World seed.
    pub fn seed(&self) -> u64 {
        self.config.noise.seed
    }

    /// Normalized noise in `[-1, 1]` at a tile.
    pub fn noise_at(&self, tile: TileCoord) -> f64 {
        self.field.sample(f64::from(tile.x), f64::from(tile.y))
    }

    /// Biome bucket for a noise value.
    ///
    /// The first bucket whose bound the value is strictly below wins;
    /// values at or above every bound fall into the last bucket.
    pub fn classify(&self, value: f64) -> Biome {
        self.config
            .thresholds
            .iter()
            .find(|(_, below)| value < *below)
            .or_else(|| self.config.thresholds.last())
            .map(|(biome, _)| *biome)
            .unwrap_or(Biome::Snow)
    }

    /// Biome at a tile.
    pub fn biome_at(&self, tile: TileCoord) -> Biome {
        self.classify(self.noise_at(tile))
    }

    /// Tile type at a tile.
    pub fn tile_type_at(&self, tile: TileCoord) -> TileType {
        self.tile_type_for(self.biome_at(tile))
    }

    /// Tile type for a biome. Validation guarantees every reachable biome
    /// is mapped; the fallback only covers an unreachable one.
    pub fn tile_type_for(&self, biome: Biome) -> TileType {
        match self.config.tiles.get(&biome) {
            Some(tile) => tile.clone(),
            None => {
                let (first, _) = self.config.thresholds[0];
                self.config.tiles[&first].clone()
            }
        }
    }

    /// Whether a biome holds a solid tile.
    pub fn is_solid(&self, biome: Biome) -> bool {
        !self.config.open_biomes.contains(&biome)
    }

    /// Whether a solid tile occupies the cell at `tile`.
    ///
    /// This is the single predicate behind both chunk generation and the
    /// seam prediction for cells whose chunk is not loaded.
    pub fn tile_exists_at(&self, tile: TileCoord) -> bool {
        self.is_solid(self.biome_at(tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_config::BiomeThreshold;

    fn classifier(seed: u64) -> TerrainClassifier {
        let config = TerrainConfig::from_section(&TerrainSection::default(), seed).unwrap();
        TerrainClassifier::new(config).unwrap()
    }

    fn section_with(thresholds: &[(&str, f64)]) -> TerrainSection {
        TerrainSection {
            thresholds: thresholds
                .iter()
                .map(|(b, v)| BiomeThreshold {
                    biome: b.to_string(),
                    below: *v,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tile_type_deterministic_across_calls_and_instances() {
        let a = classifier(42);
        let b = classifier(42);
        for x in (-300..300).step_by(11) {
            for y in (-300..300).step_by(13) {
                let t = TileCoord::new(x, y);
                let first = a.tile_type_at(t);
                assert_eq!(first, a.tile_type_at(t));
                assert_eq!(first, b.tile_type_at(t));
            }
        }
    }

    #[test]
    fn test_call_order_does_not_matter() {
        let c = classifier(9);
        let coords: Vec<TileCoord> = (0..64).map(|i| TileCoord::new(i * 3, -i)).collect();
        let forward: Vec<_> = coords.iter().map(|&t| c.biome_at(t)).collect();
        let mut backward: Vec<_> = coords.iter().rev().map(|&t| c.biome_at(t)).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_offsets_derived_from_seed() {
        let a = TerrainConfig::from_section(&TerrainSection::default(), 42).unwrap();
        let b = TerrainConfig::from_section(&TerrainSection::default(), 42).unwrap();
        assert_eq!(a.noise.offset_x, b.noise.offset_x);
        assert_eq!(a.noise.offset_y, b.noise.offset_y);
        assert!(a.noise.offset_x.abs() <= 10_000.0);
    }

    #[test]
    fn test_explicit_offsets_win() {
        let section = TerrainSection {
            offset_x: Some(5.0),
            offset_y: Some(-5.0),
            ..Default::default()
        };
        let config = TerrainConfig::from_section(&section, 1).unwrap();
        assert_eq!(config.noise.offset_x, 5.0);
        assert_eq!(config.noise.offset_y, -5.0);
    }

    #[test]
    fn test_classify_buckets() {
        let c = classifier(1);
        assert_eq!(c.classify(-0.9), Biome::DeepWater);
        assert_eq!(c.classify(-0.6), Biome::ShallowWater);
        assert_eq!(c.classify(-0.2), Biome::Sand);
        assert_eq!(c.classify(0.0), Biome::Grass);
        assert_eq!(c.classify(0.5), Biome::Forest);
        assert_eq!(c.classify(0.7), Biome::Mountain);
        assert_eq!(c.classify(0.95), Biome::Snow);
        assert_eq!(c.classify(1.0), Biome::Snow);
    }

    #[test]
    fn test_table_collapses_biomes() {
        let c = classifier(1);
        assert_eq!(c.tile_type_for(Biome::Grass).as_str(), "grass_block");
        assert_eq!(c.tile_type_for(Biome::Forest).as_str(), "grass_block");
        assert_eq!(c.tile_type_for(Biome::Snow).as_str(), "red_grass_block");
    }

    #[test]
    fn test_water_is_not_solid() {
        let c = classifier(1);
        assert!(!c.is_solid(Biome::DeepWater));
        assert!(!c.is_solid(Biome::ShallowWater));
        assert!(c.is_solid(Biome::Grass));
        assert!(c.is_solid(Biome::Sand));
    }

    #[test]
    fn test_tile_exists_matches_biome() {
        let c = classifier(42);
        for x in (-500..500).step_by(17) {
            let t = TileCoord::new(x, 3 * x);
            assert_eq!(c.tile_exists_at(t), c.is_solid(c.biome_at(t)));
        }
    }

    #[test]
    fn test_unmapped_biome_is_fatal() {
        let mut section = TerrainSection::default();
        section.biome_tiles.remove("mountain");
        let err = TerrainConfig::from_section(&section, 1).unwrap_err();
        assert!(matches!(err, TerrainError::UnmappedBiome(Biome::Mountain)));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let section = section_with(&[("sand", 0.2), ("grass", 0.1)]);
        let err = TerrainConfig::from_section(&section, 1).unwrap_err();
        assert!(matches!(err, TerrainError::UnorderedThresholds { .. }));
    }

    #[test]
    fn test_duplicate_biome_rejected() {
        let section = section_with(&[("sand", 0.0), ("grass", 0.5), ("sand", 1.0)]);
        let err = TerrainConfig::from_section(&section, 1).unwrap_err();
        assert!(matches!(err, TerrainError::DuplicateBiome(Biome::Sand)));
    }

    #[test]
    fn test_empty_thresholds_rejected() {
        let section = section_with(&[]);
        assert!(matches!(
            TerrainConfig::from_section(&section, 1).unwrap_err(),
            TerrainError::EmptyThresholds
        ));
    }

    #[test]
    fn test_unknown_biome_name_rejected() {
        let section = section_with(&[("swamp", 0.0)]);
        assert!(matches!(
            TerrainConfig::from_section(&section, 1).unwrap_err(),
            TerrainError::UnknownBiome(_)
        ));
    }

    #[test]
    fn test_bad_noise_parameters_rejected() {
        for section in [
            TerrainSection {
                octaves: 0,
                ..Default::default()
            },
            TerrainSection {
                scale: 0.0,
                ..Default::default()
            },
            TerrainSection {
                lacunarity: -2.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                TerrainConfig::from_section(&section, 1).unwrap_err(),
                TerrainError::InvalidNoise(_)
            ));
        }
    }

    #[test]
    fn test_partial_table_only_needs_reachable_biomes() {
        let section = section_with(&[("deep_water", 0.0), ("grass", 1.0)]);
        let c = TerrainClassifier::new(TerrainConfig::from_section(&section, 5).unwrap()).unwrap();
        assert_eq!(c.classify(-0.5), Biome::DeepWater);
        assert_eq!(c.classify(0.5), Biome::Grass);
    }
}
