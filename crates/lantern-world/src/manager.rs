//! Owns every loaded chunk and streams them around the viewer.
//!
//! The loaded set is always the Chebyshev square of radius
//! `render_distance` around the viewer's chunk. Streaming happens in one
//! synchronous pass inside [`ChunkManager::update`]:
//!
//! 1. new chunks are constructed, then generated border-first,
//! 2. faces are recomputed for every live chunk, including the ones about
//!    to leave, so seams are settled against a complete neighbourhood,
//! 3. chunks outside the square are unloaded and dropped.

use lantern_assets::FaceTextureSource;
use lantern_coords::{ChunkCoord, DVec2, IsoProjector, TileCoord};
use lantern_terrain::{TerrainClassifier, TileType};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Chunk, EntityKind, FaceRenderer, NeighborLookup, RenderableEntity, Tile, WorldError};

/// Streaming and projection parameters.
#[derive(Clone, Debug)]
pub struct WorldSettings {
    /// Tiles per chunk edge.
    pub chunk_size: u32,
    /// Chebyshev radius in chunks kept loaded around the viewer.
    pub render_distance: u32,
    pub base_texture_size: u32,
    pub texture_scale: u32,
    /// Tile type whose textures stand in for missing ones.
    pub fallback_tile_type: String,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            chunk_size: 8,
            render_distance: 3,
            base_texture_size: 32,
            texture_scale: 4,
            fallback_tile_type: "red_grass_block".to_string(),
        }
    }
}

/// Outcome of one [`ChunkManager::update`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub viewer_chunk: ChunkCoord,
    /// Newly loaded chunks, in generation order.
    pub loaded: Vec<ChunkCoord>,
    pub unloaded: Vec<ChunkCoord>,
}

impl StreamReport {
    /// True when the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Occupancy of cells outside a chunk: loaded, generated chunks answer from
/// their tiles, everything else from the terrain classifier.
pub struct LoadedNeighbors<'a> {
    chunks: &'a FxHashMap<ChunkCoord, Chunk>,
    terrain: &'a TerrainClassifier,
    chunk_size: u32,
}

impl<'a> LoadedNeighbors<'a> {
    pub fn new(
        chunks: &'a FxHashMap<ChunkCoord, Chunk>,
        terrain: &'a TerrainClassifier,
        chunk_size: u32,
    ) -> Self {
        Self {
            chunks,
            terrain,
            chunk_size,
        }
    }
}

impl NeighborLookup for LoadedNeighbors<'_> {
    fn occupied(&self, coord: TileCoord) -> bool {
        self.chunks
            .get(&coord.chunk(self.chunk_size))
            .filter(|chunk| chunk.is_generated())
            .and_then(|chunk| chunk.tile_at(coord))
            .map_or_else(|| self.terrain.tile_exists_at(coord), |tile| tile.solid)
    }
}

/// The single authority for which chunks exist.
pub struct ChunkManager {
    terrain: TerrainClassifier,
    projector: IsoProjector,
    faces: FaceRenderer,
    render_distance: u32,
    chunk_size: u32,
    chunks: FxHashMap<ChunkCoord, Chunk>,
    viewer_chunk: Option<ChunkCoord>,
    viewer_grid: DVec2,
}

impl ChunkManager {
    /// Creates an empty manager. Nothing is loaded until the first update.
    pub fn new(
        settings: WorldSettings,
        terrain: TerrainClassifier,
        textures: Box<dyn FaceTextureSource>,
    ) -> Result<Self, WorldError> {
        if settings.chunk_size == 0 {
            return Err(WorldError::InvalidChunkSize);
        }
        if settings.render_distance == 0 {
            return Err(WorldError::InvalidRenderDistance);
        }
        let tile_px = u64::from(settings.base_texture_size) * u64::from(settings.texture_scale);
        if !(4..=u64::from(u16::MAX)).contains(&tile_px) {
            return Err(WorldError::InvalidTileSize(tile_px));
        }
        tracing::info!(
            chunk_size = settings.chunk_size,
            render_distance = settings.render_distance,
            tile_px,
            "chunk manager ready"
        );
        Ok(Self {
            terrain,
            projector: IsoProjector::new(settings.base_texture_size, settings.texture_scale),
            faces: FaceRenderer::new(textures, TileType::new(&settings.fallback_tile_type)),
            render_distance: settings.render_distance,
            chunk_size: settings.chunk_size,
            chunks: FxHashMap::default(),
            viewer_chunk: None,
            viewer_grid: DVec2::ZERO,
        })
    }

    /// Streams chunks for a viewer at `viewer` (screen space).
    ///
    /// Returns an empty report when the viewer has not left its chunk.
    pub fn update(&mut self, viewer: DVec2) -> StreamReport {
        let grid = self.projector.iso_to_cart(viewer.x, viewer.y);
        self.viewer_grid = grid;
        let center = TileCoord::from_grid(grid).chunk(self.chunk_size);

        if self.viewer_chunk == Some(center) {
            return StreamReport {
                viewer_chunk: center,
                ..Default::default()
            };
        }
        self.viewer_chunk = Some(center);

        let target: FxHashSet<ChunkCoord> = center.square(self.render_distance).collect();

        let mut unloaded: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| !target.contains(coord))
            .copied()
            .collect();
        unloaded.sort_unstable();

        let mut loaded: Vec<ChunkCoord> = center
            .square(self.render_distance)
            .filter(|coord| !self.chunks.contains_key(coord))
            .collect();
        // Border chunks (touching something already live) first, then the
        // interior; ties by distance to the viewer, then by coordinate.
        loaded.sort_by_cached_key(|coord| {
            let border = coord.neighbors8().any(|n| self.chunks.contains_key(&n));
            (!border, coord.chebyshev(center), *coord)
        });

        for &coord in &loaded {
            self.chunks.insert(coord, Chunk::new(coord, self.chunk_size));
        }
        for coord in &loaded {
            if let Some(chunk) = self.chunks.get_mut(coord) {
                chunk.generate(&self.terrain, &self.projector);
            }
        }

        self.refresh_faces();

        for coord in &unloaded {
            if let Some(mut chunk) = self.chunks.remove(coord) {
                chunk.unload();
            }
        }

        tracing::debug!(
            viewer = %center,
            loaded = loaded.len(),
            unloaded = unloaded.len(),
            live = self.chunks.len(),
            "streamed chunks"
        );

        StreamReport {
            viewer_chunk: center,
            loaded,
            unloaded,
        }
    }

    /// Recomputes faces for every live chunk against its current neighbours.
    fn refresh_faces(&mut self) {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_unstable();
        for coord in coords {
            let Some(mut chunk) = self.chunks.remove(&coord) else {
                continue;
            };
            let neighbors = LoadedNeighbors::new(&self.chunks, &self.terrain, self.chunk_size);
            chunk.compute_faces(&neighbors, &mut self.faces);
            self.chunks.insert(coord, chunk);
        }
    }

    /// The tile at `coord`, if its chunk is loaded.
    pub fn get_tile_at(&self, coord: TileCoord) -> Option<&Tile> {
        self.chunks
            .get(&coord.chunk(self.chunk_size))
            .and_then(|chunk| chunk.tile_at(coord))
    }

    /// Every tile and face of every loaded chunk, back to front.
    pub fn renderables(&self) -> impl Iterator<Item = RenderableEntity> + '_ {
        let mut tiles: Vec<&Tile> = self.chunks.values().flat_map(Chunk::tiles).collect();
        tiles.sort_unstable_by_key(|t| (t.coord.x + t.coord.y, t.coord.x));

        tiles.into_iter().flat_map(|tile| {
            let base = RenderableEntity {
                position: tile.anchor,
                image: None,
                layer: tile.layer,
                kind: EntityKind::Tile {
                    coord: tile.coord,
                    tile_type: tile.tile_type.clone(),
                },
            };
            let faces = tile.faces().iter().map(|face| RenderableEntity {
                position: face.anchor,
                image: face.image.clone(),
                layer: face.layer,
                kind: EntityKind::Face {
                    tile: face.tile,
                    kind: face.kind,
                },
            });
            std::iter::once(base).chain(faces)
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Tile count per loaded chunk, sorted by coordinate.
    pub fn tile_counts(&self) -> Vec<(ChunkCoord, usize)> {
        let mut counts: Vec<_> = self
            .chunks
            .iter()
            .map(|(coord, chunk)| (*coord, chunk.tile_count()))
            .collect();
        counts.sort_unstable();
        counts
    }

    /// Loaded chunk coordinates, sorted.
    pub fn loaded_chunks(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.chunks.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Chunk of the last update, `None` before the first.
    pub fn viewer_chunk(&self) -> Option<ChunkCoord> {
        self.viewer_chunk
    }

    /// Continuous grid position of the last update.
    pub fn viewer_grid_position(&self) -> DVec2 {
        self.viewer_grid
    }

    pub fn terrain(&self) -> &TerrainClassifier {
        &self.terrain
    }

    pub fn projector(&self) -> &IsoProjector {
        &self.projector
    }

    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Distinct `(tile type, face)` pairs rendered with a fallback texture.
    pub fn missing_textures(&self) -> usize {
        self.faces.missing_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_assets::TextureLibrary;
    use lantern_config::TerrainSection;
    use lantern_terrain::TerrainConfig;

    fn manager(chunk_size: u32, render_distance: u32) -> ChunkManager {
        let terrain =
            TerrainClassifier::new(TerrainConfig::from_section(&TerrainSection::default(), 42).unwrap())
                .unwrap();
        let settings = WorldSettings {
            chunk_size,
            render_distance,
            ..Default::default()
        };
        ChunkManager::new(settings, terrain, Box::new(TextureLibrary::new())).unwrap()
    }

    fn screen_of(m: &ChunkManager, x: f64, y: f64) -> DVec2 {
        m.projector().cart_to_iso(x, y)
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let terrain =
            TerrainClassifier::new(TerrainConfig::from_section(&TerrainSection::default(), 1).unwrap())
                .unwrap();
        let settings = WorldSettings {
            chunk_size: 0,
            ..Default::default()
        };
        let result = ChunkManager::new(settings, terrain, Box::new(TextureLibrary::new()));
        assert!(matches!(result, Err(WorldError::InvalidChunkSize)));
    }

    #[test]
    fn test_zero_render_distance_rejected() {
        let terrain =
            TerrainClassifier::new(TerrainConfig::from_section(&TerrainSection::default(), 1).unwrap())
                .unwrap();
        let settings = WorldSettings {
            render_distance: 0,
            ..Default::default()
        };
        let result = ChunkManager::new(settings, terrain, Box::new(TextureLibrary::new()));
        assert!(matches!(result, Err(WorldError::InvalidRenderDistance)));
    }

    #[test]
    fn test_tile_size_out_of_range_rejected() {
        for (base, scale, px) in [(1, 2, 2), (70_000, 70_000, 4_900_000_000), (512, 256, 131_072)] {
            let terrain = TerrainClassifier::new(
                TerrainConfig::from_section(&TerrainSection::default(), 1).unwrap(),
            )
            .unwrap();
            let settings = WorldSettings {
                base_texture_size: base,
                texture_scale: scale,
                ..Default::default()
            };
            let result = ChunkManager::new(settings, terrain, Box::new(TextureLibrary::new()));
            assert!(
                matches!(result, Err(WorldError::InvalidTileSize(n)) if n == px),
                "{base}x{scale} accepted"
            );
        }
    }

    #[test]
    fn test_first_update_loads_square() {
        let mut m = manager(8, 2);
        assert_eq!(m.chunk_count(), 0);
        assert!(m.viewer_chunk().is_none());

        let report = m.update(DVec2::ZERO);
        assert_eq!(report.loaded.len(), 25);
        assert!(report.unloaded.is_empty());
        assert_eq!(m.chunk_count(), 25);
        assert_eq!(m.viewer_chunk(), Some(ChunkCoord::new(0, 0)));
        // Nothing was live before, so generation is closest-first.
        assert_eq!(report.loaded[0], ChunkCoord::new(0, 0));
    }

    #[test]
    fn test_same_chunk_short_circuits() {
        let mut m = manager(8, 1);
        m.update(screen_of(&m, 1.0, 1.0));
        let report = m.update(screen_of(&m, 6.5, 7.5));
        assert!(report.is_empty());
        assert_eq!(report.viewer_chunk, ChunkCoord::new(0, 0));
        assert!((m.viewer_grid_position() - DVec2::new(6.5, 7.5)).length() < 1e-9);
    }

    #[test]
    fn test_negative_position_floors() {
        let mut m = manager(8, 1);
        m.update(screen_of(&m, -0.5, 0.25));
        assert_eq!(m.viewer_chunk(), Some(ChunkCoord::new(-1, 0)));
        let loaded = m.loaded_chunks();
        assert_eq!(loaded.len(), 9);
        assert_eq!(loaded.first(), Some(&ChunkCoord::new(-2, -1)));
        assert_eq!(loaded.last(), Some(&ChunkCoord::new(0, 1)));
    }

    #[test]
    fn test_new_chunks_border_first() {
        let mut m = manager(4, 1);
        m.update(DVec2::ZERO);
        // Jump two chunks east: (1, *) survives, (2, *) touches it, (3, *) does not.
        let report = m.update(screen_of(&m, 8.0, 0.0));
        assert_eq!(report.viewer_chunk, ChunkCoord::new(2, 0));
        let border: Vec<_> = report.loaded.iter().take(3).map(|c| c.x).collect();
        assert_eq!(border, [2, 2, 2]);
        assert!(report.loaded[3..].iter().all(|c| c.x == 3));
    }

    #[test]
    fn test_tile_counts_and_lookup() {
        let mut m = manager(8, 1);
        m.update(DVec2::ZERO);
        assert!(m.tile_counts().iter().all(|&(_, n)| n == 64));

        let tile = m.get_tile_at(TileCoord::new(-3, 5)).unwrap();
        assert_eq!(tile.coord, TileCoord::new(-3, 5));
        assert!(m.get_tile_at(TileCoord::new(100, 0)).is_none());
    }

    #[test]
    fn test_renderables_cover_tiles_and_faces() {
        let mut m = manager(4, 1);
        m.update(DVec2::ZERO);
        let expected: usize = m
            .loaded_chunks()
            .into_iter()
            .filter_map(|coord| m.chunk(coord))
            .map(|chunk| chunk.tile_count() + chunk.face_count())
            .sum();

        let entities: Vec<_> = m.renderables().collect();
        assert_eq!(entities.len(), expected);
        let tiles = entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Tile { .. }))
            .count();
        assert_eq!(tiles, 9 * 16);
        assert!(
            entities
                .iter()
                .filter(|e| matches!(e.kind, EntityKind::Tile { .. }))
                .all(|e| e.image.is_none())
        );
    }
}
