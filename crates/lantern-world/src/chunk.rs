//! Fixed-size square chunk of tiles.
//!
//! A chunk is either unloaded (no tiles) or generated (all N x N owned
//! tiles present). Faces are computed separately, after every chunk of a
//! streaming pass is generated, because side faces depend on tiles across
//! the seam.

use lantern_assets::FaceKind;
use lantern_coords::{ChunkCoord, IsoProjector, TileCoord};
use lantern_terrain::TerrainClassifier;

use crate::{FaceRenderer, Tile, layer};

/// Answers whether a solid tile occupies a cell outside the asking chunk.
pub trait NeighborLookup {
    fn occupied(&self, coord: TileCoord) -> bool;
}

impl<F: Fn(TileCoord) -> bool> NeighborLookup for F {
    fn occupied(&self, coord: TileCoord) -> bool {
        self(coord)
    }
}

/// A square block of `size` x `size` tiles.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    size: u32,
    /// Row-major by local coordinate once generated, empty otherwise.
    tiles: Vec<Tile>,
    generated: bool,
}

impl Chunk {
    /// An unloaded chunk.
    pub fn new(coord: ChunkCoord, size: u32) -> Self {
        Self {
            coord,
            size,
            tiles: Vec::new(),
            generated: false,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Materializes every owned tile. No-op when already generated.
    pub fn generate(&mut self, classifier: &TerrainClassifier, projector: &IsoProjector) {
        if self.generated {
            return;
        }
        self.tiles = self
            .coord
            .tiles(self.size)
            .map(|coord| {
                let biome = classifier.biome_at(coord);
                let solid = classifier.is_solid(biome);
                let anchor = projector.cart_to_iso(f64::from(coord.x), f64::from(coord.y));
                let layer = if solid { layer::GROUND } else { layer::WATER };
                Tile::new(coord, anchor, classifier.tile_type_for(biome), layer, solid)
            })
            .collect();
        self.generated = true;
    }

    /// Rebuilds every tile's faces.
    ///
    /// Every tile gets a top. Solid tiles also get a right face when the
    /// east cell is empty and a left face when the south cell is empty.
    /// Cells in this chunk are read from its own tiles; all others go to
    /// `neighbors`.
    pub fn compute_faces(&mut self, neighbors: &impl NeighborLookup, renderer: &mut FaceRenderer) {
        if !self.generated {
            return;
        }
        let exposed: Vec<(bool, bool)> = self
            .tiles
            .iter()
            .map(|tile| {
                if !tile.solid {
                    return (false, false);
                }
                let occupied = |c: TileCoord| match self.tile_at(c) {
                    Some(t) => t.solid,
                    None => neighbors.occupied(c),
                };
                (!occupied(tile.coord.east()), !occupied(tile.coord.south()))
            })
            .collect();

        for (tile, (right, left)) in self.tiles.iter_mut().zip(exposed) {
            tile.clear_faces();
            renderer.create_face(tile, FaceKind::Top);
            if right {
                renderer.create_face(tile, FaceKind::Right);
            }
            if left {
                renderer.create_face(tile, FaceKind::Left);
            }
        }
    }

    /// Drops all tiles and faces.
    pub fn unload(&mut self) {
        self.tiles = Vec::new();
        self.generated = false;
    }

    pub fn tile_at(&self, coord: TileCoord) -> Option<&Tile> {
        if !self.coord.contains(coord, self.size) {
            return None;
        }
        let (lx, ly) = coord.local(self.size);
        self.tiles.get((ly * self.size + lx) as usize)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn face_count(&self) -> usize {
        self.tiles.iter().map(Tile::face_count).sum()
    }
}
