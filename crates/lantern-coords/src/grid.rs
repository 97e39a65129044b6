//! Integer tile and chunk coordinates with floor-division ownership.

use std::fmt;

use glam::DVec2;
use serde::Serialize;

/// A tile position on the unbounded world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct TileCoord {
    /// Grid X (east is +X).
    pub x: i32,
    /// Grid Y (south is +Y).
    pub y: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floors a continuous grid position to the tile containing it.
    pub fn from_grid(pos: DVec2) -> Self {
        Self::new(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Returns the tile offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The neighbor whose absence exposes this tile's right face.
    pub const fn east(self) -> Self {
        self.offset(1, 0)
    }

    /// The neighbor whose absence exposes this tile's left face.
    pub const fn south(self) -> Self {
        self.offset(0, 1)
    }

    /// The chunk that owns this tile for chunks of edge length `chunk_size`.
    ///
    /// Uses floor division so that negative coordinates land in negative
    /// chunks: `-1` belongs to chunk `-1`, not chunk `0`.
    pub fn chunk(self, chunk_size: u32) -> ChunkCoord {
        let n = chunk_size as i32;
        ChunkCoord::new(self.x.div_euclid(n), self.y.div_euclid(n))
    }

    /// Position of this tile relative to its chunk origin, in `0..chunk_size`.
    pub fn local(self, chunk_size: u32) -> (u32, u32) {
        let n = chunk_size as i32;
        (self.x.rem_euclid(n) as u32, self.y.rem_euclid(n) as u32)
    }

    /// The tile as a continuous grid position.
    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A chunk position in chunk units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct ChunkCoord {
    /// Chunk X.
    pub x: i32,
    /// Chunk Y.
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the chunk offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The lowest tile coordinate owned by this chunk.
    pub fn origin(self, chunk_size: u32) -> TileCoord {
        let n = chunk_size as i32;
        TileCoord::new(self.x * n, self.y * n)
    }

    /// Whether `tile` belongs to this chunk.
    pub fn contains(self, tile: TileCoord, chunk_size: u32) -> bool {
        tile.chunk(chunk_size) == self
    }

    /// Chebyshev (chessboard) distance in chunk units.
    pub fn chebyshev(self, other: ChunkCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// All tiles owned by this chunk, row by row.
    pub fn tiles(self, chunk_size: u32) -> impl Iterator<Item = TileCoord> {
        let origin = self.origin(chunk_size);
        let n = chunk_size as i32;
        (0..n).flat_map(move |ly| (0..n).map(move |lx| origin.offset(lx, ly)))
    }

    /// The eight chunks sharing an edge or corner with this one.
    pub fn neighbors8(self) -> impl Iterator<Item = ChunkCoord> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Every chunk within Chebyshev distance `radius` of this one, row by row.
    pub fn square(self, radius: u32) -> impl Iterator<Item = ChunkCoord> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dy| (-r..=r).map(move |dx| self.offset(dx, dy)))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
