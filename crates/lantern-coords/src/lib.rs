//! Grid, chunk, and screen coordinate spaces for the isometric tile world.
//!
//! # Coordinate Spaces
//!
//! 1. **Grid space**: integer tile coordinates ([`TileCoord`]), unbounded.
//! 2. **Chunk space**: integer chunk coordinates ([`ChunkCoord`]); tile
//!    `(x, y)` belongs to chunk `(floor(x / n), floor(y / n))`.
//! 3. **Screen space**: isometric pixel anchors produced by [`IsoProjector`].
//!
//! ```rust
//! use lantern_coords::{ChunkCoord, IsoProjector, TileCoord};
//!
//! let tile = TileCoord::new(-1, 9);
//! assert_eq!(tile.chunk(8), ChunkCoord::new(-1, 1));
//!
//! let projector = IsoProjector::new(32, 4);
//! let screen = projector.cart_to_iso(3.0, 1.0);
//! let grid = projector.iso_to_cart(screen.x, screen.y);
//! assert!((grid.x - 3.0).abs() < 1e-9 && (grid.y - 1.0).abs() < 1e-9);
//! ```

mod grid;
mod projection;

pub use glam::DVec2;
pub use grid::{ChunkCoord, TileCoord};
pub use projection::IsoProjector;
