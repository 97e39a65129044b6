//! Chunked tile world: generation, face visibility across chunk seams, and
//! streaming around a moving viewer.

mod chunk;
mod entity;
mod error;
mod face;
pub mod layer;
mod manager;
mod tile;

pub use chunk::{Chunk, NeighborLookup};
pub use entity::{EntityKind, RenderableEntity};
pub use error::WorldError;
pub use face::{Face, FaceRenderer};
pub use manager::{ChunkManager, LoadedNeighbors, StreamReport, WorldSettings};
pub use tile::{FaceSlots, Tile};
