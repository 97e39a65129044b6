//! Face textures: face kinds, shared image handles, the lookup trait the
//! world renders through, and a PNG-backed library implementing it.

mod error;
mod face;
mod library;

pub use error::AssetError;
pub use face::{FaceKind, FaceTextureSource, ImageHandle, ImageId};
pub use library::TextureLibrary;
