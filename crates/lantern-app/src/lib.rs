//! Lantern application: configuration, texture setup and the headless
//! session that walks a viewer through the world.

mod debug;
mod error;
pub mod game_loop;
pub mod platform;
mod session;
mod textures;

pub use debug::{ChunkTiles, DebugSnapshot};
pub use error::AppError;
pub use platform::PlatformDirs;
pub use session::{ScriptedWalk, Session};
pub use textures::build_textures;
