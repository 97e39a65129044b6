//! Software compositing of renderable entities onto an RGBA canvas with a
//! zoomable camera that follows the viewer.

mod cache;
mod camera;
mod error;

pub use cache::ScaledImageCache;
pub use camera::{Camera, CameraSettings, FrameStats};
pub use error::ViewError;
