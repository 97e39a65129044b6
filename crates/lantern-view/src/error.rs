use thiserror::Error;

/// Errors raised when constructing a [`Camera`](crate::Camera).
#[derive(Debug, Error)]
pub enum ViewError {
    /// Zoom bounds must satisfy `0 < min <= max`.
    #[error("invalid zoom bounds: min {min}, max {max}")]
    ZoomBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Zoom step must be positive.
    #[error("zoom step must be positive, got {0}")]
    ZoomStep(f64),

    /// Screen has a zero dimension.
    #[error("screen size {width}x{height} has a zero dimension")]
    ScreenSize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}
