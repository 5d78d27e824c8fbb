//! Error types for heatmap rendering.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap rendering operations.
///
/// A render is a pure deterministic computation, so none of these are
/// retried internally; they all surface synchronously to the caller.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(
        "Background size mismatch: canvas is {expected_width}x{expected_height}, \
         background is {actual_width}x{actual_height}"
    )]
    BackgroundSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Failed to decode background image: {0}")]
    DecodeFailure(String),

    #[error("Failed to encode output image: {0}")]
    EncodeFailure(String),

    #[error("Unknown color scale: {0}")]
    UnknownColorScale(String),
}
