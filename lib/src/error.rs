//! Error types for the rendering pipeline.

use std::path::PathBuf;

/// Errors produced while decoding, resampling or rendering an image.
#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    /// The image file could not be opened or decoded.
    #[error("failed to load image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A sample buffer could not be allocated.
    #[error("failed to allocate buffer of {samples} samples")]
    Allocation { samples: usize },

    /// A pixel coordinate lies outside the buffer.
    #[error("pixel ({x}, {y}) is out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A region query covers no pixels.
    #[error("empty region [{x1}, {x2}) x [{y1}, {y2})")]
    InvalidRegion {
        x1: usize,
        x2: usize,
        y1: usize,
        y2: usize,
    },

    /// Resizing would produce a grid with a zero dimension.
    #[error("resize to {width}x{height} grid is degenerate")]
    DegenerateResize { width: usize, height: usize },

    /// Channel count outside 1..=4.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// Sample slice length does not match the buffer geometry.
    #[error("expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },

    /// A normalized sample lies outside `[0, 1]`.
    #[error("sample {0} is outside [0, 1]")]
    SampleRange(f64),

    /// A pixel write supplied the wrong number of channel values.
    #[error("expected {expected} channel values, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// Render configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AsciiError>;
