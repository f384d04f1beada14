//! ASCII TTY - terminal image to ASCII art renderer
//!
//! This library fits an image to a character grid by area averaging, picks a
//! glyph per cell from its grayscale density (or a directional glyph where a
//! Sobel edge is found), and writes truecolor or 8-color ANSI sequences.
//! A rainbow mode repaints the grid in place while rotating every hue.
//!
//! # Example
//! ```no_run
//! use ascii_tty::{PixelBuffer, RenderConfig, render_to_string};
//!
//! let image = PixelBuffer::open("photo.jpg").unwrap();
//! let config = RenderConfig {
//!     edge_threshold: 1.5,
//!     ..Default::default()
//! };
//! print!("{}", render_to_string(&image, &config).unwrap());
//! ```

pub mod animation;
pub mod ascii;
pub mod buffer;
pub mod color;
pub mod config;
pub mod edges;
pub mod error;
pub mod lut;
pub mod processor;
pub mod resize;
pub mod terminal;

// Re-export main types for convenience
pub use buffer::PixelBuffer;
pub use config::RenderConfig;
pub use error::{AsciiError, Result};
pub use processor::{present, process_image, render_frame, render_to_string};
