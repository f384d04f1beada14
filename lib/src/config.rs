//! Render configuration and its validation.

use crate::color::ColorMode;
use crate::edges::MAX_EDGE_THRESHOLD;
use crate::error::{AsciiError, Result};

/// Default grid bounds used when no terminal size is known
pub const DEFAULT_MAX_WIDTH: usize = 64;
pub const DEFAULT_MAX_HEIGHT: usize = 48;
/// Glyph cells are roughly twice as tall as they are wide
pub const DEFAULT_CHARACTER_RATIO: f64 = 2.0;

/// Configuration for terminal ASCII rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Grid bounds in character cells
    pub max_width: usize,  // >= 1, default 64
    pub max_height: usize, // >= 1, default 48

    /// Height-to-width ratio of one glyph cell
    pub character_ratio: f64, // > 0, default 2.0

    /// Gradient magnitude at which a cell becomes an edge
    pub edge_threshold: f64, // 0.0-4.0, default 4.0 (disabled)

    /// Colors
    pub use_retro_colors: bool, // 8-color palette, default false

    /// Animate with rotating hue instead of printing one frame
    pub use_rainbow: bool, // default false
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            // Grid
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            character_ratio: DEFAULT_CHARACTER_RATIO,

            // Edge detection
            edge_threshold: MAX_EDGE_THRESHOLD,

            // Colors
            use_retro_colors: false,
            use_rainbow: false,
        }
    }
}

impl RenderConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(AsciiError::InvalidConfig(format!(
                "grid bounds must be at least 1x1, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        if !self.character_ratio.is_finite() || self.character_ratio <= 0.0 {
            return Err(AsciiError::InvalidConfig(format!(
                "character_ratio must be positive, got {}",
                self.character_ratio
            )));
        }
        if !(0.0..=MAX_EDGE_THRESHOLD).contains(&self.edge_threshold) {
            return Err(AsciiError::InvalidConfig(format!(
                "edge_threshold must be between 0.0 and {MAX_EDGE_THRESHOLD:.1}, got {}",
                self.edge_threshold
            )));
        }
        Ok(())
    }

    /// Palette selected by `use_retro_colors`
    pub fn color_mode(&self) -> ColorMode {
        if self.use_retro_colors {
            ColorMode::Retro
        } else {
            ColorMode::Truecolor
        }
    }

    /// Whether the Sobel pass runs at all
    pub fn edges_enabled(&self) -> bool {
        self.edge_threshold < MAX_EDGE_THRESHOLD
    }
}
