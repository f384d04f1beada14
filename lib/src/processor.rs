use crate::animation::animate;
use crate::ascii::{CellGrid, LineEnding};
use crate::buffer::PixelBuffer;
use crate::color::to_grayscale;
use crate::config::RenderConfig;
use crate::edges::EdgeMap;
use crate::error::Result;
use crate::resize::resize_to_grid;
use std::io::Write;

/// Processes a decoded image into a grid of glyph cells
///
/// This implements the full pipeline:
/// 1. Box-filter the image down to the character grid
/// 2. Derive a grayscale copy (luma, or value² for color)
/// 3. Sobel edge detection, skipped when the threshold disables it
/// 4. Select a glyph and tint for every cell
///
/// # Arguments
/// * `source` - The decoded full-resolution image
/// * `config` - Configuration parameters for the conversion
///
/// # Returns
/// The cell grid, ready to be drawn once or animated
pub fn process_image(source: &PixelBuffer, config: &RenderConfig) -> Result<CellGrid> {
    config.validate()?;

    // Step 1: Resize to the character grid
    let resized = resize_to_grid(
        source,
        config.max_width,
        config.max_height,
        config.character_ratio,
    )?;

    // Step 2: Grayscale copy for the gradient
    let gray = to_grayscale(&resized)?;

    // Step 3: Edge detection
    let edges = EdgeMap::detect(&gray, config.edge_threshold);

    // Step 4: Glyph and tint selection
    Ok(CellGrid::from_buffer(&resized, edges.as_ref()))
}

/// Render a single frame to `out`
pub fn render_frame<W: Write>(source: &PixelBuffer, config: &RenderConfig, out: &mut W) -> Result<()> {
    let grid = process_image(source, config)?;
    grid.write_frame(out, config.color_mode(), LineEnding::Lf)?;
    out.flush()?;
    Ok(())
}

/// Render a single frame into a string
pub fn render_to_string(source: &PixelBuffer, config: &RenderConfig) -> Result<String> {
    let mut out = Vec::new();
    render_frame(source, config, &mut out)?;
    // Every byte written is ASCII glyphs or escape sequences
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Render once to stdout, or animate when `use_rainbow` is set
pub fn present(source: &PixelBuffer, config: &RenderConfig) -> Result<()> {
    if config.use_rainbow {
        let grid = process_image(source, config)?;
        animate(grid, config.color_mode())
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        render_frame(source, config, &mut out)
    }
}
