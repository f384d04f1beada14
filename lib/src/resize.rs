use crate::buffer::PixelBuffer;
use crate::error::{AsciiError, Result};

/// Compute the character grid an image should be fitted into
///
/// Terminal glyphs are taller than they are wide, so the source height is
/// divided by `character_ratio` before fitting.
///
/// # Arguments
/// * `src_width`, `src_height` - Source dimensions in pixels
/// * `max_width`, `max_height` - Grid bounds in characters
/// * `character_ratio` - Height-to-width ratio of one glyph cell
///
/// # Returns
/// `(width, height)` of the grid; width-constrained when the proposed height
/// fits, height-constrained otherwise
pub fn fit_dimensions(
    src_width: usize,
    src_height: usize,
    max_width: usize,
    max_height: usize,
    character_ratio: f64,
) -> Result<(usize, usize)> {
    if src_width == 0 || src_height == 0 {
        return Err(AsciiError::DegenerateResize {
            width: src_width,
            height: src_height,
        });
    }

    let (src_w, src_h) = (src_width as f64, src_height as f64);
    let proposed_height = (src_h * max_width as f64 / (character_ratio * src_w)).floor() as usize;

    let (width, height) = if proposed_height <= max_height {
        (max_width, proposed_height)
    } else {
        let width = (character_ratio * src_w * max_height as f64 / src_h).floor() as usize;
        (width.min(max_width), max_height)
    };

    if width == 0 || height == 0 {
        return Err(AsciiError::DegenerateResize { width, height });
    }
    Ok((width, height))
}

/// Source span `[start, end)` covered by output index `i`
///
/// Never empty: when the grid is wider than the source, neighbouring cells
/// share a source pixel instead of averaging nothing.
fn source_span(i: usize, src_len: usize, dst_len: usize) -> (usize, usize) {
    let start = i * src_len / dst_len;
    let end = ((i + 1) * src_len / dst_len).max(start + 1);
    (start, end)
}

/// Box-filter a buffer down to a character grid
///
/// Every output pixel is the per-channel mean of its source rectangle, so
/// shrinking photographic images does not alias. Channel count is preserved.
///
/// # Arguments
/// * `source` - Full-resolution buffer
/// * `max_width`, `max_height` - Grid bounds in characters
/// * `character_ratio` - Height-to-width ratio of one glyph cell
///
/// # Returns
/// A new buffer of exactly one pixel per character cell
pub fn resize_to_grid(
    source: &PixelBuffer,
    max_width: usize,
    max_height: usize,
    character_ratio: f64,
) -> Result<PixelBuffer> {
    let (width, height) = fit_dimensions(
        source.width(),
        source.height(),
        max_width,
        max_height,
        character_ratio,
    )?;
    log::debug!(
        "resizing {}x{} -> {}x{} cells (ratio {})",
        source.width(),
        source.height(),
        width,
        height,
        character_ratio
    );

    let mut resized = PixelBuffer::new(width, height, source.channels())?;

    for j in 0..height {
        let (y1, y2) = source_span(j, source.height(), height);
        for i in 0..width {
            let (x1, x2) = source_span(i, source.width(), width);
            let average = source.region_average(x1, x2, y1, y2)?;
            resized.set(i, j, &average)?;
        }
    }

    Ok(resized)
}
