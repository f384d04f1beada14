//! Color-space conversion and palette quantization.
//!
//! All channel values are normalized to `[0, 1]`; hue is in degrees.

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Below this, value and chroma are treated as zero
const EPSILON: f64 = 1e-4;

/// Saturation under which a retro cell is drawn white
pub const RETRO_SATURATION_CUTOFF: f64 = 0.25;

/// Hue, saturation, value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Degrees in `[0, 360)`
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// Palette used for colored cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit color straight from the source hue
    #[default]
    Truecolor,
    /// 6 primaries plus white, like an 8-color terminal
    Retro,
}

/// Convert RGB to HSV
///
/// Hue comes from the six-sector formula keyed on whichever channel holds the
/// maximum (ties resolve red, then green, then blue). Achromatic inputs get
/// hue 0.
pub fn rgb_to_hsv(red: f64, green: f64, blue: f64) -> Hsv {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);

    let value = max;
    let chroma = value - min;

    let saturation = if value.abs() < EPSILON {
        0.0
    } else {
        chroma / value
    };

    let hue = if chroma < EPSILON {
        0.0
    } else if red >= green && red >= blue {
        60.0 * ((green - blue) / chroma).rem_euclid(6.0)
    } else if green >= blue {
        60.0 * (2.0 + (blue - red) / chroma)
    } else {
        60.0 * (4.0 + (red - green) / chroma)
    };

    Hsv {
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        hue: if hue >= 360.0 { 0.0 } else { hue },
        saturation,
        value,
    }
}

/// Convert HSV back to RGB
pub fn hsv_to_rgb(hsv: Hsv) -> [f64; 3] {
    let chroma = hsv.value * hsv.saturation;
    let sector = hsv.hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = hsv.value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Grayscale used for glyph density
///
/// Squaring the value stretches the glyph ramp for more contrast.
pub fn grayscale_from_hsv(hsv: Hsv) -> f64 {
    hsv.value * hsv.value
}

/// Grayscale of one pixel: luma for gray buffers, `value²` for RGB
pub fn grayscale_of(pixel: &[f64]) -> f64 {
    if pixel.len() <= 2 {
        pixel[0]
    } else {
        grayscale_from_hsv(rgb_to_hsv(pixel[0], pixel[1], pixel[2]))
    }
}

/// Single-channel grayscale copy of a buffer
pub fn to_grayscale(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    let mut gray = PixelBuffer::new(buffer.width(), buffer.height(), 1)?;
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            gray.set(x, y, &[grayscale_of(buffer.pixel(x, y))])?;
        }
    }
    Ok(gray)
}

/// Map a normalized channel to a byte
pub fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Truecolor display color: source hue and saturation at full value
pub fn truecolor_rgb(hsv: Hsv) -> [u8; 3] {
    hsv_to_rgb(Hsv { value: 1.0, ..hsv }).map(to_byte)
}

/// Quantize to the 8-color retro palette
///
/// Value is forced to 1, hue snapped to the nearest 60°, saturation to 0 or 1.
/// Every output channel is either 0 or 255.
pub fn retro_rgb(hsv: Hsv) -> [u8; 3] {
    let hue = ((hsv.hue / 60.0).round() * 60.0).rem_euclid(360.0);
    let saturation = if hsv.saturation < RETRO_SATURATION_CUTOFF {
        0.0
    } else {
        1.0
    };

    let rgb = hsv_to_rgb(Hsv {
        hue,
        saturation,
        value: 1.0,
    });
    rgb.map(|c| if c >= 0.5 { 255 } else { 0 })
}

/// Display color for an HSV cell in the given palette
pub fn display_rgb(hsv: Hsv, mode: ColorMode) -> [u8; 3] {
    match mode {
        ColorMode::Truecolor => truecolor_rgb(hsv),
        ColorMode::Retro => retro_rgb(hsv),
    }
}
