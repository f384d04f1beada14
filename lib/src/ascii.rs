use crate::buffer::PixelBuffer;
use crate::color::{ColorMode, Hsv, display_rgb, grayscale_of, rgb_to_hsv, to_byte};
use crate::edges::{EdgeDirection, EdgeMap};
use crate::lut::{get_edge_char, get_fill_char};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

/// Color carried by a cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tint {
    /// Gray level of a grayscale source; never animated
    Gray(u8),
    /// Source hue and saturation of a color pixel
    Hue(Hsv),
}

impl Tint {
    /// Foreground RGB for this tint in the given palette
    pub fn rgb(&self, mode: ColorMode) -> [u8; 3] {
        match *self {
            Tint::Gray(level) => [level; 3],
            Tint::Hue(hsv) => display_rgb(hsv, mode),
        }
    }
}

/// One grid position: a glyph and its color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub tint: Tint,
}

/// Row terminator written after each line of cells
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Plain newline for cooked terminals and pipes
    #[default]
    Lf,
    /// Raw mode disables output post-processing, so rows need a carriage return
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Select the glyph for a cell
///
/// # Arguments
/// * `edge_dir` - Edge direction for this cell
/// * `grayscale` - Grayscale value for this cell [0.0, 1.0]
///
/// # Returns
/// The directional glyph for edge cells, otherwise the fill glyph
pub fn select_ascii_char(edge_dir: EdgeDirection, grayscale: f64) -> char {
    // Priority: edges first, then fill
    get_edge_char(edge_dir).unwrap_or_else(|| get_fill_char(grayscale))
}

/// Build the cell for one resized pixel
///
/// Grayscale pixels keep their own luma as a gray tint; color pixels carry
/// their HSV so the palette can be chosen at draw time.
pub fn build_cell(pixel: &[f64], edge_dir: EdgeDirection) -> Cell {
    let grayscale = grayscale_of(pixel);
    let tint = if pixel.len() <= 2 {
        Tint::Gray(to_byte(pixel[0]))
    } else {
        Tint::Hue(rgb_to_hsv(pixel[0], pixel[1], pixel[2]))
    };

    Cell {
        glyph: select_ascii_char(edge_dir, grayscale),
        tint,
    }
}

/// Row-major grid of cells, indexed `y * width + x`
#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Select glyphs and tints for every pixel of a resized buffer
    ///
    /// # Arguments
    /// * `resized` - Buffer with one pixel per character cell
    /// * `edges` - Sobel result for the same grid, `None` when disabled
    pub fn from_buffer(resized: &PixelBuffer, edges: Option<&EdgeMap>) -> Self {
        let (width, height) = (resized.width(), resized.height());
        let mut cells = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let edge_dir = edges.map_or(EdgeDirection::None, |e| e.direction_at(x, y));
                cells.push(build_cell(resized.pixel(x, y), edge_dir));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Cell at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    /// Glyphs only, one line per row
    pub fn glyphs(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            text.extend(row.iter().map(|cell| cell.glyph));
            text.push('\n');
        }
        text
    }

    /// Write one frame of colored glyphs
    ///
    /// Each cell is a truecolor foreground sequence followed by its glyph;
    /// rows end with `line_ending` and the frame ends with a color reset.
    pub fn write_frame<W: Write>(
        &self,
        out: &mut W,
        mode: ColorMode,
        line_ending: LineEnding,
    ) -> io::Result<()> {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                let [r, g, b] = cell.tint.rgb(mode);
                queue!(
                    out,
                    SetForegroundColor(Color::Rgb { r, g, b }),
                    Print(cell.glyph)
                )?;
            }
            out.write_all(line_ending.as_str().as_bytes())?;
        }
        queue!(out, ResetColor)?;
        Ok(())
    }
}
