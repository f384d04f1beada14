//! Glyph lookup tables
//!
//! These define the characters used for edges and grayscale fill.

use crate::edges::EdgeDirection;

/// Fill glyphs ordered from sparsest to densest ink
///
/// 12 levels from darkest (space) to brightest (@)
pub const GLYPH_TABLE: [char; 12] = [
    ' ', // 0: darkest
    '.', // 1
    '-', // 2
    '=', // 3
    '+', // 4
    '*', // 5
    'x', // 6
    '#', // 7
    '$', // 8
    '&', // 9
    'X', // 10
    '@', // 11: brightest
];

/// Get the glyph for an edge direction
///
/// # Arguments
/// * `direction` - The edge direction
///
/// # Returns
/// The character to use for this edge, or `None` for non-edge cells
pub fn get_edge_char(direction: EdgeDirection) -> Option<char> {
    match direction {
        EdgeDirection::Vertical => Some('|'),
        EdgeDirection::Horizontal => Some('_'),
        EdgeDirection::Diagonal1 => Some('/'),
        EdgeDirection::Diagonal2 => Some('\\'),
        EdgeDirection::None => None,
    }
}

/// Get the fill glyph for a grayscale value
///
/// # Arguments
/// * `grayscale` - Normalized grayscale value [0.0, 1.0]
///
/// # Returns
/// `GLYPH_TABLE[floor(grayscale * 12)]`, clamped to the table
pub fn get_fill_char(grayscale: f64) -> char {
    let levels = GLYPH_TABLE.len();
    // `as usize` saturates, so negative and NaN inputs land on 0
    let index = ((grayscale * levels as f64).floor() as usize).min(levels - 1);
    GLYPH_TABLE[index]
}
