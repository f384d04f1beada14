//! CLI argument parsing with clap.

use ascii_tty::RenderConfig;
use ascii_tty::config::{DEFAULT_CHARACTER_RATIO, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use ascii_tty::edges::MAX_EDGE_THRESHOLD;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Parse a grid bound (at least 1)
fn parse_bound(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid size", s))?;
    if n == 0 {
        return Err("Size must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse and validate the character ratio (> 0)
fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(format!("Character ratio must be positive, got {}", ratio));
    }
    Ok(ratio)
}

/// Parse and validate the edge threshold (0.0-4.0)
fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=MAX_EDGE_THRESHOLD).contains(&threshold) {
        return Err(format!(
            "Edge threshold must be between 0.0 and {:.1}, got {}",
            MAX_EDGE_THRESHOLD, threshold
        ));
    }
    Ok(threshold)
}

/// Render an image as colored ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "ascii-tty")]
#[command(version, about = "Render an image as colored ASCII art in the terminal", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Fit to the terminal
    ascii-tty photo.png

    # Edge-aware glyphs, 100 columns wide
    ascii-tty photo.png -w 100 -e 1.5

    # 8-color palette with a rotating rainbow (q to quit)
    ascii-tty photo.png --retro-colors --rainbow")]
pub struct Args {
    /// Path to image file
    pub image: PathBuf,

    /// Maximum width in characters (default: terminal width or 64)
    #[arg(short = 'w', long, value_parser = parse_bound)]
    pub max_width: Option<usize>,

    /// Maximum height in characters (default: terminal height or 48)
    #[arg(short = 'H', long, value_parser = parse_bound)]
    pub max_height: Option<usize>,

    /// Height-to-width ratio of one character cell
    #[arg(short, long, default_value_t = DEFAULT_CHARACTER_RATIO, value_parser = parse_ratio)]
    pub character_ratio: f64,

    /// Edge detection threshold, 0.0-4.0 (4.0 disables)
    #[arg(short, long, default_value_t = MAX_EDGE_THRESHOLD, value_parser = parse_threshold)]
    pub edge_threshold: f64,

    /// Use the 8-color retro palette instead of 24-bit truecolor
    #[arg(long)]
    pub retro_colors: bool,

    /// Animate with a rotating rainbow (q or Q to quit)
    #[arg(short, long)]
    pub rainbow: bool,
}

/// Rows left for the grid on a terminal of `rows` lines
///
/// A single frame leaves one line for the prompt. The animation writes a
/// spacer line after the frame and parks the cursor below it, so it needs
/// two; with only one the screen scrolls on every repaint.
fn usable_rows(rows: u16, rainbow: bool) -> usize {
    let reserved = if rainbow { 2 } else { 1 };
    (rows as usize).saturating_sub(reserved)
}

/// Terminal size in cells available to the grid, if stdout is a terminal
fn terminal_bounds(rainbow: bool) -> Option<(usize, usize)> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    let (cols, rows) = crossterm::terminal::size().ok()?;
    let (cols, rows) = (cols as usize, usable_rows(rows, rainbow));
    (cols > 0 && rows > 0).then_some((cols, rows))
}

impl Args {
    /// Build the render configuration, falling back to `terminal` for
    /// unspecified bounds and to the library defaults after that
    pub fn to_config(&self, terminal: Option<(usize, usize)>) -> RenderConfig {
        let (term_width, term_height) =
            terminal.unwrap_or((DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT));

        RenderConfig {
            max_width: self.max_width.unwrap_or(term_width),
            max_height: self.max_height.unwrap_or(term_height),
            character_ratio: self.character_ratio,
            edge_threshold: self.edge_threshold,
            use_retro_colors: self.retro_colors,
            use_rainbow: self.rainbow,
        }
    }

    /// Configuration with bounds taken from the live terminal
    pub fn render_config(&self) -> RenderConfig {
        self.to_config(terminal_bounds(self.rainbow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["ascii-tty", "cat.png"]);
        assert_eq!(args.image, PathBuf::from("cat.png"));
        assert!(args.max_width.is_none());
        assert!(args.max_height.is_none());
        assert_eq!(args.character_ratio, 2.0);
        assert_eq!(args.edge_threshold, 4.0);
        assert!(!args.retro_colors);
        assert!(!args.rainbow);
    }

    #[test]
    fn test_args_all_options() {
        let args = Args::parse_from([
            "ascii-tty",
            "cat.png",
            "-w",
            "100",
            "-H",
            "30",
            "-c",
            "2.5",
            "-e",
            "1.5",
            "--retro-colors",
            "-r",
        ]);
        assert_eq!(args.max_width, Some(100));
        assert_eq!(args.max_height, Some(30));
        assert_eq!(args.character_ratio, 2.5);
        assert_eq!(args.edge_threshold, 1.5);
        assert!(args.retro_colors);
        assert!(args.rainbow);
    }

    #[test]
    fn test_args_long_names() {
        let args = Args::parse_from([
            "ascii-tty",
            "cat.png",
            "--max-width",
            "10",
            "--max-height",
            "5",
            "--character-ratio",
            "1",
            "--edge-threshold",
            "0",
            "--rainbow",
        ]);
        assert_eq!(args.max_width, Some(10));
        assert_eq!(args.max_height, Some(5));
        assert_eq!(args.character_ratio, 1.0);
        assert_eq!(args.edge_threshold, 0.0);
        assert!(args.rainbow);
    }

    #[test]
    fn test_args_require_image() {
        assert!(Args::try_parse_from(["ascii-tty"]).is_err());
    }

    #[test]
    fn test_args_reject_out_of_range() {
        assert!(Args::try_parse_from(["ascii-tty", "a.png", "-w", "0"]).is_err());
        assert!(Args::try_parse_from(["ascii-tty", "a.png", "-c", "0"]).is_err());
        assert!(Args::try_parse_from(["ascii-tty", "a.png", "-c", "-1"]).is_err());
        assert!(Args::try_parse_from(["ascii-tty", "a.png", "-e", "4.5"]).is_err());
        assert!(Args::try_parse_from(["ascii-tty", "a.png", "-e", "abc"]).is_err());
    }

    #[test]
    fn test_to_config_prefers_explicit_bounds() {
        let args = Args::parse_from(["ascii-tty", "a.png", "-w", "40"]);
        let config = args.to_config(Some((120, 35)));
        assert_eq!((config.max_width, config.max_height), (40, 35));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_config_without_terminal() {
        let args = Args::parse_from(["ascii-tty", "a.png", "--retro-colors"]);
        let config = args.to_config(None);
        assert_eq!(config.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(config.max_height, DEFAULT_MAX_HEIGHT);
        assert!(config.use_retro_colors);
        assert!(!config.use_rainbow);
    }

    #[test]
    fn test_usable_rows_leaves_room_for_animation() {
        assert_eq!(usable_rows(24, false), 23);
        assert_eq!(usable_rows(24, true), 22);
        assert_eq!(usable_rows(1, true), 0);
    }

    #[test]
    fn test_rainbow_frame_fits_terminal() {
        // A tall image is height-constrained, so the grid uses every usable row
        let rows = 10u16;
        let args = Args::parse_from(["ascii-tty", "tall.png", "--rainbow"]);
        let config = args.to_config(Some((80, usable_rows(rows, args.rainbow))));

        let src = ascii_tty::PixelBuffer::new(300, 1000, 3).unwrap();
        let grid = ascii_tty::process_image(&src, &config).unwrap();
        assert_eq!(grid.height(), config.max_height);
        // Frame rows, the spacer line and the parked cursor line
        assert!(grid.height() + 2 <= rows as usize);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_bound("12"), Ok(12));
        assert!(parse_bound("-3").is_err());
        assert_eq!(parse_ratio("2"), Ok(2.0));
        assert!(parse_ratio("inf").is_err());
        assert_eq!(parse_threshold("4"), Ok(4.0));
        assert!(parse_threshold("-0.1").is_err());
    }
}
