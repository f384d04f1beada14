use crate::buffer::PixelBuffer;

/// Thresholds at or above this disable edge detection
///
/// The largest meaningful gradient magnitude for `[0, 1]` samples.
pub const MAX_EDGE_THRESHOLD: f64 = 4.0;

/// Sobel kernels, row-major
pub const SOBEL_X: [f64; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
pub const SOBEL_Y: [f64; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Edge direction classification for glyph selection
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
    None,
    Vertical,   // | (gradient near 0° or 180°)
    Horizontal, // _ (gradient near ±90°)
    Diagonal1,  // / (112.5°..157.5° or -67.5°..-22.5°)
    Diagonal2,  // \ (22.5°..67.5° or -157.5°..-112.5°)
}

/// Classify edge direction from a gradient angle
///
/// Opposite-facing gradients share a glyph, so each bucket merges two
/// 45°-wide ranges. Ranges are inclusive and tested in order.
///
/// # Arguments
/// * `angle` - Gradient angle in degrees, `atan2(gy, gx)` in `(-180, 180]`
///
/// # Returns
/// The direction; anything outside the three sloped buckets is vertical
pub fn classify_edge_direction(angle: f64) -> EdgeDirection {
    let within = |lo: f64, hi: f64| (lo..=hi).contains(&angle);

    if within(22.5, 67.5) || within(-157.5, -112.5) {
        EdgeDirection::Diagonal2
    } else if within(67.5, 112.5) || within(-112.5, -67.5) {
        EdgeDirection::Horizontal
    } else if within(112.5, 157.5) || within(-67.5, -22.5) {
        EdgeDirection::Diagonal1
    } else {
        EdgeDirection::Vertical
    }
}

/// Gradient at one cell
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct EdgeSample {
    pub magnitude_squared: f64,
    /// Degrees in `(-180, 180]`
    pub angle_degrees: f64,
}

impl EdgeSample {
    /// Build from the horizontal and vertical gradient
    pub fn from_gradient(gx: f64, gy: f64) -> Self {
        Self {
            magnitude_squared: gx * gx + gy * gy,
            angle_degrees: gy.atan2(gx).to_degrees(),
        }
    }
}

/// 3x3 correlation over channel 0 of a buffer, zero-padded at the borders
///
/// # Arguments
/// * `gray` - Grayscale buffer (only channel 0 is read)
/// * `kernel` - Row-major 3x3 kernel
///
/// # Returns
/// One response per pixel, row-major
pub fn convolve3x3(gray: &PixelBuffer, kernel: &[f64; 9]) -> Vec<f64> {
    let (width, height) = (gray.width(), gray.height());
    let mut output = vec![0.0; width * height];

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            for ky in 0..3 {
                for kx in 0..3 {
                    // Out-of-range neighbours contribute zero
                    let (Some(sx), Some(sy)) = ((x + kx).checked_sub(1), (y + ky).checked_sub(1))
                    else {
                        continue;
                    };
                    if sx >= width || sy >= height {
                        continue;
                    }
                    sum += kernel[ky * 3 + kx] * gray.pixel(sx, sy)[0];
                }
            }
            output[y * width + x] = sum;
        }
    }

    output
}

/// Per-cell Sobel gradients plus the threshold that makes a cell an edge
#[derive(Debug, Clone)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    samples: Vec<EdgeSample>,
    threshold: f64,
}

impl EdgeMap {
    /// Run the Sobel operator over a grayscale buffer
    ///
    /// Returns `None` without convolving anything when `threshold` is at or
    /// above [`MAX_EDGE_THRESHOLD`]; no cell could qualify anyway.
    pub fn detect(gray: &PixelBuffer, threshold: f64) -> Option<Self> {
        if threshold >= MAX_EDGE_THRESHOLD {
            log::debug!("edge detection disabled (threshold {threshold})");
            return None;
        }

        let gx = convolve3x3(gray, &SOBEL_X);
        let gy = convolve3x3(gray, &SOBEL_Y);
        let samples: Vec<EdgeSample> = gx
            .iter()
            .zip(&gy)
            .map(|(&gx, &gy)| EdgeSample::from_gradient(gx, gy))
            .collect();

        let map = Self {
            width: gray.width(),
            height: gray.height(),
            samples,
            threshold,
        };
        log::debug!(
            "edge detection: {} of {} cells above threshold {}",
            map.edge_count(),
            map.samples.len(),
            threshold
        );
        Some(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Gradient at `(x, y)`
    pub fn sample(&self, x: usize, y: usize) -> EdgeSample {
        self.samples[y * self.width + x]
    }

    /// An edge iff `magnitude² >= threshold²`
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.sample(x, y).magnitude_squared >= self.threshold * self.threshold
    }

    /// Direction of the edge at `(x, y)`, `None` for non-edge cells
    pub fn direction_at(&self, x: usize, y: usize) -> EdgeDirection {
        if self.is_edge(x, y) {
            classify_edge_direction(self.sample(x, y).angle_degrees)
        } else {
            EdgeDirection::None
        }
    }

    fn edge_count(&self) -> usize {
        let t2 = self.threshold * self.threshold;
        self.samples
            .iter()
            .filter(|s| s.magnitude_squared >= t2)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    /// Black left half, white right half
    fn vertical_boundary(width: usize, height: usize) -> PixelBuffer {
        let bytes: Vec<u8> = (0..width * height)
            .map(|i| if i % width < width / 2 { 0 } else { 255 })
            .collect();
        PixelBuffer::from_bytes(width, height, 1, &bytes).unwrap()
    }

    #[test]
    fn test_classify_vertical() {
        assert_eq!(classify_edge_direction(0.0), EdgeDirection::Vertical);
        assert_eq!(classify_edge_direction(10.0), EdgeDirection::Vertical);
        assert_eq!(classify_edge_direction(-20.0), EdgeDirection::Vertical);
        assert_eq!(classify_edge_direction(170.0), EdgeDirection::Vertical);
        assert_eq!(classify_edge_direction(180.0), EdgeDirection::Vertical);
        assert_eq!(classify_edge_direction(-170.0), EdgeDirection::Vertical);
    }

    #[test]
    fn test_classify_horizontal() {
        assert_eq!(classify_edge_direction(90.0), EdgeDirection::Horizontal);
        assert_eq!(classify_edge_direction(-90.0), EdgeDirection::Horizontal);
        assert_eq!(classify_edge_direction(100.0), EdgeDirection::Horizontal);
    }

    #[test]
    fn test_classify_diagonal() {
        assert_eq!(classify_edge_direction(45.0), EdgeDirection::Diagonal2);
        assert_eq!(classify_edge_direction(-135.0), EdgeDirection::Diagonal2);
        assert_eq!(classify_edge_direction(135.0), EdgeDirection::Diagonal1);
        assert_eq!(classify_edge_direction(-45.0), EdgeDirection::Diagonal1);
    }

    #[test]
    fn test_classify_boundaries_follow_table_order() {
        // Shared endpoints go to the earlier row of the table
        assert_eq!(classify_edge_direction(67.5), EdgeDirection::Diagonal2);
        assert_eq!(classify_edge_direction(-112.5), EdgeDirection::Diagonal2);
        assert_eq!(classify_edge_direction(112.5), EdgeDirection::Horizontal);
        assert_eq!(classify_edge_direction(-67.5), EdgeDirection::Horizontal);
        assert_eq!(classify_edge_direction(22.5), EdgeDirection::Diagonal2);
        assert_eq!(classify_edge_direction(-22.5), EdgeDirection::Diagonal1);
        assert_eq!(classify_edge_direction(157.5), EdgeDirection::Diagonal1);
    }

    #[test]
    fn test_edge_sample_from_gradient() {
        let sample = EdgeSample::from_gradient(3.0, 4.0);
        assert_eq!(sample.magnitude_squared, 25.0);
        assert!((sample.angle_degrees - 53.130_102).abs() < 1e-5);

        let up = EdgeSample::from_gradient(0.0, -1.0);
        assert!((up.angle_degrees + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_convolve_uniform_interior_is_zero() {
        let gray = PixelBuffer::from_bytes(5, 5, 1, &[255; 25]).unwrap();
        let gx = convolve3x3(&gray, &SOBEL_X);
        assert_eq!(gx[2 * 5 + 2], 0.0);
        // Zero padding makes the right border fall off
        assert_eq!(gx[2 * 5 + 4], -4.0);
        assert_eq!(gx[2 * 5], 4.0);
    }

    #[test]
    fn test_vertical_boundary_is_vertical_edge() {
        let gray = vertical_boundary(8, 5);
        let edges = EdgeMap::detect(&gray, 1.0).expect("edges enabled");

        for y in 1..4 {
            for x in [3, 4] {
                let sample = edges.sample(x, y);
                assert_eq!(sample.magnitude_squared, 16.0);
                assert_eq!(sample.angle_degrees, 0.0);
                assert!(edges.is_edge(x, y));
                assert_eq!(edges.direction_at(x, y), EdgeDirection::Vertical);
            }
            // Flat black interior away from the boundary
            assert!(!edges.is_edge(1, y));
            assert_eq!(edges.direction_at(1, y), EdgeDirection::None);
        }
    }

    #[test]
    fn test_horizontal_boundary_uses_underscore_bucket() {
        // Black top rows, white bottom rows
        let bytes: Vec<u8> = (0..6 * 6).map(|i| if i / 6 < 3 { 0 } else { 255 }).collect();
        let gray = PixelBuffer::from_bytes(6, 6, 1, &bytes).unwrap();
        let edges = EdgeMap::detect(&gray, 1.0).unwrap();
        assert!((edges.sample(2, 2).angle_degrees - 90.0).abs() < 1e-9);
        assert_eq!(edges.direction_at(2, 2), EdgeDirection::Horizontal);
    }

    #[test]
    fn test_threshold_at_max_skips_detection() {
        let gray = vertical_boundary(8, 5);
        assert!(EdgeMap::detect(&gray, MAX_EDGE_THRESHOLD).is_none());
        assert!(EdgeMap::detect(&gray, 3.99).is_some());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let gray = PixelBuffer::from_samples(3, 3, 1, vec![0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5])
            .unwrap();
        // gx at centre = 0.5 + 1.0 + 0.5 = 2.0, gy = 0
        let edges = EdgeMap::detect(&gray, 2.0).unwrap();
        assert_eq!(edges.sample(1, 1).magnitude_squared, 4.0);
        assert!(edges.is_edge(1, 1));
    }

    #[test]
    fn test_matches_imageproc_sobel_in_interior() {
        let (width, height) = (7u32, 6u32);
        let img = GrayImage::from_fn(width, height, |x, y| Luma([((x * 53 + y * 97) % 256) as u8]));
        let gray = PixelBuffer::from_bytes(
            width as usize,
            height as usize,
            1,
            img.as_raw(),
        )
        .unwrap();

        let ours_x = convolve3x3(&gray, &SOBEL_X);
        let ours_y = convolve3x3(&gray, &SOBEL_Y);
        let theirs_x = imageproc::gradients::horizontal_sobel(&img);
        let theirs_y = imageproc::gradients::vertical_sobel(&img);

        // imageproc clamps at the border, so compare interior cells only
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let idx = (y * width + x) as usize;
                let expected_x = theirs_x.get_pixel(x, y)[0] as f64;
                let expected_y = theirs_y.get_pixel(x, y)[0] as f64;
                assert!(((ours_x[idx] * 255.0).abs() - expected_x.abs()).abs() < 1e-6);
                assert!(((ours_y[idx] * 255.0).abs() - expected_y.abs()).abs() < 1e-6);
            }
        }
    }
}
