//! Owned floating-point pixel storage.
//!
//! Samples are kept row-major and channel-interleaved in one contiguous
//! `Vec<f64>`, every value normalized to `[0, 1]`.

use crate::error::{AsciiError, Result};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Decoded image samples in `[0, 1]`
///
/// Channel layout follows the decoder: 1-2 channels are gray (+ alpha),
/// 3-4 channels are RGB (+ alpha). Alpha is carried but never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<f64>,
}

/// `width * height * channels`, or `Allocation` if it overflows
fn sample_len(width: usize, height: usize, channels: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(AsciiError::Allocation {
            samples: usize::MAX,
        })
}

/// Allocate a zeroed sample vector, reporting exhaustion instead of aborting
fn alloc_samples(width: usize, height: usize, channels: usize) -> Result<Vec<f64>> {
    let len = sample_len(width, height, channels)?;

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(len)
        .map_err(|_| AsciiError::Allocation { samples: len })?;
    samples.resize(len, 0.0);
    Ok(samples)
}

fn check_channels(channels: usize) -> Result<()> {
    if (1..=4).contains(&channels) {
        Ok(())
    } else {
        Err(AsciiError::UnsupportedChannels(channels))
    }
}

impl PixelBuffer {
    /// Create a zero-filled buffer
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        check_channels(channels)?;
        let samples = alloc_samples(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Wrap already-normalized samples
    ///
    /// # Errors
    /// Fails if the channel count is unsupported, the sample count does not
    /// match `width * height * channels`, or a sample lies outside `[0, 1]`.
    pub fn from_samples(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<f64>,
    ) -> Result<Self> {
        check_channels(channels)?;
        let expected = sample_len(width, height, channels)?;
        if samples.len() != expected {
            return Err(AsciiError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        if let Some(bad) = samples.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(AsciiError::SampleRange(*bad));
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Normalize 8-bit decoder output into a buffer
    pub fn from_bytes(width: usize, height: usize, channels: usize, bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::new(width, height, channels)?;
        if bytes.len() != buffer.samples.len() {
            return Err(AsciiError::SampleCount {
                expected: buffer.samples.len(),
                actual: bytes.len(),
            });
        }
        for (sample, &byte) in buffer.samples.iter_mut().zip(bytes) {
            *sample = byte as f64 / 255.0;
        }
        Ok(buffer)
    }

    /// Convert a decoded image, keeping its channel layout
    ///
    /// 16-bit and float images are narrowed to 8-bit of the same layout.
    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let (width, height) = (width as usize, height as usize);

        let channels = img.color().channel_count() as usize;
        let bytes = match channels {
            1 => img.to_luma8().into_raw(),
            2 => img.to_luma_alpha8().into_raw(),
            3 => img.to_rgb8().into_raw(),
            4 => img.to_rgba8().into_raw(),
            n => return Err(AsciiError::UnsupportedChannels(n)),
        };

        Self::from_bytes(width, height, channels, &bytes)
    }

    /// Decode an image file
    ///
    /// # Arguments
    /// * `path` - Path to any format the `image` crate can decode
    ///
    /// # Returns
    /// A buffer with the file's own channel count
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| AsciiError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        Self::from_image(&img)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw row-major, channel-interleaved samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// 1-2 channel buffers carry no hue
    pub fn is_grayscale(&self) -> bool {
        self.channels <= 2
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(AsciiError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Channel values at `(x, y)`, unchecked beyond slice indexing
    ///
    /// Callers iterating `0..width` / `0..height` use this in inner loops.
    pub(crate) fn pixel(&self, x: usize, y: usize) -> &[f64] {
        let start = self.offset(x, y);
        &self.samples[start..start + self.channels]
    }

    /// Channel values at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Result<&[f64]> {
        self.check_bounds(x, y)?;
        Ok(self.pixel(x, y))
    }

    /// Overwrite every channel at `(x, y)`
    pub fn set(&mut self, x: usize, y: usize, values: &[f64]) -> Result<()> {
        self.check_bounds(x, y)?;
        if values.len() != self.channels {
            return Err(AsciiError::ChannelMismatch {
                expected: self.channels,
                actual: values.len(),
            });
        }
        let start = self.offset(x, y);
        self.samples[start..start + self.channels].copy_from_slice(values);
        Ok(())
    }

    /// Per-channel mean over the half-open rectangle `[x1, x2) x [y1, y2)`
    ///
    /// # Errors
    /// `InvalidRegion` for an empty rectangle, `OutOfBounds` when it extends
    /// past the buffer.
    pub fn region_average(&self, x1: usize, x2: usize, y1: usize, y2: usize) -> Result<Vec<f64>> {
        if x1 >= x2 || y1 >= y2 {
            return Err(AsciiError::InvalidRegion { x1, x2, y1, y2 });
        }
        self.check_bounds(x2 - 1, y2 - 1)?;

        let mut average = vec![0.0; self.channels];
        for y in y1..y2 {
            for x in x1..x2 {
                for (acc, sample) in average.iter_mut().zip(self.pixel(x, y)) {
                    *acc += sample;
                }
            }
        }

        let n_pixels = ((x2 - x1) * (y2 - y1)) as f64;
        for acc in &mut average {
            *acc /= n_pixels;
        }
        Ok(average)
    }
}
