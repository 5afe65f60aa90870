use log::debug;

use crate::error::{AuthenticityError, Result};

/// Immutable RGBA8 view of a decoded image. Owned by a single analysis call
/// and never mutated after construction.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Decodes raw image bytes (JPEG, PNG, WebP, GIF, ...) into an RGBA8
    /// buffer. Animated formats contribute their first frame only.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AuthenticityError::EmptyInput);
        }

        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        if width == 0 || height == 0 {
            return Err(AuthenticityError::ZeroArea);
        }

        debug!("decoded {}x{} image ({} bytes in)", width, height, bytes.len());

        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    /// Builds a buffer from an existing RGBA byte sequence.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AuthenticityError::ZeroArea);
        }
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(AuthenticityError::EmptyInput);
        }

        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Flat channel sequence, row-major RGBA.
    pub fn channels(&self) -> &[u8] {
        &self.data
    }

    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Brightness as the unweighted mean of R, G and B.
    pub fn brightness(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.rgb(x, y);
        (r as f64 + g as f64 + b as f64) / 3.0
    }

    /// Mean RGB of the up/down/left/right neighbors that fall inside the
    /// buffer. The denominator is the count of valid neighbors, so edge and
    /// corner pixels average over fewer samples instead of phantom zeros.
    pub fn neighbor_mean_rgb(&self, x: u32, y: u32) -> [f64; 3] {
        let mut sums = [0.0f64; 3];
        let mut count = 0u32;

        let mut visit = |nx: i64, ny: i64| {
            if nx >= 0 && ny >= 0 && (nx as u32) < self.width && (ny as u32) < self.height {
                let [r, g, b] = self.rgb(nx as u32, ny as u32);
                sums[0] += r as f64;
                sums[1] += g as f64;
                sums[2] += b as f64;
                count += 1;
            }
        };

        visit(x as i64 - 1, y as i64);
        visit(x as i64 + 1, y as i64);
        visit(x as i64, y as i64 - 1);
        visit(x as i64, y as i64 + 1);

        if count == 0 {
            return self.rgb(x, y).map(|c| c as f64);
        }

        sums.map(|s| s / count as f64)
    }

    /// Sum of per-channel absolute differences between a pixel and the mean
    /// of its in-bounds 4-neighborhood.
    pub fn neighbor_delta(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.rgb(x, y);
        let mean = self.neighbor_mean_rgb(x, y);

        (r as f64 - mean[0]).abs() + (g as f64 - mean[1]).abs() + (b as f64 - mean[2]).abs()
    }
}
