use std::collections::HashSet;

use crate::{
    ColorDiversitySignal,
    signals::{SignalDetector, SignalInput},
};

const SCAN_LIMIT: usize = 10_000;
const SCAN_STRIDE: usize = 40;
const QUANT_STEP: u8 = 32;
const FULL_DIVERSITY_COUNT: f64 = 250.0;

/// Flags unnaturally narrow color palettes by counting distinct quantized
/// colors over a sparse scan of the buffer's leading channel positions.
pub struct ColorDiversityDetector {
    diversity_threshold: u8,
}

impl ColorDiversityDetector {
    pub fn new() -> Self {
        Self {
            diversity_threshold: 30,
        }
    }
}

impl Default for ColorDiversityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalDetector for ColorDiversityDetector {
    type Signal = ColorDiversitySignal;

    fn name(&self) -> &'static str {
        "Color Diversity Detector"
    }

    fn evaluate(&self, input: &SignalInput<'_>) -> ColorDiversitySignal {
        let data = input.pixels.channels();
        let limit = data.len().min(SCAN_LIMIT);

        let mut distinct: HashSet<(u8, u8, u8)> = HashSet::new();
        let mut i = 0;
        while i < limit {
            if i + 2 < data.len() {
                distinct.insert((
                    data[i] / QUANT_STEP,
                    data[i + 1] / QUANT_STEP,
                    data[i + 2] / QUANT_STEP,
                ));
            }
            i += SCAN_STRIDE;
        }

        let score = (100.0 * distinct.len() as f64 / FULL_DIVERSITY_COUNT)
            .round()
            .min(100.0) as u8;
        let logical = score > self.diversity_threshold;

        let description = if logical {
            "Color palette diversity is in the range expected of natural scenes.".into()
        } else {
            format!(
                "Only {} distinct quantized colors were observed, an unusually narrow palette.",
                distinct.len()
            )
        };

        ColorDiversitySignal {
            logical,
            score,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileFacts, pixels::PixelBuffer};

    fn facts() -> FileFacts {
        FileFacts {
            file_name: "test.png".into(),
            mime_type: Some("image/png".into()),
            byte_size: 4096,
            modified_ms: Some(1_700_000_000_000),
        }
    }

    fn evaluate(pixels: &PixelBuffer) -> ColorDiversitySignal {
        let facts = facts();
        let input = SignalInput {
            pixels,
            facts: &facts,
        };
        ColorDiversityDetector::new().evaluate(&input)
    }

    #[test]
    fn flat_image_has_minimal_diversity() {
        let pixels = PixelBuffer::from_rgba(50, 50, vec![128u8; 50 * 50 * 4]).unwrap();

        let signal = evaluate(&pixels);

        // One distinct quantized color rounds to a score of 0.
        assert_eq!(signal.score, 0);
        assert!(!signal.logical);
    }

    #[test]
    fn varied_image_is_logical() {
        // Spread quantization buckets across the sampled positions.
        let (width, height) = (50u32, 50u32);
        let mut data = Vec::new();
        for i in 0u32..(width * height) {
            let r = ((i * 37) % 256) as u8;
            let g = ((i * 73) % 256) as u8;
            let b = ((i * 151) % 256) as u8;
            data.extend_from_slice(&[r, g, b, 255]);
        }
        let pixels = PixelBuffer::from_rgba(width, height, data).unwrap();

        let signal = evaluate(&pixels);

        assert!(signal.score > 30);
        assert!(signal.logical);
    }

    #[test]
    fn score_never_exceeds_cap() {
        let (width, height) = (64u32, 64u32);
        let mut data = Vec::new();
        for i in 0u32..(width * height) {
            data.extend_from_slice(&[(i % 256) as u8, ((i / 2) % 256) as u8, ((i / 3) % 256) as u8, 255]);
        }
        let pixels = PixelBuffer::from_rgba(width, height, data).unwrap();

        assert!(evaluate(&pixels).score <= 100);
    }
}
