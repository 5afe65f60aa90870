use crate::{
    LightingSignal,
    signals::{SignalDetector, SignalInput},
};

/// Flags globally unnatural brightness variance. Unlike the sampling
/// detectors this runs a full scan, so it is deterministic for a given image.
pub struct LightingConsistencyDetector {
    consistency_threshold: u8,
}

impl LightingConsistencyDetector {
    pub fn new() -> Self {
        Self {
            consistency_threshold: 40,
        }
    }
}

impl Default for LightingConsistencyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalDetector for LightingConsistencyDetector {
    type Signal = LightingSignal;

    fn name(&self) -> &'static str {
        "Lighting Consistency Detector"
    }

    fn evaluate(&self, input: &SignalInput<'_>) -> LightingSignal {
        let n = input.pixels.pixel_count() as f64;

        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for px in input.pixels.channels().chunks_exact(4) {
            let brightness = (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0;
            sum += brightness;
            sum_sq += brightness * brightness;
        }

        let mean = sum / n;
        // Population variance; clamped against negative float residue.
        let variance = (sum_sq / n - mean * mean).max(0.0);
        let normalized_std_dev = variance.sqrt() / 255.0;

        let score = (100.0 - normalized_std_dev * 200.0).max(0.0).round() as u8;
        let consistent = score > self.consistency_threshold;

        let description = if consistent {
            "Brightness distribution is consistent with a single lighting environment.".into()
        } else {
            format!(
                "Brightness varies abnormally across the image (consistency {}/100), which can indicate composited content.",
                score
            )
        };

        LightingSignal {
            consistent,
            score,
            description,
        }
    }
}
