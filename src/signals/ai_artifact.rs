use rand::Rng;

use crate::{
    AiArtifactSignal,
    signals::{SignalDetector, SignalInput, sample_rng},
};

/// Flags symmetry and smoothness patterns associated with generative-model
/// output. Two independent sub-scores are blended: horizontal edge symmetry
/// (weight 0.3) and neighborhood smoothness (weight 0.7).
pub struct AiArtifactDetector {
    symmetry_trials: usize,
    smoothness_samples: usize,
    symmetry_delta: f64,
    smoothness_delta: f64,
    confidence_threshold: u8,
    seed: Option<u64>,
}

impl AiArtifactDetector {
    pub fn new(symmetry_trials: usize, smoothness_samples: usize) -> Self {
        Self {
            symmetry_trials,
            smoothness_samples,
            symmetry_delta: 30.0,
            smoothness_delta: 20.0,
            confidence_threshold: 60,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn symmetry_percent(&self, input: &SignalInput<'_>, rng: &mut impl Rng) -> f64 {
        let (width, height) = (input.pixels.width(), input.pixels.height());

        let mut symmetric = 0usize;
        for _ in 0..self.symmetry_trials {
            let y = rng.gen_range(0..height);
            let left = input.pixels.rgb(0, y);
            let right = input.pixels.rgb(width - 1, y);

            let delta: f64 = left
                .iter()
                .zip(right.iter())
                .map(|(&l, &r)| (l as f64 - r as f64).abs())
                .sum();

            if delta < self.symmetry_delta {
                symmetric += 1;
            }
        }

        100.0 * symmetric as f64 / self.symmetry_trials as f64
    }

    fn smoothness_percent(&self, input: &SignalInput<'_>, rng: &mut impl Rng) -> f64 {
        let (width, height) = (input.pixels.width(), input.pixels.height());

        let mut smooth = 0usize;
        for _ in 0..self.smoothness_samples {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            if input.pixels.neighbor_delta(x, y) < self.smoothness_delta {
                smooth += 1;
            }
        }

        100.0 * smooth as f64 / self.smoothness_samples as f64
    }
}

impl SignalDetector for AiArtifactDetector {
    type Signal = AiArtifactSignal;

    fn name(&self) -> &'static str {
        "AI Artifact Detector"
    }

    fn evaluate(&self, input: &SignalInput<'_>) -> AiArtifactSignal {
        let mut rng = sample_rng(self.seed);

        let symmetry = self.symmetry_percent(input, &mut rng);
        let smoothness = self.smoothness_percent(input, &mut rng);

        let confidence = (symmetry * 0.3 + smoothness * 0.7).round() as u8;
        let detected = confidence > self.confidence_threshold;

        let description = if detected {
            format!(
                "Strong symmetry ({:.0}%) and unnaturally smooth texture ({:.0}%) resemble generative-model output.",
                symmetry, smoothness
            )
        } else {
            "No symmetry or smoothness patterns typical of generated imagery.".into()
        };

        AiArtifactSignal {
            detected,
            confidence,
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

    #[test]
    fn flat_image_maxes_both_subscores() {
        let data = vec![200u8; 32 * 32 * 4];
        let pixels = PixelBuffer::from_rgba(32, 32, data).unwrap();
        let facts = facts();
        let input = SignalInput {
            pixels: &pixels,
            facts: &facts,
        };

        let signal = AiArtifactDetector::new(50, 1000)
            .with_seed(Some(11))
            .evaluate(&input);

        assert_eq!(signal.confidence, 100);
        assert!(signal.detected);
    }

    #[test]
    fn asymmetric_noisy_image_scores_low() {
        // Left edge black, right edge white, harsh checker texture in between.
        let (width, height) = (32u32, 32u32);
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = if x == 0 {
                    0u8
                } else if x == width - 1 {
                    255
                } else if (x + y) % 2 == 0 {
                    0
                } else {
                    255
                };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let pixels = PixelBuffer::from_rgba(width, height, data).unwrap();
        let facts = facts();
        let input = SignalInput {
            pixels: &pixels,
            facts: &facts,
        };

        let signal = AiArtifactDetector::new(50, 1000)
            .with_seed(Some(11))
            .evaluate(&input);

        assert!(signal.confidence < 20);
        assert!(!signal.detected);
    }
}
