use rand::Rng;

use crate::{
    PixelAnomalySignal,
    signals::{SignalDetector, SignalInput, sample_rng},
};

/// Flags local pixel discontinuities consistent with cloning or splicing by
/// comparing randomly sampled pixels against their 4-neighborhood mean.
pub struct PixelAnomalyDetector {
    sample_count: usize,
    delta_threshold: f64,
    severity_threshold: u8,
    seed: Option<u64>,
}

impl PixelAnomalyDetector {
    pub fn new(sample_count: usize) -> Self {
        Self {
            sample_count,
            delta_threshold: 100.0,
            severity_threshold: 15,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl SignalDetector for PixelAnomalyDetector {
    type Signal = PixelAnomalySignal;

    fn name(&self) -> &'static str {
        "Pixel Anomaly Detector"
    }

    fn evaluate(&self, input: &SignalInput<'_>) -> PixelAnomalySignal {
        let mut rng = sample_rng(self.seed);
        let (width, height) = (input.pixels.width(), input.pixels.height());

        // Sampled with replacement; a fresh draw per call.
        let mut anomalous = 0usize;
        for _ in 0..self.sample_count {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            if input.pixels.neighbor_delta(x, y) > self.delta_threshold {
                anomalous += 1;
            }
        }

        let severity = (100.0 * anomalous as f64 / self.sample_count as f64).round() as u8;
        let detected = severity > self.severity_threshold;

        let description = if detected {
            format!(
                "Sharp pixel discontinuities in {}% of sampled neighborhoods suggest cloning or splicing.",
                severity
            )
        } else {
            "Sampled pixel neighborhoods show no unusual discontinuities.".into()
        };

        PixelAnomalySignal {
            detected,
            severity,
            description,
        }
    }
}
