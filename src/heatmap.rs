use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::signals::sample_rng;

const MAX_REGIONS: usize = 8;
const REGION_DIVISOR: u32 = 20;

/// Fractional bounding box over the image, with a 0-1 intensity. Regions are
/// decorative overlays, not a localization of detected anomalies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatmapRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub intensity: f64,
}

pub struct HeatmapSynthesizer {
    seed: Option<u64>,
}

impl HeatmapSynthesizer {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Derives the region count from the pixel-anomaly severity and
    /// AI-artifact confidence, then draws each region's placement uniformly.
    pub fn synthesize(&self, anomaly_severity: u8, ai_confidence: u8) -> Vec<HeatmapRegion> {
        let count = ((anomaly_severity as u32 + ai_confidence as u32) / REGION_DIVISOR) as usize;
        let count = count.min(MAX_REGIONS);

        let mut rng = sample_rng(self.seed);
        (0..count)
            .map(|_| HeatmapRegion {
                x: rng.gen_range(0.0..0.8),
                y: rng.gen_range(0.0..0.8),
                width: rng.gen_range(0.1..0.25),
                height: rng.gen_range(0.1..0.25),
                intensity: rng.gen_range(0.3..1.0),
            })
            .collect()
    }
}

impl Default for HeatmapSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
