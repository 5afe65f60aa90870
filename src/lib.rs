use std::{
    path::Path,
    sync::mpsc,
    thread,
    time::{Duration, Instant, UNIX_EPOCH},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AuthenticityError, Result},
    heatmap::{HeatmapRegion, HeatmapSynthesizer},
    metadata::exif::ExifSummarizer,
    pixels::PixelBuffer,
    signals::{
        SignalDetector, SignalInput, ai_artifact::AiArtifactDetector,
        color_diversity::ColorDiversityDetector, lighting::LightingConsistencyDetector,
        metadata::MetadataPlausibilityDetector, pixel_anomaly::PixelAnomalyDetector,
    },
};

pub mod aggregate;
pub mod error;
pub mod heatmap;
pub mod metadata;
pub mod pixels;
pub mod report;
pub mod signals;

/// File-level facts about the source, independent of pixel content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFacts {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub byte_size: u64,
    /// Last modification time in epoch milliseconds; `None` or zero counts
    /// as missing.
    pub modified_ms: Option<u64>,
}

impl FileFacts {
    /// Derives facts from a file on disk, guessing the MIME type from the
    /// extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "jpg" | "jpeg" => Some("image/jpeg"),
                "png" => Some("image/png"),
                "webp" => Some("image/webp"),
                "gif" => Some("image/gif"),
                "bmp" => Some("image/bmp"),
                "tif" | "tiff" => Some("image/tiff"),
                _ => None,
            })
            .map(String::from);

        let modified_ms = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64);

        Ok(Self {
            file_name,
            mime_type,
            byte_size: meta.len(),
            modified_ms,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelAnomalySignal {
    pub detected: bool,
    pub severity: u8,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingSignal {
    pub consistent: bool,
    pub score: u8,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiArtifactSignal {
    pub detected: bool,
    pub confidence: u8,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSignal {
    pub authentic: bool,
    pub flags: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorDiversitySignal {
    pub logical: bool,
    pub score: u8,
    pub description: String,
}

/// Outputs of the five independent detectors for one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSet {
    pub pixel_anomaly: PixelAnomalySignal,
    pub lighting: LightingSignal,
    pub ai_artifact: AiArtifactSignal,
    pub metadata: MetadataSignal,
    pub color_diversity: ColorDiversitySignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSummary {
    pub has_exif: bool,
    pub camera: Option<String>,
    pub software: Option<String>,
    pub date_time: Option<String>,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Real,
    Edited,
    AiGenerated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub result_type: ResultType,
    pub manipulation_score: u8,
    pub trust_score: u8,
    pub explanation: String,
    pub signals: SignalSet,
    pub heatmap: Vec<HeatmapRegion>,
    pub metadata: MetadataSummary,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub anomaly_samples: usize,
    pub smoothness_samples: usize,
    pub symmetry_trials: usize,
    pub parallel: bool,
    /// Fixed seed for the sampling detectors and heatmap; `None` keeps the
    /// documented per-call non-determinism.
    pub seed: Option<u64>,
    /// Upper bound on decode time; `None` decodes inline without a guard.
    pub decode_timeout: Option<Duration>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            anomaly_samples: 1000,
            smoothness_samples: 1000,
            symmetry_trials: 50,
            parallel: true,
            seed: None,
            decode_timeout: None,
        }
    }
}

/// Stateless analysis entry point: decodes the image, fans the five signal
/// detectors out over the shared buffer, then aggregates their outputs into
/// a verdict. Separate calls share nothing and are safe to run concurrently.
pub struct AuthenticityAnalyzer {
    config: AnalyzerConfig,
}

impl AuthenticityAnalyzer {
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, bytes: &[u8], facts: &FileFacts) -> Result<AnalysisResult> {
        let started = Instant::now();

        let pixels = self.decode(bytes)?;
        let input = SignalInput {
            pixels: &pixels,
            facts,
        };

        let signals = if self.config.parallel {
            self.run_detectors_parallel(&input)
        } else {
            self.run_detectors_sequential(&input)
        };

        let verdict = aggregate::combine(&signals);

        let heatmap = HeatmapSynthesizer::new()
            .with_seed(self.lane_seed(5))
            .synthesize(
                signals.pixel_anomaly.severity,
                signals.ai_artifact.confidence,
            );

        let metadata = ExifSummarizer::summarize(bytes, signals.metadata.flags.clone());

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            "analyzed '{}' in {}ms: {:?} (manipulation {})",
            facts.file_name, processing_time_ms, verdict.result_type, verdict.manipulation_score
        );

        Ok(AnalysisResult {
            result_type: verdict.result_type,
            manipulation_score: verdict.manipulation_score,
            trust_score: verdict.trust_score,
            explanation: verdict.explanation,
            signals,
            heatmap,
            metadata,
            processing_time_ms,
        })
    }

    /// Convenience wrapper that derives [`FileFacts`] from the file itself.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult> {
        let facts = FileFacts::from_path(&path)?;
        let bytes = std::fs::read(&path)?;
        self.analyze(&bytes, &facts)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        match self.config.decode_timeout {
            None => PixelBuffer::decode(bytes),
            Some(timeout) => {
                let owned = bytes.to_vec();
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || {
                    let _ = tx.send(PixelBuffer::decode(&owned));
                });
                rx.recv_timeout(timeout)
                    .unwrap_or(Err(AuthenticityError::Timeout(timeout)))
            }
        }
    }

    fn detectors(
        &self,
    ) -> (
        PixelAnomalyDetector,
        LightingConsistencyDetector,
        AiArtifactDetector,
        MetadataPlausibilityDetector,
        ColorDiversityDetector,
    ) {
        (
            PixelAnomalyDetector::new(self.config.anomaly_samples).with_seed(self.lane_seed(0)),
            LightingConsistencyDetector::new(),
            AiArtifactDetector::new(self.config.symmetry_trials, self.config.smoothness_samples)
                .with_seed(self.lane_seed(1)),
            MetadataPlausibilityDetector::new(),
            ColorDiversityDetector::new(),
        )
    }

    fn run_detectors_parallel(&self, input: &SignalInput<'_>) -> SignalSet {
        let (anomaly, lighting, ai, meta, diversity) = self.detectors();

        let (pixel_anomaly, (lighting, (ai_artifact, (metadata, color_diversity)))) = rayon::join(
            || anomaly.evaluate(input),
            || {
                rayon::join(
                    || lighting.evaluate(input),
                    || {
                        rayon::join(
                            || ai.evaluate(input),
                            || rayon::join(|| meta.evaluate(input), || diversity.evaluate(input)),
                        )
                    },
                )
            },
        );

        SignalSet {
            pixel_anomaly,
            lighting,
            ai_artifact,
            metadata,
            color_diversity,
        }
    }

    fn run_detectors_sequential(&self, input: &SignalInput<'_>) -> SignalSet {
        let (anomaly, lighting, ai, meta, diversity) = self.detectors();

        let pixel_anomaly = anomaly.evaluate(input);
        debug!("{} complete", anomaly.name());
        let lighting = lighting.evaluate(input);
        let ai_artifact = ai.evaluate(input);
        debug!("{} complete", ai.name());
        let metadata = meta.evaluate(input);
        let color_diversity = diversity.evaluate(input);

        SignalSet {
            pixel_anomaly,
            lighting,
            ai_artifact,
            metadata,
            color_diversity,
        }
    }

    // Each sampling site gets its own derived seed so parallel scheduling
    // cannot reorder draws between detectors.
    fn lane_seed(&self, lane: u64) -> Option<u64> {
        self.config
            .seed
            .map(|seed| seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(lane))
    }
}

impl Default for AuthenticityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
