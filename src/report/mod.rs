use serde::Serialize;

use crate::{AnalysisResult, ResultType};

/// Flat serializable view of an analysis, ready for the persistence and
/// report collaborators.
#[derive(Serialize)]
pub struct JsonReport {
    pub result_type: ResultType,
    pub manipulation_score: u8,
    pub trust_score: u8,
    pub explanation: String,
    pub signals: SignalReportSection,
    pub heatmap_region_count: usize,
    pub metadata: MetadataReportSection,
    pub processing_time_ms: u64,
}

#[derive(Serialize)]
pub struct SignalReportSection {
    pub pixel_anomaly_detected: bool,
    pub pixel_anomaly_severity: u8,
    pub lighting_consistent: bool,
    pub lighting_score: u8,
    pub ai_artifact_detected: bool,
    pub ai_artifact_confidence: u8,
    pub metadata_flag_count: usize,
    pub color_diversity_logical: bool,
    pub color_diversity_score: u8,
}

#[derive(Serialize)]
pub struct MetadataReportSection {
    pub has_exif: bool,
    pub camera: Option<String>,
    pub software: Option<String>,
    pub date_time: Option<String>,
    pub flags: Vec<String>,
}

impl From<&AnalysisResult> for JsonReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            result_type: result.result_type,
            manipulation_score: result.manipulation_score,
            trust_score: result.trust_score,
            explanation: result.explanation.clone(),
            signals: SignalReportSection {
                pixel_anomaly_detected: result.signals.pixel_anomaly.detected,
                pixel_anomaly_severity: result.signals.pixel_anomaly.severity,
                lighting_consistent: result.signals.lighting.consistent,
                lighting_score: result.signals.lighting.score,
                ai_artifact_detected: result.signals.ai_artifact.detected,
                ai_artifact_confidence: result.signals.ai_artifact.confidence,
                metadata_flag_count: result.signals.metadata.flags.len(),
                color_diversity_logical: result.signals.color_diversity.logical,
                color_diversity_score: result.signals.color_diversity.score,
            },
            heatmap_region_count: result.heatmap.len(),
            metadata: MetadataReportSection {
                has_exif: result.metadata.has_exif,
                camera: result.metadata.camera.clone(),
                software: result.metadata.software.clone(),
                date_time: result.metadata.date_time.clone(),
                flags: result.metadata.flags.clone(),
            },
            processing_time_ms: result.processing_time_ms,
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
