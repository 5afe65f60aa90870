use log::debug;

use crate::{ResultType, SignalSet};

const ANOMALY_WEIGHT: f64 = 0.25;
const LIGHTING_WEIGHT: f64 = 0.2;
const AI_WEIGHT: f64 = 0.35;
const FLAG_WEIGHT: f64 = 5.0;
const DIVERSITY_WEIGHT: f64 = 0.2;

const AI_PRIORITY_CONFIDENCE: u8 = 70;
const EDITED_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Verdict {
    pub result_type: ResultType,
    pub manipulation_score: u8,
    pub trust_score: u8,
    pub explanation: String,
}

/// Combines the five signal results into the final verdict using a fixed
/// linear weighting. The trust score is derived from the raw manipulation
/// score before either is clamped to [0, 100].
pub fn combine(signals: &SignalSet) -> Verdict {
    let raw = signals.pixel_anomaly.severity as f64 * ANOMALY_WEIGHT
        + (100.0 - signals.lighting.score as f64) * LIGHTING_WEIGHT
        + signals.ai_artifact.confidence as f64 * AI_WEIGHT
        + signals.metadata.flags.len() as f64 * FLAG_WEIGHT
        + (100.0 - signals.color_diversity.score as f64) * DIVERSITY_WEIGHT;

    let manipulation = raw.round();
    let trust = 100.0 - manipulation;

    let (result_type, explanation) = classify(signals, manipulation);

    debug!(
        "aggregated manipulation={} trust={} verdict={:?}",
        manipulation, trust, result_type
    );

    Verdict {
        result_type,
        manipulation_score: manipulation.clamp(0.0, 100.0) as u8,
        trust_score: trust.clamp(0.0, 100.0) as u8,
        explanation,
    }
}

// Priority order: a confident AI-artifact signal wins outright, then the
// weighted score decides between edited and real.
fn classify(signals: &SignalSet, manipulation: f64) -> (ResultType, String) {
    let ai = &signals.ai_artifact;

    if ai.detected && ai.confidence > AI_PRIORITY_CONFIDENCE {
        let explanation = format!(
            "{} Overall manipulation score: {:.0}/100.",
            ai.description, manipulation
        );
        return (ResultType::AiGenerated, explanation);
    }

    if manipulation > EDITED_THRESHOLD {
        let mut reasons: Vec<&str> = Vec::new();
        if signals.pixel_anomaly.detected {
            reasons.push(&signals.pixel_anomaly.description);
        }
        if !signals.lighting.consistent {
            reasons.push(&signals.lighting.description);
        }
        if !signals.metadata.authentic {
            reasons.push(&signals.metadata.description);
        }

        let explanation = if reasons.is_empty() {
            "Several weak signals together point to possible editing.".into()
        } else {
            reasons.join(" ")
        };
        return (ResultType::Edited, explanation);
    }

    (
        ResultType::Real,
        "No significant signs of manipulation were found.".into(),
    )
}
