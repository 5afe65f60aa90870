pub mod ai_artifact;
pub mod color_diversity;
pub mod lighting;
pub mod metadata;
pub mod pixel_anomaly;

use rand::{SeedableRng, rngs::StdRng};

use crate::{FileFacts, pixels::PixelBuffer};

/// Shared read-only input handed to every detector. Detectors may consume the
/// pixel buffer, the file facts, or both, but never mutate either.
#[derive(Clone, Copy)]
pub struct SignalInput<'a> {
    pub pixels: &'a PixelBuffer,
    pub facts: &'a FileFacts,
}

/// One independent heuristic test. Detectors are stateless given their
/// configuration; sampling detectors draw fresh randomness per call unless a
/// seed was injected.
pub trait SignalDetector {
    type Signal;

    fn name(&self) -> &'static str;

    fn evaluate(&self, input: &SignalInput<'_>) -> Self::Signal;
}

/// Seeded RNG when a seed is supplied (tests), entropy-backed otherwise
/// (production keeps the documented non-determinism).
pub(crate) fn sample_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
