use log::debug;

use crate::{
    internal::{FeatureComparator, FeatureExtractor, FrameNormalizer, SequenceResampler},
    landmarks::CapturedFrame,
    SignspotterConfig, SimilarityScore,
};

/// Scores how closely two landmark sequences perform the same gesture.
///
/// Every sequence goes through the same steps: frames without a complete hand are dropped,
/// the rest are resampled to a fixed length, normalized, and turned into feature vectors.
/// The two feature sequences are then aligned with DTW and compared frame by frame with
/// cosine similarity. Comparisons never fail; degenerate input scores 0.
pub struct GestureComparator {
    normalizer: FrameNormalizer,
    resampler: SequenceResampler,
    extractor: FeatureExtractor,
    feature_comparator: FeatureComparator,
}
impl GestureComparator {
    pub fn new(config: &SignspotterConfig) -> Self {
        GestureComparator {
            normalizer: FrameNormalizer::new(&config.normalizer),
            resampler: SequenceResampler::new(&config.resampler),
            extractor: FeatureExtractor::new(&config.features),
            feature_comparator: FeatureComparator::new(&config.comparator),
        }
    }
    /// Similarity in range 0 - 1.
    pub fn score(
        &self,
        first_sequence: &[CapturedFrame],
        second_sequence: &[CapturedFrame],
    ) -> f32 {
        self.compare(first_sequence, second_sequence).similarity
    }
    /// Similarity together with the DTW and cosine components it blends.
    pub fn compare(
        &self,
        first_sequence: &[CapturedFrame],
        second_sequence: &[CapturedFrame],
    ) -> SimilarityScore {
        let first_features = self.prepare(first_sequence);
        let second_features = self.prepare(second_sequence);
        self.compare_features(&first_features, &second_features)
    }
    /// Compares sequences already turned into features by [GestureComparator::prepare].
    pub fn compare_features(
        &self,
        first_features: &[Vec<f32>],
        second_features: &[Vec<f32>],
    ) -> SimilarityScore {
        if first_features.is_empty() || second_features.is_empty() {
            debug!("rejecting comparison against a sequence without usable frames");
            return SimilarityScore::default();
        }
        self.feature_comparator
            .compare(first_features, second_features)
    }
    /// Resamples, normalizes and extracts the feature vectors of a sequence.
    pub fn prepare(&self, frames: &[CapturedFrame]) -> Vec<Vec<f32>> {
        let normalized_frames = self
            .resample(frames)
            .iter()
            .map(|frame| self.normalize(frame))
            .collect::<Vec<_>>();
        self.extractor.extract_sequence(&normalized_frames)
    }
    pub fn normalize(&self, frame: &CapturedFrame) -> CapturedFrame {
        self.normalizer.normalize(frame)
    }
    pub fn resample(&self, frames: &[CapturedFrame]) -> Vec<CapturedFrame> {
        self.resampler.resample(frames)
    }
    pub fn extract(&self, frame: &CapturedFrame) -> Vec<f32> {
        self.extractor.extract(frame)
    }
}
