mod comparator;
mod dtw;
mod feature_extractor;
mod frame_normalizer;
mod sequence_resampler;
pub use comparator::{cosine_similarity, euclidean_distance, SimilarityScore};
pub(crate) use comparator::FeatureComparator;
pub(crate) use dtw::Dtw;
pub(crate) use feature_extractor::FeatureExtractor;
pub(crate) use frame_normalizer::FrameNormalizer;
pub(crate) use sequence_resampler::SequenceResampler;
