mod comparator;
mod config;
mod constants;
mod error;
mod internal;
mod landmarks;
mod matcher;
pub use comparator::GestureComparator;
pub use config::ComparatorConfig;
pub use config::FeaturesConfig;
pub use config::MatcherConfig;
pub use config::NormalizationAnchor;
pub use config::NormalizerConfig;
pub use config::ResamplerConfig;
pub use config::SignspotterConfig;
pub use constants::{
    COMPARATOR_DEFAULT_DTW_WEIGHT, COMPARATOR_DEFAULT_MAX_EXPECTED_DISTANCE,
    COMPARATOR_DEFAULT_SHARPENING, FEATURES_DEFAULT_KEY_LANDMARK_WEIGHT, FEATURES_DEFAULT_LENGTH,
    MATCHER_DEFAULT_THRESHOLD, RESAMPLER_DEFAULT_MIN_QUALITY_FRAMES,
    RESAMPLER_DEFAULT_TARGET_FRAMES,
};
pub use error::SignspotterError;
pub use internal::{cosine_similarity, euclidean_distance, SimilarityScore};
pub use landmarks::{
    face, hand, CapturedFrame, FaceFrame, GestureRecording, HandFrame, Handedness, Point3,
};
pub use matcher::ComparisonResult;
pub use matcher::SignReference;
pub use matcher::Signspotter;
