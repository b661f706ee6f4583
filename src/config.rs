use crate::{
    constants::{
        COMPARATOR_DEFAULT_DTW_WEIGHT, COMPARATOR_DEFAULT_MAX_EXPECTED_DISTANCE,
        COMPARATOR_DEFAULT_SHARPENING, FEATURES_DEFAULT_KEY_LANDMARK_WEIGHT,
        FEATURES_DEFAULT_LENGTH, MATCHER_DEFAULT_THRESHOLD, RESAMPLER_DEFAULT_MIN_QUALITY_FRAMES,
        RESAMPLER_DEFAULT_TARGET_FRAMES,
    },
    SignspotterError,
};

/// Reference frame used to express hand coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationAnchor {
    /// Relative to the face; coordinates pass through unchanged when no face is usable.
    Face,
    /// Relative to the face, falling back to wrist-relative coordinates.
    FaceOrWrist,
    /// Always relative to the wrist of each hand.
    Wrist,
}
#[cfg(feature = "display")]
impl std::fmt::Display for NormalizationAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            NormalizationAnchor::Face => write!(f, "face"),
            NormalizationAnchor::FaceOrWrist => write!(f, "face-or-wrist"),
            NormalizationAnchor::Wrist => write!(f, "wrist"),
        }
    }
}
#[cfg(feature = "display")]
impl std::str::FromStr for NormalizationAnchor {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "face" => Ok(Self::Face),
            "face-or-wrist" => Ok(Self::FaceOrWrist),
            "wrist" => Ok(Self::Wrist),
            _ => Err("Unknown normalization anchor".to_string()),
        }
    }
}
/// Configures how frames are re-expressed before feature extraction.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Reference frame for hand coordinates.
    pub anchor: NormalizationAnchor,
    /// Average the nose bridge into the vertical component of the face center.
    pub use_nose_bridge: bool,
}
impl Default for NormalizerConfig {
    fn default() -> NormalizerConfig {
        NormalizerConfig {
            anchor: NormalizationAnchor::Face,
            use_nose_bridge: true,
        }
    }
}
/// Configures the fixed-length sequence resampling.
#[derive(Debug, Clone)]
pub struct ResamplerConfig {
    /// Number of frames every sequence is mapped to.
    pub target_frames: usize,
    /// Sequences with fewer frames holding a complete hand are not resampled.
    pub min_quality_frames: usize,
}
impl Default for ResamplerConfig {
    fn default() -> ResamplerConfig {
        ResamplerConfig {
            target_frames: RESAMPLER_DEFAULT_TARGET_FRAMES,
            min_quality_frames: RESAMPLER_DEFAULT_MIN_QUALITY_FRAMES,
        }
    }
}
/// Configures the per frame feature vector.
#[derive(Debug, Clone)]
pub struct FeaturesConfig {
    /// Exact length of every feature vector, zero-padded or truncated.
    pub feature_length: usize,
    /// Multiplier applied to the wrist and fingertip coordinates.
    pub key_landmark_weight: f32,
}
impl Default for FeaturesConfig {
    fn default() -> FeaturesConfig {
        FeaturesConfig {
            feature_length: FEATURES_DEFAULT_LENGTH,
            key_landmark_weight: FEATURES_DEFAULT_KEY_LANDMARK_WEIGHT,
        }
    }
}
/// Configures how the alignment cost and the cosine similarity become a single score.
#[derive(Debug, Clone)]
pub struct ComparatorConfig {
    /// Normalized DTW cost mapped to a similarity of 0.
    pub max_expected_distance: f32,
    /// Weight of the DTW similarity, the cosine similarity gets the remainder.
    pub dtw_weight: f32,
    /// Exponent (> 1) applied to the blended score. None disables it.
    pub sharpening: Option<f32>,
}
impl Default for ComparatorConfig {
    fn default() -> ComparatorConfig {
        ComparatorConfig {
            max_expected_distance: COMPARATOR_DEFAULT_MAX_EXPECTED_DISTANCE,
            dtw_weight: COMPARATOR_DEFAULT_DTW_WEIGHT,
            sharpening: Some(COMPARATOR_DEFAULT_SHARPENING),
        }
    }
}
/// Configures the catalogue matching.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum similarity (in range 0 - 1) to consider a gesture matched.
    pub threshold: f32,
    /// Unless enabled, catalogue entries are scored in separate threads.
    pub single_thread: bool,
}
impl Default for MatcherConfig {
    fn default() -> MatcherConfig {
        MatcherConfig {
            threshold: MATCHER_DEFAULT_THRESHOLD,
            single_thread: false,
        }
    }
}
/// Encapsulates all the tool configurations.
#[derive(Debug, Clone, Default)]
pub struct SignspotterConfig {
    pub normalizer: NormalizerConfig,
    pub resampler: ResamplerConfig,
    pub features: FeaturesConfig,
    pub comparator: ComparatorConfig,
    pub matcher: MatcherConfig,
}
impl SignspotterConfig {
    pub fn validate(&self) -> Result<(), SignspotterError> {
        if self.resampler.target_frames == 0 {
            return Err(invalid("resampler.target_frames must be at least 1"));
        }
        if self.features.feature_length == 0 {
            return Err(invalid("features.feature_length must be at least 1"));
        }
        if !self.features.key_landmark_weight.is_finite() {
            return Err(invalid("features.key_landmark_weight must be finite"));
        }
        let max_distance = self.comparator.max_expected_distance;
        if !max_distance.is_finite() || max_distance <= 0. {
            return Err(invalid("comparator.max_expected_distance must be positive"));
        }
        if !(0. ..=1.).contains(&self.comparator.dtw_weight) {
            return Err(invalid("comparator.dtw_weight must be in range 0 - 1"));
        }
        if let Some(exponent) = self.comparator.sharpening {
            if !exponent.is_finite() || exponent < 1. {
                return Err(invalid("comparator.sharpening must be at least 1"));
            }
        }
        if !(0. ..=1.).contains(&self.matcher.threshold) {
            return Err(invalid("matcher.threshold must be in range 0 - 1"));
        }
        Ok(())
    }
}
fn invalid(msg: &str) -> SignspotterError {
    SignspotterError::InvalidConfig(msg.to_string())
}

#[test]
fn default_config_is_valid() {
    assert!(SignspotterConfig::default().validate().is_ok());
}

#[test]
fn rejects_out_of_range_values() {
    let mut config = SignspotterConfig::default();
    config.matcher.threshold = 1.2;
    assert!(config.validate().is_err());
    let mut config = SignspotterConfig::default();
    config.resampler.target_frames = 0;
    assert!(config.validate().is_err());
    let mut config = SignspotterConfig::default();
    config.comparator.sharpening = Some(0.5);
    assert!(config.validate().is_err());
    let mut config = SignspotterConfig::default();
    config.comparator.dtw_weight = f32::NAN;
    assert!(config.validate().is_err());
}
