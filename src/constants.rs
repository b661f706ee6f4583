pub(crate) const HAND_LANDMARKS: usize = 21;
pub(crate) const MAX_HANDS: usize = 2;
pub(crate) const HAND_COORDINATE_FEATURES: usize = HAND_LANDMARKS * 3;
pub(crate) const HAND_ANGLE_FEATURES: usize = 5;
pub(crate) const HAND_DISTANCE_FEATURES: usize = 5;
pub(crate) const HAND_FEATURES: usize =
    HAND_COORDINATE_FEATURES + HAND_ANGLE_FEATURES + HAND_DISTANCE_FEATURES;

pub const RESAMPLER_DEFAULT_TARGET_FRAMES: usize = 60;
pub const RESAMPLER_DEFAULT_MIN_QUALITY_FRAMES: usize = 5;
pub const FEATURES_DEFAULT_LENGTH: usize = 156;
pub const FEATURES_DEFAULT_KEY_LANDMARK_WEIGHT: f32 = 1.5;
pub const COMPARATOR_DEFAULT_MAX_EXPECTED_DISTANCE: f32 = 10.;
pub const COMPARATOR_DEFAULT_DTW_WEIGHT: f32 = 0.7;
pub const COMPARATOR_DEFAULT_SHARPENING: f32 = 1.5;
pub const MATCHER_DEFAULT_THRESHOLD: f32 = 0.8;
