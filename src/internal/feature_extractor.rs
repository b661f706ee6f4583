use crate::{
    constants::{HAND_FEATURES, MAX_HANDS},
    landmarks::{hand, CapturedFrame, HandFrame},
    FeaturesConfig,
};

/// Distances that describe the hand shape regardless of its rotation.
const SHAPE_DISTANCES: [[usize; 2]; 5] = [
    [hand::THUMB_TIP, hand::INDEX_FINGER_TIP],
    [hand::INDEX_FINGER_TIP, hand::MIDDLE_FINGER_TIP],
    [hand::MIDDLE_FINGER_TIP, hand::RING_FINGER_TIP],
    [hand::RING_FINGER_TIP, hand::PINKY_TIP],
    [hand::WRIST, hand::MIDDLE_FINGER_TIP],
];

/// Converts a normalized frame into a fixed length feature vector.
///
/// Each hand, in detection order, fills a segment with its landmark coordinates,
/// the wrist to fingertip angles and the shape distances. Missing or incomplete
/// hands leave their segment zeroed.
pub struct FeatureExtractor {
    feature_length: usize,
    landmark_weights: [f32; 21],
}
impl FeatureExtractor {
    pub fn new(config: &FeaturesConfig) -> Self {
        let mut landmark_weights = [1.; 21];
        for index in hand::KEY_LANDMARKS {
            landmark_weights[index] = config.key_landmark_weight;
        }
        FeatureExtractor {
            feature_length: config.feature_length,
            landmark_weights,
        }
    }
    pub fn extract(&self, frame: &CapturedFrame) -> Vec<f32> {
        let mut features = Vec::with_capacity(MAX_HANDS * HAND_FEATURES);
        for slot in 0..MAX_HANDS {
            match frame.hands.get(slot).filter(|hand_frame| hand_frame.is_valid()) {
                Some(hand_frame) => self.append_hand_features(hand_frame, &mut features),
                None => features.resize(features.len() + HAND_FEATURES, 0.),
            }
        }
        features.resize(self.feature_length, 0.);
        for feature in features.iter_mut() {
            if !feature.is_finite() {
                *feature = 0.;
            }
        }
        features
    }
    pub fn extract_sequence(&self, frames: &[CapturedFrame]) -> Vec<Vec<f32>> {
        frames.iter().map(|frame| self.extract(frame)).collect()
    }
    fn append_hand_features(&self, hand_frame: &HandFrame, features: &mut Vec<f32>) {
        let points = &hand_frame.landmarks;
        for (point, weight) in points.iter().zip(self.landmark_weights) {
            features.extend_from_slice(&[point.x * weight, point.y * weight, point.z * weight]);
        }
        let wrist = points[hand::WRIST];
        for tip in hand::FINGERTIPS {
            features.push((points[tip].y - wrist.y).atan2(points[tip].x - wrist.x));
        }
        for [from, to] in SHAPE_DISTANCES {
            features.push(points[from].distance(&points[to]));
        }
    }
}

#[cfg(test)]
fn test_hand(offset: f32) -> HandFrame {
    use crate::landmarks::{Handedness, Point3};
    let landmarks = (0..21)
        .map(|i| Point3::new(offset + i as f32 * 0.01, offset - i as f32 * 0.02, 0.))
        .collect();
    HandFrame::new(landmarks, Handedness::Right)
}

#[test]
fn keeps_the_configured_length() {
    let extractor = FeatureExtractor::new(&FeaturesConfig::default());
    for hands in [vec![], vec![test_hand(0.2)], vec![test_hand(0.2), test_hand(0.5)]] {
        let features = extractor.extract(&CapturedFrame::new(0., hands, None));
        assert_eq!(features.len(), FeaturesConfig::default().feature_length);
    }
    let extractor = FeatureExtractor::new(&FeaturesConfig {
        feature_length: 140,
        key_landmark_weight: 1.5,
    });
    let frame = CapturedFrame::new(0., vec![test_hand(0.2), test_hand(0.5)], None);
    assert_eq!(extractor.extract(&frame).len(), 140);
}

#[test]
fn zeroes_missing_hands() {
    let extractor = FeatureExtractor::new(&FeaturesConfig::default());
    let empty = extractor.extract(&CapturedFrame::new(0., vec![], None));
    assert!(empty.iter().all(|feature| *feature == 0.));
    let mut partial = test_hand(0.2);
    partial.landmarks.truncate(15);
    let features = extractor.extract(&CapturedFrame::new(0., vec![partial], None));
    assert!(features.iter().all(|feature| *feature == 0.));
    let features = extractor.extract(&CapturedFrame::new(0., vec![test_hand(0.2)], None));
    assert!(features[..HAND_FEATURES].iter().any(|feature| *feature != 0.));
    assert!(features[HAND_FEATURES..].iter().all(|feature| *feature == 0.));
}

#[test]
fn encodes_weighted_coordinates_angles_and_distances() {
    let extractor = FeatureExtractor::new(&FeaturesConfig::default());
    let hand = test_hand(0.2);
    let features = extractor.extract(&CapturedFrame::new(0., vec![hand.clone()], None));
    // wrist is a key landmark
    assert_eq!(features[0], 0.2 * 1.5);
    // landmark 1 is not
    assert_eq!(features[3], hand.landmarks[1].x);
    let angle = (-0.02f32 * 4.).atan2(0.01 * 4.);
    assert!((features[63] - angle).abs() < 1e-5);
    let thumb_to_index = hand.landmarks[4].distance(&hand.landmarks[8]);
    assert!((features[68] - thumb_to_index).abs() < 1e-6);
}

#[test]
fn replaces_non_finite_values() {
    let extractor = FeatureExtractor::new(&FeaturesConfig::default());
    let mut hand = test_hand(0.2);
    hand.landmarks[3].x = f32::NAN;
    let features = extractor.extract(&CapturedFrame::new(0., vec![hand], None));
    assert!(features.iter().all(|feature| feature.is_finite()));
    assert_eq!(features[9], 0.);
}
