use crate::{
    landmarks::{face, hand, CapturedFrame, FaceFrame, HandFrame, Point3},
    NormalizationAnchor, NormalizerConfig,
};

/// Re-expresses hand landmarks in a position and scale invariant reference frame.
pub struct FrameNormalizer {
    anchor: NormalizationAnchor,
    use_nose_bridge: bool,
}
impl FrameNormalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        FrameNormalizer {
            anchor: config.anchor,
            use_nose_bridge: config.use_nose_bridge,
        }
    }
    pub fn normalize(&self, frame: &CapturedFrame) -> CapturedFrame {
        let face_reference = match self.anchor {
            NormalizationAnchor::Wrist => None,
            NormalizationAnchor::Face | NormalizationAnchor::FaceOrWrist => frame
                .face
                .as_ref()
                .and_then(|face_frame| self.face_reference(face_frame)),
        };
        let hands = match face_reference {
            Some((center, scale)) => frame
                .hands
                .iter()
                .map(|hand_frame| relative_to(hand_frame, center, scale))
                .collect(),
            None if self.anchor == NormalizationAnchor::Face => frame.hands.clone(),
            None => frame.hands.iter().map(wrist_relative).collect(),
        };
        CapturedFrame {
            timestamp: frame.timestamp,
            hands,
            face: frame.face.clone(),
        }
    }
    /// Face center and scale, None when the face can not anchor the hands.
    fn face_reference(&self, face_frame: &FaceFrame) -> Option<(Point3, f32)> {
        let points = &face_frame.landmarks;
        if points.len() < face::REQUIRED_POINTS {
            return None;
        }
        let left_eye = points[face::LEFT_EYE_CORNER];
        let right_eye = points[face::RIGHT_EYE_CORNER];
        let nose_tip = points[face::NOSE_TIP];
        let mut center = Point3::new(
            (left_eye.x + right_eye.x + nose_tip.x) / 3.,
            (left_eye.y + right_eye.y + nose_tip.y) / 3.,
            (left_eye.z + right_eye.z + nose_tip.z) / 3.,
        );
        if self.use_nose_bridge {
            center.y = (center.y + points[face::NOSE_BRIDGE].y) / 2.;
        }
        // the larger of both spans keeps the scale stable while the head turns
        let eye_span = left_eye.planar_distance(&right_eye);
        let face_height = points[face::FOREHEAD].planar_distance(&points[face::CHIN]);
        let scale = eye_span.max(face_height);
        if !scale.is_finite() || scale <= f32::EPSILON {
            return None;
        }
        Some((center, scale))
    }
}
fn relative_to(hand_frame: &HandFrame, center: Point3, scale: f32) -> HandFrame {
    HandFrame {
        landmarks: hand_frame
            .landmarks
            .iter()
            .map(|point| {
                Point3::new(
                    (point.x - center.x) / scale,
                    (point.y - center.y) / scale,
                    (point.z - center.z) / scale,
                )
            })
            .collect(),
        handedness: hand_frame.handedness,
    }
}
fn wrist_relative(hand_frame: &HandFrame) -> HandFrame {
    match hand_frame.landmarks.get(hand::WRIST) {
        Some(wrist) => relative_to(hand_frame, *wrist, 1.),
        None => hand_frame.clone(),
    }
}

#[cfg(test)]
fn test_face(scale_x: f32, scale_y: f32) -> FaceFrame {
    let mut landmarks = vec![Point3::new(0.5, 0.3, 0.); face::REQUIRED_POINTS + 4];
    landmarks[face::LEFT_EYE_CORNER] = Point3::new(0.5 - scale_x / 2., 0.3, 0.);
    landmarks[face::RIGHT_EYE_CORNER] = Point3::new(0.5 + scale_x / 2., 0.3, 0.);
    landmarks[face::NOSE_TIP] = Point3::new(0.5, 0.3, 0.);
    landmarks[face::NOSE_BRIDGE] = Point3::new(0.5, 0.3, 0.);
    landmarks[face::FOREHEAD] = Point3::new(0.5, 0.3 - scale_y / 2., 0.);
    landmarks[face::CHIN] = Point3::new(0.5, 0.3 + scale_y / 2., 0.);
    FaceFrame::new(landmarks)
}
#[cfg(test)]
fn test_hand() -> HandFrame {
    let landmarks = (0..21)
        .map(|i| Point3::new(0.6 + i as f32 * 0.01, 0.7, 0.1))
        .collect();
    HandFrame::new(landmarks, crate::Handedness::Left)
}

#[test]
fn normalizes_hands_against_the_face() {
    let normalizer = FrameNormalizer::new(&NormalizerConfig::default());
    let frame = CapturedFrame::new(0., vec![test_hand()], Some(test_face(0.1, 0.2)));
    let normalized = normalizer.normalize(&frame);
    // center (0.5, 0.3, 0.), scale is the face height
    let wrist = normalized.hands[0].landmarks[0];
    assert!((wrist.x - 0.5).abs() < 1e-5);
    assert!((wrist.y - 2.).abs() < 1e-5);
    assert!((wrist.z - 0.5).abs() < 1e-5);
    let frame = CapturedFrame::new(0., vec![test_hand()], Some(test_face(0.4, 0.2)));
    let wrist = normalizer.normalize(&frame).hands[0].landmarks[0];
    assert!((wrist.x - 0.25).abs() < 1e-5);
}

#[test]
fn passes_hands_through_without_a_usable_face() {
    let normalizer = FrameNormalizer::new(&NormalizerConfig::default());
    let frame = CapturedFrame::new(0., vec![test_hand()], None);
    assert_eq!(normalizer.normalize(&frame), frame);
    let short_face = FaceFrame::new(vec![Point3::default(); 10]);
    let frame = CapturedFrame::new(0., vec![test_hand()], Some(short_face));
    assert_eq!(normalizer.normalize(&frame), frame);
    let frame = CapturedFrame::new(0., vec![test_hand()], Some(test_face(0., 0.)));
    assert_eq!(normalizer.normalize(&frame), frame);
}

#[test]
fn falls_back_to_the_wrist() {
    let normalizer = FrameNormalizer::new(&NormalizerConfig {
        anchor: NormalizationAnchor::FaceOrWrist,
        use_nose_bridge: true,
    });
    let frame = CapturedFrame::new(0., vec![test_hand()], None);
    let normalized = normalizer.normalize(&frame);
    assert_eq!(normalized.hands[0].landmarks[0], Point3::new(0., 0., 0.));
    assert!((normalized.hands[0].landmarks[20].x - 0.2).abs() < 1e-5);
}

#[test]
fn averages_the_center_with_the_nose_bridge() {
    let mut face_frame = test_face(0.1, 0.2);
    face_frame.landmarks[face::NOSE_BRIDGE] = Point3::new(0.5, 0.5, 0.);
    let frame = CapturedFrame::new(0., vec![test_hand()], Some(face_frame));
    let wrist_y = |use_nose_bridge| {
        FrameNormalizer::new(&NormalizerConfig {
            anchor: NormalizationAnchor::Face,
            use_nose_bridge,
        })
        .normalize(&frame)
        .hands[0]
            .landmarks[0]
            .y
    };
    // center y is 0.3 alone, (0.3 + 0.5) / 2 with the bridge, scale 0.2
    assert!((wrist_y(false) - 2.).abs() < 1e-5);
    assert!((wrist_y(true) - 1.5).abs() < 1e-5);
}
