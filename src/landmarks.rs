use crate::constants::HAND_LANDMARKS;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hand landmark indices, as laid out by the hand detector.
pub mod hand {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;
    /// Fingertips, thumb first.
    pub const FINGERTIPS: [usize; 5] = [
        THUMB_TIP,
        INDEX_FINGER_TIP,
        MIDDLE_FINGER_TIP,
        RING_FINGER_TIP,
        PINKY_TIP,
    ];
    /// Shape-defining points: the wrist and the fingertips.
    pub const KEY_LANDMARKS: [usize; 6] = [
        WRIST,
        THUMB_TIP,
        INDEX_FINGER_TIP,
        MIDDLE_FINGER_TIP,
        RING_FINGER_TIP,
        PINKY_TIP,
    ];
}

/// Face mesh indices used to build the facial reference frame.
pub mod face {
    pub const FOREHEAD: usize = 10;
    pub const NOSE_TIP: usize = 1;
    pub const NOSE_BRIDGE: usize = 168;
    pub const CHIN: usize = 152;
    pub const LEFT_EYE_CORNER: usize = 33;
    pub const RIGHT_EYE_CORNER: usize = 263;
    /// Minimum amount of points a face frame needs to carry every index above.
    pub const REQUIRED_POINTS: usize = RIGHT_EYE_CORNER + 1;
}

/// A landmark position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Point3 { x, y, z }
    }
    pub fn distance(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
    /// Distance ignoring depth.
    pub fn planar_distance(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

/// Landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandFrame {
    pub landmarks: Vec<Point3>,
    pub handedness: Handedness,
}
impl HandFrame {
    pub fn new(landmarks: Vec<Point3>, handedness: Handedness) -> Self {
        HandFrame {
            landmarks,
            handedness,
        }
    }
    /// Only complete detections are usable; partial ones are never padded.
    pub fn is_valid(&self) -> bool {
        self.landmarks.len() == HAND_LANDMARKS
    }
}

/// Face mesh landmarks, topology defined by the face detector.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceFrame {
    pub landmarks: Vec<Point3>,
}
impl FaceFrame {
    pub fn new(landmarks: Vec<Point3>) -> Self {
        FaceFrame { landmarks }
    }
}

/// One keyframe produced by the landmark detector.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapturedFrame {
    pub timestamp: f64,
    pub hands: Vec<HandFrame>,
    pub face: Option<FaceFrame>,
}
impl CapturedFrame {
    pub fn new(timestamp: f64, hands: Vec<HandFrame>, face: Option<FaceFrame>) -> Self {
        CapturedFrame {
            timestamp,
            hands,
            face,
        }
    }
    pub fn has_valid_hand(&self) -> bool {
        self.hands.iter().any(HandFrame::is_valid)
    }
}

/// A stored reference gesture.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureRecording {
    pub id: String,
    pub name: String,
    pub frames: Vec<CapturedFrame>,
}
impl GestureRecording {
    pub fn new(id: String, name: String, frames: Vec<CapturedFrame>) -> Self {
        GestureRecording { id, name, frames }
    }
    pub fn valid_frame_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.has_valid_hand())
            .count()
    }
}

#[test]
fn hand_frames_need_every_landmark() {
    let complete = HandFrame::new(vec![Point3::default(); 21], Handedness::Right);
    let partial = HandFrame::new(vec![Point3::default(); 20], Handedness::Right);
    assert!(complete.is_valid());
    assert!(!partial.is_valid());
    let frame = CapturedFrame::new(0., vec![partial.clone()], None);
    assert!(!frame.has_valid_hand());
    let frame = CapturedFrame::new(0., vec![partial, complete], None);
    assert!(frame.has_valid_hand());
}

#[test]
fn planar_distance_ignores_depth() {
    let a = Point3::new(0., 0., 0.);
    let b = Point3::new(3., 4., 12.);
    assert_eq!(a.planar_distance(&b), 5.);
    assert_eq!(a.distance(&b), 13.);
}
