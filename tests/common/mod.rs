#![allow(dead_code)]
use std::f32::consts::FRAC_PI_2;

use signspotter::{
    face, CapturedFrame, FaceFrame, GestureRecording, HandFrame, Handedness, Point3,
};

/// Fingers pointing to the top of the image.
pub const UP: f32 = -FRAC_PI_2;
/// Fingers pointing to the bottom of the image.
pub const DOWN: f32 = FRAC_PI_2;

pub fn init_logger() {
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init();
}

/// A hand with straight fingers fanned around `direction`.
pub fn hand(wrist_x: f32, wrist_y: f32, direction: f32, spread: f32) -> HandFrame {
    let mut landmarks = vec![Point3::new(wrist_x, wrist_y, 0.); 21];
    for finger in 0..5 {
        let angle = direction + (finger as f32 - 2.) * spread;
        for joint in 1..=4 {
            let reach = 0.03 * joint as f32;
            landmarks[finger * 4 + joint] = Point3::new(
                wrist_x + reach * angle.cos(),
                wrist_y + reach * angle.sin(),
                -0.01 * joint as f32,
            );
        }
    }
    HandFrame::new(landmarks, Handedness::Right)
}

/// One hand travelling in a straight line from `from` to `to`.
pub fn gesture(
    frames: usize,
    from: (f32, f32),
    to: (f32, f32),
    direction: f32,
    spread: f32,
) -> Vec<CapturedFrame> {
    (0..frames)
        .map(|index| {
            let t = if frames > 1 {
                index as f32 / (frames - 1) as f32
            } else {
                0.
            };
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            CapturedFrame::new(
                index as f64 / 30.,
                vec![hand(x, y, direction, spread)],
                None,
            )
        })
        .collect()
}

/// A face mesh centered at the given point, `size` wide between the eye corners.
pub fn face_mesh(center_x: f32, center_y: f32, size: f32) -> FaceFrame {
    let mut landmarks = vec![Point3::new(center_x, center_y, 0.); 468];
    landmarks[face::LEFT_EYE_CORNER] = Point3::new(center_x - size / 2., center_y, 0.);
    landmarks[face::RIGHT_EYE_CORNER] = Point3::new(center_x + size / 2., center_y, 0.);
    landmarks[face::FOREHEAD] = Point3::new(center_x, center_y - size * 0.6, 0.);
    landmarks[face::CHIN] = Point3::new(center_x, center_y + size * 0.6, 0.);
    FaceFrame::new(landmarks)
}

pub fn with_face(frames: Vec<CapturedFrame>, face: &FaceFrame) -> Vec<CapturedFrame> {
    frames
        .into_iter()
        .map(|mut frame| {
            frame.face = Some(face.clone());
            frame
        })
        .collect()
}

/// Scales every landmark of the sequence by `factor` around `pivot`.
pub fn zoom(frames: &[CapturedFrame], pivot: (f32, f32), factor: f32) -> Vec<CapturedFrame> {
    let zoom_point = |point: &Point3| {
        Point3::new(
            pivot.0 + (point.x - pivot.0) * factor,
            pivot.1 + (point.y - pivot.1) * factor,
            point.z * factor,
        )
    };
    frames
        .iter()
        .map(|frame| CapturedFrame {
            timestamp: frame.timestamp,
            hands: frame
                .hands
                .iter()
                .map(|hand| {
                    HandFrame::new(
                        hand.landmarks.iter().map(zoom_point).collect(),
                        hand.handedness,
                    )
                })
                .collect(),
            face: frame
                .face
                .as_ref()
                .map(|face| FaceFrame::new(face.landmarks.iter().map(zoom_point).collect())),
        })
        .collect()
}

pub fn recording(id: &str, name: &str, frames: Vec<CapturedFrame>) -> GestureRecording {
    GestureRecording::new(id.to_string(), name.to_string(), frames)
}
