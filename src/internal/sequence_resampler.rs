use log::debug;

use crate::{landmarks::CapturedFrame, ResamplerConfig};

/// Maps a variable-length sequence to a fixed number of frames by nearest-index selection.
pub struct SequenceResampler {
    target_frames: usize,
    min_quality_frames: usize,
}
impl SequenceResampler {
    pub fn new(config: &ResamplerConfig) -> Self {
        SequenceResampler {
            target_frames: config.target_frames,
            min_quality_frames: config.min_quality_frames,
        }
    }
    /// Frames without a complete hand are discarded first. When too few remain the
    /// survivors are returned unresampled, so the length is not guaranteed downstream.
    pub fn resample(&self, frames: &[CapturedFrame]) -> Vec<CapturedFrame> {
        if frames.is_empty() {
            return Vec::new();
        }
        let valid_frames = frames
            .iter()
            .filter(|frame| frame.has_valid_hand())
            .collect::<Vec<_>>();
        if valid_frames.len() < self.min_quality_frames {
            debug!(
                "only {} of {} frames hold a complete hand, skipping resampling",
                valid_frames.len(),
                frames.len()
            );
            return valid_frames.into_iter().cloned().collect();
        }
        source_indices(valid_frames.len(), self.target_frames)
            .into_iter()
            .map(|index| valid_frames[index].clone())
            .collect()
    }
}
/// Source index picked for every output index. Rounds half away from zero.
pub(crate) fn source_indices(source_len: usize, target: usize) -> Vec<usize> {
    if source_len == 0 {
        return Vec::new();
    }
    let step = if target > 1 {
        (source_len - 1) as f64 / (target - 1) as f64
    } else {
        0.
    };
    (0..target)
        .map(|index| ((index as f64 * step).round() as usize).min(source_len - 1))
        .collect()
}

#[cfg(test)]
fn frame_with_hand(timestamp: f64, landmarks: usize) -> CapturedFrame {
    use crate::landmarks::{HandFrame, Handedness, Point3};
    CapturedFrame::new(
        timestamp,
        vec![HandFrame::new(
            vec![Point3::default(); landmarks],
            Handedness::Right,
        )],
        None,
    )
}

#[test]
fn rounds_half_away_from_zero() {
    // 3 frames to 5: step 0.5, indices 0, 0.5, 1, 1.5, 2
    assert_eq!(source_indices(3, 5), vec![0, 1, 1, 2, 2]);
    // 4 frames to 3: step 1.5, indices 0, 1.5, 3
    assert_eq!(source_indices(4, 3), vec![0, 2, 3]);
    assert_eq!(source_indices(10, 1), vec![0]);
    assert_eq!(source_indices(1, 4), vec![0, 0, 0, 0]);
    assert_eq!(source_indices(6, 3), vec![0, 3, 5]);
}

#[test]
fn resamples_to_the_target_length() {
    let resampler = SequenceResampler::new(&ResamplerConfig {
        target_frames: 50,
        min_quality_frames: 5,
    });
    for len in [5, 40, 60, 120] {
        let frames = (0..len)
            .map(|i| frame_with_hand(i as f64, 21))
            .collect::<Vec<_>>();
        let resampled = resampler.resample(&frames);
        assert_eq!(resampled.len(), 50);
        assert_eq!(resampled[0].timestamp, 0.);
        assert_eq!(resampled[49].timestamp, (len - 1) as f64);
        assert_eq!(resampled, resampler.resample(&frames));
    }
    assert!(resampler.resample(&[]).is_empty());
}

#[test]
fn skips_frames_without_a_complete_hand() {
    let resampler = SequenceResampler::new(&ResamplerConfig {
        target_frames: 10,
        min_quality_frames: 3,
    });
    let frames = vec![
        frame_with_hand(0., 21),
        frame_with_hand(1., 12),
        frame_with_hand(2., 21),
        CapturedFrame::new(3., vec![], None),
    ];
    let resampled = resampler.resample(&frames);
    assert_eq!(
        resampled.iter().map(|f| f.timestamp).collect::<Vec<_>>(),
        vec![0., 2.]
    );
    let frames = vec![frame_with_hand(0., 12); 8];
    assert!(resampler.resample(&frames).is_empty());
}
