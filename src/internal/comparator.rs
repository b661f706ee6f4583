use log::debug;
use std::cmp;

use super::Dtw;
use crate::ComparatorConfig;

/// Blended similarity of two feature sequences.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityScore {
    /// Final score in range 0 - 1.
    pub similarity: f32,
    /// Similarity derived from the normalized alignment cost, in range 0 - 1.
    pub dtw_similarity: f32,
    /// Mean per frame cosine similarity over the overlapping frames.
    pub cosine_similarity: f32,
}

pub struct FeatureComparator {
    max_expected_distance: f32,
    dtw_weight: f32,
    sharpening: Option<f32>,
}
impl FeatureComparator {
    pub fn new(config: &ComparatorConfig) -> Self {
        FeatureComparator {
            max_expected_distance: config.max_expected_distance,
            dtw_weight: config.dtw_weight,
            sharpening: config.sharpening,
        }
    }
    pub fn compare(&self, a: &[Vec<f32>], b: &[Vec<f32>]) -> SimilarityScore {
        if a.is_empty() || b.is_empty() {
            return SimilarityScore::default();
        }
        let dtw_similarity = self.dtw_similarity(a, b);
        let cosine_similarity = mean_cosine_similarity(a, b);
        let blended =
            self.dtw_weight * dtw_similarity + (1. - self.dtw_weight) * cosine_similarity;
        let mut similarity = finite_or_zero(blended).clamp(0., 1.);
        if let Some(exponent) = self.sharpening {
            similarity = finite_or_zero(similarity.powf(exponent)).clamp(0., 1.);
        }
        SimilarityScore {
            similarity,
            dtw_similarity,
            cosine_similarity,
        }
    }
    pub fn calculate_distance(ax: &[f32], bx: &[f32]) -> f32 {
        euclidean_distance(ax, bx)
    }
    fn dtw_similarity(&self, a: &[Vec<f32>], b: &[Vec<f32>]) -> f32 {
        let mut dtw = Dtw::new(FeatureComparator::calculate_distance);
        let cost = dtw.compute_optimal_path(
            &a.iter().map(|item| &item[..]).collect::<Vec<_>>(),
            &b.iter().map(|item| &item[..]).collect::<Vec<_>>(),
        );
        let normalized_cost = cost / (a.len() + b.len()) as f32;
        if !normalized_cost.is_finite() {
            debug!("discarding non finite alignment cost {}", normalized_cost);
            return 0.;
        }
        (1. - normalized_cost / self.max_expected_distance).clamp(0., 1.)
    }
}

/// L2 distance, infinity when the vectors differ in length.
pub fn euclidean_distance(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    if vector_a.len() != vector_b.len() {
        return f32::INFINITY;
    }
    vector_a
        .iter()
        .zip(vector_b)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f32>()
        .sqrt()
}

/// Cosine of the angle between both vectors, 0 when either has no magnitude.
pub fn cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    finite_or_zero(raw_cosine_similarity(vector_a, vector_b))
}

/// Like [cosine_similarity] but NaN when the magnitude overflows or is not a number.
fn raw_cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    let dimensionality = cmp::min(vector_a.len(), vector_b.len());
    let mut dot_ab = 0.;
    let mut dot_a = 0.;
    let mut dot_b = 0.;
    for dimension in 0..dimensionality {
        let component_a = vector_a[dimension];
        let component_b = vector_b[dimension];
        dot_ab += component_a * component_b;
        dot_a += component_a * component_a;
        dot_b += component_b * component_b;
    }
    let magnitude = f32::sqrt(dot_a * dot_b);
    if !magnitude.is_finite() {
        f32::NAN
    } else if magnitude == 0. {
        0.
    } else {
        dot_ab / magnitude
    }
}

/// Mean cosine similarity over the overlapping prefix, non finite frames are skipped.
fn mean_cosine_similarity(a: &[Vec<f32>], b: &[Vec<f32>]) -> f32 {
    let similarities = a
        .iter()
        .zip(b)
        .map(|(frame_a, frame_b)| raw_cosine_similarity(frame_a, frame_b))
        .filter(|similarity| similarity.is_finite())
        .collect::<Vec<_>>();
    if similarities.is_empty() {
        0.
    } else {
        similarities.iter().sum::<f32>() / similarities.len() as f32
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.
    }
}

#[test]
fn measures_euclidean_distance() {
    assert_eq!(euclidean_distance(&[0., 0.], &[3., 4.]), 5.);
    assert_eq!(euclidean_distance(&[1., 2.], &[1., 2.]), 0.);
    assert_eq!(euclidean_distance(&[1., 2.], &[1.]), f32::INFINITY);
}

#[test]
fn measures_cosine_similarity() {
    assert_eq!(cosine_similarity(&[1., 0.], &[0., 1.]), 0.);
    assert_eq!(cosine_similarity(&[2., 0.], &[1., 0.]), 1.);
    assert_eq!(cosine_similarity(&[1., 0.], &[-1., 0.]), -1.);
    assert_eq!(cosine_similarity(&[0., 0.], &[1., 1.]), 0.);
    assert_eq!(cosine_similarity(&[f32::NAN, 1.], &[1., 1.]), 0.);
    assert_eq!(cosine_similarity(&[1e20, 1.], &[1e20, 1.]), 0.);
}

#[test]
fn skips_frames_with_overflowing_cosine() {
    let comparator = FeatureComparator::new(&ComparatorConfig {
        max_expected_distance: 10.,
        dtw_weight: 0.,
        sharpening: None,
    });
    let sequence = vec![vec![1e20, 1.], vec![1., 0.]];
    let score = comparator.compare(&sequence, &sequence);
    assert_eq!(score.cosine_similarity, 1.);
    assert_eq!(score.similarity, 1.);
    // every frame overflowing leaves nothing to average
    let sequence = vec![vec![1e20, 1.]];
    assert_eq!(comparator.compare(&sequence, &sequence).cosine_similarity, 0.);
}

#[test]
fn identical_sequences_score_one() {
    let comparator = FeatureComparator::new(&ComparatorConfig::default());
    let sequence = vec![vec![0.1, 0.4, 0.3], vec![0.2, 0.1, 0.7], vec![0.9, 0.3, 0.2]];
    let score = comparator.compare(&sequence, &sequence);
    assert_eq!(score.dtw_similarity, 1.);
    assert!(score.similarity > 0.999 && score.similarity <= 1.);
}

#[test]
fn blends_and_sharpens() {
    let comparator = FeatureComparator::new(&ComparatorConfig {
        max_expected_distance: 10.,
        dtw_weight: 0.6,
        sharpening: Some(2.),
    });
    // single frames 5 apart: normalized cost 5 / 2, cosine 0
    let score = comparator.compare(&[vec![0., 3.]], &[vec![4., 0.]]);
    assert!((score.dtw_similarity - 0.75).abs() < 1e-6);
    assert_eq!(score.cosine_similarity, 0.);
    assert!((score.similarity - 0.45 * 0.45).abs() < 1e-6);
}

#[test]
fn empty_or_degenerate_sequences_score_zero() {
    let comparator = FeatureComparator::new(&ComparatorConfig::default());
    assert_eq!(comparator.compare(&[], &[vec![1.]]), SimilarityScore::default());
    assert_eq!(comparator.compare(&[vec![1.]], &[]), SimilarityScore::default());
    let score = comparator.compare(&[vec![f32::INFINITY]], &[vec![1.]]);
    assert_eq!(score.similarity, 0.);
    // opposite directions drive the blend negative, clamped to 0
    let score = comparator.compare(&[vec![1000., 0.]], &[vec![-1000., 0.]]);
    assert_eq!(score.similarity, 0.);
}
