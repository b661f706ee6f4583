use log::{debug, warn};
use std::{
    borrow::Cow,
    panic::{self, AssertUnwindSafe},
    thread,
};

use crate::{
    landmarks::{CapturedFrame, GestureRecording},
    GestureComparator, SignspotterConfig, SignspotterError, SimilarityScore,
};

/// Outcome of comparing a candidate against one catalogue entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    pub sign_id: String,
    pub sign_name: String,
    /// Similarity in range 0 - 1.
    pub similarity: f32,
    /// Whether the similarity reaches the configured threshold.
    pub is_match: bool,
    pub dtw_similarity: f32,
    pub cosine_similarity: f32,
}

/// A recording with its feature sequence already extracted.
///
/// Only valid for a [Signspotter] built with the same configuration that prepared it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignReference {
    id: String,
    name: String,
    features: Vec<Vec<f32>>,
}
impl SignReference {
    pub fn get_id(&self) -> &str {
        &self.id
    }
    pub fn get_name(&self) -> &str {
        &self.name
    }
    pub fn get_features(&self) -> &[Vec<f32>] {
        &self.features
    }
}

trait CatalogueEntry: Sync {
    fn entry_id(&self) -> &str;
    fn entry_name(&self) -> &str;
    fn entry_features(&self, comparator: &GestureComparator) -> Cow<'_, [Vec<f32>]>;
}
impl CatalogueEntry for GestureRecording {
    fn entry_id(&self) -> &str {
        &self.id
    }
    fn entry_name(&self) -> &str {
        &self.name
    }
    fn entry_features(&self, comparator: &GestureComparator) -> Cow<'_, [Vec<f32>]> {
        Cow::Owned(comparator.prepare(&self.frames))
    }
}
impl CatalogueEntry for SignReference {
    fn entry_id(&self) -> &str {
        &self.id
    }
    fn entry_name(&self) -> &str {
        &self.name
    }
    fn entry_features(&self, _comparator: &GestureComparator) -> Cow<'_, [Vec<f32>]> {
        Cow::Borrowed(&self.features)
    }
}

/// Matches captured gestures against a catalogue of recorded ones.
///
/// ```
/// use signspotter::{Signspotter, SignspotterConfig};
/// let mut config = SignspotterConfig::default();
/// config.matcher.threshold = 0.85;
/// let signspotter = Signspotter::new(&config).unwrap();
/// assert!(signspotter.best_match(&[], &[]).is_none());
/// ```
pub struct Signspotter {
    comparator: GestureComparator,
    threshold: f32,
    single_thread: bool,
}
impl Signspotter {
    pub fn new(config: &SignspotterConfig) -> Result<Self, SignspotterError> {
        config.validate()?;
        Ok(Signspotter {
            comparator: GestureComparator::new(config),
            threshold: config.matcher.threshold,
            single_thread: config.matcher.single_thread,
        })
    }
    pub fn get_threshold(&self) -> f32 {
        self.threshold
    }
    pub fn get_comparator(&self) -> &GestureComparator {
        &self.comparator
    }
    /// Scores the candidate against every recording holding frames, best first.
    ///
    /// Ties keep the catalogue order. Returns nothing when the candidate has no usable frames.
    pub fn compare_all(
        &self,
        candidate: &[CapturedFrame],
        library: &[GestureRecording],
    ) -> Vec<ComparisonResult> {
        let entries = library
            .iter()
            .filter(|recording| !recording.frames.is_empty())
            .collect::<Vec<_>>();
        self.rank(candidate, &entries)
    }
    /// The top ranked recording, only when it matches.
    pub fn best_match(
        &self,
        candidate: &[CapturedFrame],
        library: &[GestureRecording],
    ) -> Option<ComparisonResult> {
        first_match(self.compare_all(candidate, library))
    }
    /// Extracts the recording features once so it can be compared repeatedly.
    /// Recordings without frames have nothing to compare against.
    pub fn prepare(&self, recording: &GestureRecording) -> Option<SignReference> {
        if recording.frames.is_empty() {
            return None;
        }
        Some(SignReference {
            id: recording.id.clone(),
            name: recording.name.clone(),
            features: self.comparator.prepare(&recording.frames),
        })
    }
    pub fn compare_references(
        &self,
        candidate: &[CapturedFrame],
        references: &[SignReference],
    ) -> Vec<ComparisonResult> {
        let entries = references.iter().collect::<Vec<_>>();
        self.rank(candidate, &entries)
    }
    pub fn best_reference_match(
        &self,
        candidate: &[CapturedFrame],
        references: &[SignReference],
    ) -> Option<ComparisonResult> {
        first_match(self.compare_references(candidate, references))
    }
    fn rank<E: CatalogueEntry>(
        &self,
        candidate: &[CapturedFrame],
        entries: &[&E],
    ) -> Vec<ComparisonResult> {
        if entries.is_empty() {
            return Vec::new();
        }
        let candidate_features = self.comparator.prepare(candidate);
        if candidate_features.is_empty() {
            debug!("candidate has no frames with a complete hand");
            return Vec::new();
        }
        let workers = thread::available_parallelism().map_or(1, |workers| workers.get());
        let scores: Vec<Result<SimilarityScore, SignspotterError>> =
            if self.single_thread || workers <= 1 || entries.len() <= 1 {
                entries
                    .iter()
                    .map(|entry| self.score_isolated(&candidate_features, *entry))
                    .collect()
            } else {
                let candidate_features = &candidate_features;
                thread::scope(|scope| {
                    entries
                        .chunks(chunk_size(entries.len(), workers))
                        .map(|chunk| {
                            let handle = scope.spawn(move || {
                                chunk
                                    .iter()
                                    .map(|entry| self.score_isolated(candidate_features, *entry))
                                    .collect::<Vec<_>>()
                            });
                            (chunk.len(), handle)
                        })
                        .collect::<Vec<_>>()
                        .into_iter()
                        .flat_map(|(chunk_len, handle)| {
                            handle.join().unwrap_or_else(|_| {
                                (0..chunk_len)
                                    .map(|_| Err(worker_error("scoring thread panicked")))
                                    .collect()
                            })
                        })
                        .collect()
                })
            };
        let mut results = entries
            .iter()
            .zip(scores)
            .filter_map(|(entry, score)| match score {
                Ok(score) => {
                    debug!(
                        "sign '{}' scored {} (dtw {}, cosine {})",
                        entry.entry_name(),
                        score.similarity,
                        score.dtw_similarity,
                        score.cosine_similarity
                    );
                    Some(ComparisonResult {
                        sign_id: entry.entry_id().to_string(),
                        sign_name: entry.entry_name().to_string(),
                        similarity: score.similarity,
                        is_match: score.similarity >= self.threshold,
                        dtw_similarity: score.dtw_similarity,
                        cosine_similarity: score.cosine_similarity,
                    })
                }
                Err(err) => {
                    warn!("skipping sign '{}': {}", entry.entry_id(), err);
                    None
                }
            })
            .collect::<Vec<_>>();
        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        results
    }
    /// Scores one entry, turning a panic into an error so the other entries still rank.
    fn score_isolated<E: CatalogueEntry>(
        &self,
        candidate_features: &[Vec<f32>],
        entry: &E,
    ) -> Result<SimilarityScore, SignspotterError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.score_entry(candidate_features, entry)
        }))
        .map_err(|_| worker_error("scoring panicked"))
    }
    fn score_entry<E: CatalogueEntry>(
        &self,
        candidate_features: &[Vec<f32>],
        entry: &E,
    ) -> SimilarityScore {
        let features = entry.entry_features(&self.comparator);
        self.comparator
            .compare_features(candidate_features, &features)
    }
}
fn first_match(results: Vec<ComparisonResult>) -> Option<ComparisonResult> {
    results.into_iter().next().filter(|result| result.is_match)
}
fn worker_error(message: &str) -> SignspotterError {
    SignspotterError::Worker(message.to_string())
}
/// Entries per worker so that at most `workers` threads are spawned.
fn chunk_size(entries: usize, workers: usize) -> usize {
    ((entries + workers - 1) / workers).max(1)
}

#[cfg(test)]
struct ScriptedEntry {
    id: String,
    features: Option<Vec<Vec<f32>>>,
}
#[cfg(test)]
impl CatalogueEntry for ScriptedEntry {
    fn entry_id(&self) -> &str {
        &self.id
    }
    fn entry_name(&self) -> &str {
        &self.id
    }
    fn entry_features(&self, _comparator: &GestureComparator) -> Cow<'_, [Vec<f32>]> {
        match &self.features {
            Some(features) => Cow::Borrowed(features),
            None => panic!("no features for {}", self.id),
        }
    }
}
#[cfg(test)]
fn test_candidate() -> Vec<CapturedFrame> {
    use crate::{HandFrame, Handedness, Point3};
    (0..8)
        .map(|index| {
            let landmarks = (0..21)
                .map(|joint| {
                    Point3::new(0.4 + joint as f32 * 0.01, 0.5 - index as f32 * 0.01, 0.)
                })
                .collect();
            CapturedFrame::new(
                index as f64,
                vec![HandFrame::new(landmarks, Handedness::Right)],
                None,
            )
        })
        .collect()
}

#[test]
fn splits_entries_across_workers() {
    assert_eq!(chunk_size(10, 4), 3);
    assert_eq!(chunk_size(8, 4), 2);
    assert_eq!(chunk_size(3, 8), 1);
    assert_eq!(chunk_size(0, 4), 1);
    assert_eq!((0..10).collect::<Vec<_>>().chunks(chunk_size(10, 4)).count(), 4);
}

#[test]
fn skips_entries_whose_scoring_panics() {
    let candidate = test_candidate();
    for single_thread in [true, false] {
        let mut config = SignspotterConfig::default();
        config.matcher.single_thread = single_thread;
        let signspotter = Signspotter::new(&config).unwrap();
        let features = signspotter.get_comparator().prepare(&candidate);
        let entries = ["first", "broken", "last"]
            .iter()
            .map(|id| ScriptedEntry {
                id: id.to_string(),
                features: if *id == "broken" {
                    None
                } else {
                    Some(features.clone())
                },
            })
            .collect::<Vec<_>>();
        let entries = entries.iter().collect::<Vec<_>>();
        let results = signspotter.rank(&candidate, &entries);
        let ids = results
            .iter()
            .map(|result| result.sign_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["first", "last"]);
        assert!(results.iter().all(|result| result.is_match));
    }
}
