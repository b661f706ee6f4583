mod common;

use common::{gesture, hand, init_logger, recording, DOWN, UP};
use signspotter::{
    CapturedFrame, GestureRecording, Signspotter, SignspotterConfig, SignspotterError,
};

fn hello() -> Vec<CapturedFrame> {
    gesture(30, (0.3, 0.7), (0.6, 0.5), UP, 0.3)
}

fn unrelated_library() -> Vec<GestureRecording> {
    vec![
        recording("1", "thanks", gesture(40, (0.3, 0.7), (0.6, 0.5), DOWN, 0.3)),
        recording("2", "please", gesture(25, (0.5, 0.4), (0.5, 0.8), DOWN, 0.2)),
        recording("3", "sorry", gesture(45, (0.7, 0.5), (0.2, 0.5), DOWN, 0.4)),
        recording("4", "yes", gesture(30, (0.4, 0.4), (0.4, 0.4), DOWN, 0.1)),
        recording("5", "no", gesture(50, (0.2, 0.2), (0.8, 0.8), DOWN, 0.5)),
    ]
}

#[test]
fn it_matches_an_identical_recording() {
    init_logger();
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let mut library = unrelated_library();
    library.insert(2, recording("hello-id", "hello", hello()));
    let best = signspotter.best_match(&hello(), &library).unwrap();
    assert_eq!(best.sign_id, "hello-id");
    assert_eq!(best.sign_name, "hello");
    assert!(best.is_match);
    assert!(best.similarity >= signspotter.get_threshold());
}

#[test]
fn it_ranks_unmatched_recordings_without_a_best_match() {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let library = unrelated_library();
    let results = signspotter.compare_all(&hello(), &library);
    assert_eq!(results.len(), 5);
    assert!(results
        .windows(2)
        .all(|pair| pair[0].similarity >= pair[1].similarity));
    assert!(results.iter().all(|result| !result.is_match));
    assert!(signspotter.best_match(&hello(), &library).is_none());
}

#[test]
fn it_returns_nothing_for_candidates_without_complete_hands() {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let library = unrelated_library();
    let mut partial_hand = hand(0.5, 0.5, UP, 0.3);
    partial_hand.landmarks.truncate(12);
    let candidate = (0..20)
        .map(|index| CapturedFrame::new(index as f64, vec![partial_hand.clone()], None))
        .collect::<Vec<_>>();
    assert!(signspotter.compare_all(&candidate, &library).is_empty());
    assert!(signspotter.compare_all(&[], &library).is_empty());
    assert!(signspotter.compare_all(&hello(), &[]).is_empty());
    assert!(signspotter.best_match(&candidate, &library).is_none());
}

#[test]
fn it_skips_recordings_without_frames() {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let library = vec![
        recording("empty", "empty", vec![]),
        recording("no-hands", "no hands", vec![CapturedFrame::new(0., vec![], None); 10]),
        recording("hello-id", "hello", hello()),
    ];
    let results = signspotter.compare_all(&hello(), &library);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].sign_id, "hello-id");
    assert_eq!(results[1].sign_id, "no-hands");
    assert_eq!(results[1].similarity, 0.);
    assert!(!results[1].is_match);
}

#[test]
fn it_keeps_catalogue_order_on_ties() {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let library = vec![
        recording("a", "first copy", hello()),
        recording("b", "other", gesture(40, (0.3, 0.7), (0.6, 0.5), DOWN, 0.3)),
        recording("c", "second copy", hello()),
    ];
    let results = signspotter.compare_all(&hello(), &library);
    let ids = results
        .iter()
        .map(|result| result.sign_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "c", "b"]);
}

#[test]
fn it_ranks_the_same_in_a_single_thread() {
    let mut config = SignspotterConfig::default();
    let threaded = Signspotter::new(&config).unwrap();
    config.matcher.single_thread = true;
    let single_thread = Signspotter::new(&config).unwrap();
    let mut library = unrelated_library();
    library.push(recording("hello-id", "hello", hello()));
    assert_eq!(
        threaded.compare_all(&hello(), &library),
        single_thread.compare_all(&hello(), &library)
    );
}

#[test]
fn it_compares_against_prepared_references() {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let mut library = unrelated_library();
    library.push(recording("hello-id", "hello", hello()));
    let references = library
        .iter()
        .filter_map(|recording| signspotter.prepare(recording))
        .collect::<Vec<_>>();
    assert_eq!(references[5].get_id(), "hello-id");
    assert_eq!(references[5].get_features().len(), 60);
    assert_eq!(
        signspotter.compare_references(&hello(), &references),
        signspotter.compare_all(&hello(), &library)
    );
    let best = signspotter
        .best_reference_match(&hello(), &references)
        .unwrap();
    assert_eq!(best.sign_name, "hello");
    assert!(signspotter
        .prepare(&recording("empty", "empty", vec![]))
        .is_none());
}

#[test]
fn it_applies_the_configured_threshold() {
    let mut config = SignspotterConfig::default();
    config.matcher.threshold = 0.;
    let signspotter = Signspotter::new(&config).unwrap();
    let results = signspotter.compare_all(&hello(), &unrelated_library());
    assert!(results.iter().all(|result| result.is_match));
    assert!(signspotter
        .best_match(&hello(), &unrelated_library())
        .is_some());
}

#[test]
fn it_rejects_invalid_configurations() {
    let mut config = SignspotterConfig::default();
    config.comparator.max_expected_distance = 0.;
    assert!(matches!(
        Signspotter::new(&config),
        Err(SignspotterError::InvalidConfig(_))
    ));
}
