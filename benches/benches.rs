#[macro_use]
extern crate bencher;

use bencher::Bencher;
use signspotter::{
    CapturedFrame, GestureRecording, HandFrame, Handedness, Point3, Signspotter,
    SignspotterConfig,
};

fn sweep(frames: usize, offset: f32, direction: f32) -> Vec<CapturedFrame> {
    (0..frames)
        .map(|index| {
            let x = offset + index as f32 * 0.005;
            let landmarks = (0..21)
                .map(|landmark| {
                    let reach = 0.01 * landmark as f32;
                    Point3::new(x + reach * direction.cos(), 0.6 + reach * direction.sin(), 0.)
                })
                .collect();
            CapturedFrame::new(
                index as f64 / 30.,
                vec![HandFrame::new(landmarks, Handedness::Right)],
                None,
            )
        })
        .collect()
}

fn library(entries: usize) -> Vec<GestureRecording> {
    (0..entries)
        .map(|index| {
            GestureRecording::new(
                index.to_string(),
                format!("sign {}", index),
                sweep(30 + index, 0.1 + index as f32 * 0.01, index as f32 * 0.3),
            )
        })
        .collect()
}

fn compare_catalogue(bench: &mut Bencher) {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let library = library(20);
    let candidate = sweep(45, 0.2, 1.);
    bench.iter(|| signspotter.compare_all(&candidate, &library));
}

fn compare_catalogue_single_thread(bench: &mut Bencher) {
    let mut config = SignspotterConfig::default();
    config.matcher.single_thread = true;
    let signspotter = Signspotter::new(&config).unwrap();
    let library = library(20);
    let candidate = sweep(45, 0.2, 1.);
    bench.iter(|| signspotter.compare_all(&candidate, &library));
}

fn compare_prepared_references(bench: &mut Bencher) {
    let signspotter = Signspotter::new(&SignspotterConfig::default()).unwrap();
    let references = library(20)
        .iter()
        .filter_map(|recording| signspotter.prepare(recording))
        .collect::<Vec<_>>();
    let candidate = sweep(45, 0.2, 1.);
    bench.iter(|| signspotter.compare_references(&candidate, &references));
}

benchmark_group!(
    benches,
    compare_catalogue,
    compare_catalogue_single_thread,
    compare_prepared_references
);
benchmark_main!(benches);
