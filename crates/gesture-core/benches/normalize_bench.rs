use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gesture_core::{
    normalize, Frame, LabelMap, NormalizerConfig, DEFAULT_FRAME_WIDTH, KEYPOINTS_PER_HAND,
};

fn wide_hand() -> Frame {
    let keypoints: Vec<[f64; 3]> = (0..KEYPOINTS_PER_HAND)
        .map(|k| [300.0 + 17.0 * k as f64, 400.0 + 3.0 * k as f64, 25.0])
        .collect();
    Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH)
}

fn bench_normalize_accept(c: &mut Criterion) {
    let config = NormalizerConfig::default();
    let frame = wide_hand();
    c.bench_function("normalize (accepted)", |b| {
        b.iter(|| {
            let mut work = frame.clone();
            normalize(black_box(&mut work), &config).unwrap()
        })
    });
}

fn bench_normalize_reject(c: &mut Criterion) {
    let config = NormalizerConfig::default();
    let keypoints = vec![[540.0, 300.0, 20.0]; KEYPOINTS_PER_HAND];
    let frame = Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH);
    c.bench_function("normalize (rejected)", |b| {
        b.iter(|| {
            let mut work = frame.clone();
            normalize(black_box(&mut work), &config).unwrap()
        })
    });
}

fn bench_from_keypoints(c: &mut Criterion) {
    let keypoints = vec![[540.0, 300.0, 20.0]; KEYPOINTS_PER_HAND];
    c.bench_function("Frame::from_keypoints", |b| {
        b.iter(|| Frame::from_keypoints(black_box(&keypoints), DEFAULT_FRAME_WIDTH))
    });
}

fn bench_one_hot(c: &mut Criterion) {
    let labels =
        LabelMap::from_names((0..15).map(|i| format!("Gesture{i}"))).unwrap();
    c.bench_function("LabelMap::one_hot", |b| {
        b.iter(|| labels.one_hot(black_box(7)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_normalize_accept,
    bench_normalize_reject,
    bench_from_keypoints,
    bench_one_hot,
);
criterion_main!(benches);
