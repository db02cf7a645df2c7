//! Integration test: Frame round-trip from capture triples through
//! normalization.
//!
//! Tests that a frame can be built from keypoint triples, normalized
//! into the canonical box, and read back without data corruption.

use gesture_core::{
    normalize, Frame, NormalizeOutcome, NormalizeReject, NormalizerConfig,
    DEFAULT_FRAME_WIDTH, KEYPOINTS_PER_HAND, LANDMARK_COORDS,
};

/// A hand whose keypoints spread evenly from `left` over `width`.
fn spread_keypoints(left: f64, width: f64) -> Vec<[f64; 3]> {
    (0..KEYPOINTS_PER_HAND)
        .map(|k| {
            let t = k as f64 / (KEYPOINTS_PER_HAND - 1) as f64;
            [left + width * t, 400.0 + 80.0 * t, 20.0]
        })
        .collect()
}

#[test]
fn frame_build_normalize_read_roundtrip() {
    // A hand spanning x in [300, 840]: half of a 1080-wide image
    let mut frame = Frame::from_keypoints(&spread_keypoints(300.0, 540.0), DEFAULT_FRAME_WIDTH);

    let outcome = normalize(&mut frame, &NormalizerConfig::default())
        .expect("normalize should succeed");
    assert_eq!(outcome, NormalizeOutcome::Accepted);

    // Verify the canonical box
    let min_x = frame.xs().fold(f64::INFINITY, f64::min);
    let max_x = frame.xs().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(min_x, 0.0);
    assert!((max_x - 400.0).abs() <= 0.01);

    // Verify depth is gone and padding untouched
    assert!(frame.zs().all(|z| z == 0.0));
    assert_eq!(frame.values[LANDMARK_COORDS..], [0.0; 63]);
}

#[test]
fn rejected_frame_survives_bit_for_bit() {
    // 54 of 1080 units: 5% of the image, under the 10% floor
    let mut frame = Frame::from_keypoints(&spread_keypoints(500.0, 54.0), DEFAULT_FRAME_WIDTH);
    let before = frame.clone();

    let outcome = normalize(&mut frame, &NormalizerConfig::default())
        .expect("normalize should succeed");
    assert!(matches!(
        outcome,
        NormalizeOutcome::Rejected(NormalizeReject::TooNarrow { .. })
    ));

    let bits_before: Vec<u64> = before.values.iter().map(|v| v.to_bits()).collect();
    let bits_after: Vec<u64> = frame.values.iter().map(|v| v.to_bits()).collect();
    assert_eq!(bits_before, bits_after);
}

#[test]
fn normalization_is_idempotent_up_to_rounding() {
    let mut frame = Frame::from_keypoints(&spread_keypoints(200.0, 400.0), DEFAULT_FRAME_WIDTH);
    normalize(&mut frame, &NormalizerConfig::default()).unwrap();
    let first_pass = frame.clone();

    // A normalized frame spans 400 of "image width" 1080: wide enough
    // to be accepted again, and already in the canonical box.
    normalize(&mut frame, &NormalizerConfig::default()).unwrap();
    for (a, b) in first_pass.values.iter().zip(frame.values.iter()) {
        assert!((a - b).abs() <= 0.02, "drifted from {a} to {b}");
    }
}
