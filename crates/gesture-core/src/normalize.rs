//! Landmark normalization.
//!
//! Captured coordinates depend on where the hand sat in the picture
//! and how close it was to the camera. Training wants position- and
//! scale-invariant input, so each frame is translated against its own
//! bounding box and rescaled into a canonical box of fixed width, with
//! coordinates rounded to two decimals. Depth is not trustworthy at
//! capture quality and is zeroed outright.
//!
//! Frames whose hand is degenerate (zero-width box) or too small a
//! sliver of the image to carry signal are rejected untouched; the
//! caller decides what a rejection means (the migration tool drops the
//! frame, which later starves the sample's window).

use crate::error::GestureError;
use crate::frame::Frame;
use crate::{COORDS_PER_KEYPOINT, LANDMARK_COORDS};

/// Tunables for landmark normalization.
///
/// `image_width` is the width of the capture image in the same units
/// as the frame's coordinates — 1080 for the camera setup this
/// pipeline grew up with, `1.0` for sources that already emit
/// coordinates as fractions of the image. `target_width` is the width
/// of the canonical box frames are rescaled into. Hands narrower than
/// `min_width_fraction` of the image are rejected as noise.
///
/// # Example
///
/// ```
/// use gesture_core::NormalizerConfig;
///
/// let config = NormalizerConfig::default();
/// assert_eq!(config.image_width, 1080.0);
/// assert_eq!(config.target_width, 400.0);
/// assert_eq!(config.min_width_fraction, 0.1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NormalizerConfig {
    /// Width of the capture image, in coordinate units.
    pub image_width: f64,
    /// Width of the canonical box frames are rescaled into.
    pub target_width: f64,
    /// Minimum hand width as a fraction of the image; narrower frames
    /// are rejected.
    pub min_width_fraction: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            image_width: 1080.0,
            target_width: 400.0,
            min_width_fraction: 0.1,
        }
    }
}

/// What [`normalize`] did to a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizeOutcome {
    /// The frame was rescaled in place.
    Accepted,
    /// The frame did not qualify and was left untouched.
    Rejected(NormalizeReject),
}

impl NormalizeOutcome {
    /// Returns `true` for [`NormalizeOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, NormalizeOutcome::Accepted)
    }
}

/// Why a frame was rejected rather than rescaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizeReject {
    /// All x coordinates coincide; the bounding box has no width.
    ZeroWidth,
    /// The hand spans less than the configured fraction of the image.
    TooNarrow { width_fraction: f64 },
}

impl std::fmt::Display for NormalizeReject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeReject::ZeroWidth => write!(f, "bounding box has zero width"),
            NormalizeReject::TooNarrow { width_fraction } => {
                write!(f, "hand spans only {width_fraction:.3} of the image width")
            }
        }
    }
}

/// Rescales a frame's landmarks into the canonical bounding box.
///
/// With `left = min(x)`, `top = min(y)` and
/// `width_fraction = (max(x) - left) / image_width`, acceptance
/// rewrites the first 63 values in place:
///
/// - `x' = round2(scale * (x - left))`
/// - `y' = round2(scale * (y - top))`
/// - `z' = 0`
///
/// where `scale = target_width / (image_width * width_fraction)` and
/// `round2` rounds to two decimals. After acceptance the transformed
/// x-coordinates start at 0 and span exactly `target_width`, give or
/// take the 0.01 the rounding can introduce. Padding beyond the first
/// hand is never touched. Rejected frames are returned bit-identical.
///
/// # Errors
///
/// Returns [`GestureError::FrameTooShort`] if the frame has fewer than
/// [`LANDMARK_COORDS`] values; such a frame is malformed rather than
/// merely unsuitable.
///
/// # Example
///
/// ```
/// use gesture_core::{normalize, Frame, NormalizerConfig, KEYPOINTS_PER_HAND};
///
/// // A hand spanning x in [300, 650]: 32% of a 1080-wide image.
/// let mut keypoints = vec![[300.0, 400.0, 25.0]; KEYPOINTS_PER_HAND];
/// keypoints[20] = [650.0, 700.0, 25.0];
/// let mut frame = Frame::from_keypoints(&keypoints, 126);
///
/// let outcome = normalize(&mut frame, &NormalizerConfig::default()).unwrap();
/// assert!(outcome.is_accepted());
///
/// let xs: Vec<f64> = frame.xs().collect();
/// let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
/// let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
/// assert_eq!(min, 0.0);
/// assert!((max - 400.0).abs() <= 0.01);
/// assert!(frame.zs().all(|z| z == 0.0));
/// ```
pub fn normalize(
    frame: &mut Frame,
    config: &NormalizerConfig,
) -> Result<NormalizeOutcome, GestureError> {
    if frame.len() < LANDMARK_COORDS {
        return Err(GestureError::FrameTooShort {
            len: frame.len(),
            required: LANDMARK_COORDS,
        });
    }

    let left = fold_min(frame.xs());
    let right = fold_max(frame.xs());
    let top = fold_min(frame.ys());

    let bounding_width = right - left;
    let width_fraction = bounding_width / config.image_width;

    if bounding_width == 0.0 {
        return Ok(NormalizeOutcome::Rejected(NormalizeReject::ZeroWidth));
    }
    if width_fraction < config.min_width_fraction {
        return Ok(NormalizeOutcome::Rejected(NormalizeReject::TooNarrow {
            width_fraction,
        }));
    }

    let scale = config.target_width / bounding_width;
    for triple in frame.values[..LANDMARK_COORDS].chunks_exact_mut(COORDS_PER_KEYPOINT) {
        triple[0] = round2(scale * (triple[0] - left));
        triple[1] = round2(scale * (triple[1] - top));
        triple[2] = 0.0;
    }

    Ok(NormalizeOutcome::Accepted)
}

/// Round to two decimal places, the precision stored frames carry.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn fold_min(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

fn fold_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_FRAME_WIDTH, KEYPOINTS_PER_HAND};

    /// A synthetic hand whose keypoints spread from `(left, top)` over
    /// `width` horizontally, with nonzero depth everywhere.
    fn spread_hand(left: f64, top: f64, width: f64) -> Frame {
        let keypoints: Vec<[f64; 3]> = (0..KEYPOINTS_PER_HAND)
            .map(|k| {
                let t = k as f64 / (KEYPOINTS_PER_HAND - 1) as f64;
                [left + t * width, top + 50.0 * t, 25.0 + k as f64]
            })
            .collect();
        Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH)
    }

    fn x_extent(frame: &Frame) -> (f64, f64) {
        (fold_min(frame.xs()), fold_max(frame.xs()))
    }

    #[test]
    fn accepted_frame_lands_in_target_box() {
        let mut frame = spread_hand(270.0, 400.0, 350.0);
        let outcome = normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        assert!(outcome.is_accepted());

        let (min_x, max_x) = x_extent(&frame);
        assert_eq!(min_x, 0.0);
        assert!(
            (max_x - min_x - 400.0).abs() <= 0.01,
            "bounding width {} not within 0.01 of 400",
            max_x - min_x
        );

        let min_y = fold_min(frame.ys());
        assert_eq!(min_y, 0.0);
    }

    #[test]
    fn unit_space_source_with_unit_image_width() {
        // Sources that emit coordinates as fractions of the image use
        // image_width = 1.0; the canonical box is the same.
        let config = NormalizerConfig {
            image_width: 1.0,
            ..NormalizerConfig::default()
        };
        let mut frame = spread_hand(0.25, 0.4, 0.3);
        let outcome = normalize(&mut frame, &config).unwrap();
        assert!(outcome.is_accepted());

        let (min_x, max_x) = x_extent(&frame);
        assert_eq!(min_x, 0.0);
        assert!((max_x - 400.0).abs() <= 0.01);
    }

    #[test]
    fn accepted_frame_zeroes_depth() {
        let mut frame = spread_hand(100.0, 100.0, 500.0);
        assert!(frame.zs().any(|z| z != 0.0));

        normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        assert!(frame.zs().all(|z| z == 0.0));
    }

    #[test]
    fn accepted_frame_preserves_padding() {
        let mut frame = spread_hand(200.0, 200.0, 400.0);
        for v in frame.values[LANDMARK_COORDS..].iter_mut() {
            *v = 7.5;
        }
        normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        assert!(frame.values[LANDMARK_COORDS..].iter().all(|&v| v == 7.5));
    }

    #[test]
    fn coordinates_are_rounded_to_two_decimals() {
        let mut frame = spread_hand(123.4, 456.7, 789.1);
        normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        for v in &frame.values[..LANDMARK_COORDS] {
            let scaled = v * 100.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "value {v} not rounded to two decimals"
            );
        }
    }

    #[test]
    fn narrow_hand_is_rejected_untouched() {
        // 90 of 1080 units: 8.3% of the image, under the 10% floor.
        let mut frame = spread_hand(500.0, 500.0, 90.0);
        let before = frame.clone();

        let outcome = normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        match outcome {
            NormalizeOutcome::Rejected(NormalizeReject::TooNarrow { width_fraction }) => {
                assert!(width_fraction < 0.1);
            }
            other => panic!("expected TooNarrow rejection, got {other:?}"),
        }
        assert_eq!(frame, before, "rejected frame must not be mutated");
        assert!(frame.zs().any(|z| z != 0.0), "z-values must survive rejection");
    }

    #[test]
    fn zero_width_hand_is_rejected_untouched() {
        let keypoints = vec![[540.0, 300.0, 20.0]; KEYPOINTS_PER_HAND];
        let mut frame = Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH);
        let before = frame.clone();

        let outcome = normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        assert_eq!(outcome, NormalizeOutcome::Rejected(NormalizeReject::ZeroWidth));
        assert_eq!(frame, before);
    }

    #[test]
    fn width_exactly_at_threshold_is_accepted() {
        // 108 of 1080 units is exactly the 10% floor; the check is
        // strictly-below, so this frame qualifies.
        let mut frame = spread_hand(200.0, 400.0, 108.0);
        let outcome = normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        assert!(outcome.is_accepted());
    }

    #[test]
    fn short_frame_is_an_error_not_a_rejection() {
        let mut frame = Frame::new(vec![0.1; 10]);
        let err = normalize(&mut frame, &NormalizerConfig::default()).unwrap_err();
        assert!(matches!(err, GestureError::FrameTooShort { len: 10, .. }));
        assert_eq!(frame.values, vec![0.1; 10]);
    }

    #[test]
    fn custom_target_width_is_honored() {
        let config = NormalizerConfig {
            target_width: 200.0,
            ..NormalizerConfig::default()
        };
        let mut frame = spread_hand(300.0, 300.0, 250.0);
        normalize(&mut frame, &config).unwrap();

        let (min_x, max_x) = x_extent(&frame);
        assert_eq!(min_x, 0.0);
        assert!((max_x - 200.0).abs() <= 0.01);
    }

    #[test]
    fn extents_ignore_padding_values() {
        // Padding full of large values must not widen the bounding box.
        let mut frame = spread_hand(400.0, 400.0, 200.0);
        for v in frame.values[LANDMARK_COORDS..].iter_mut() {
            *v = 5000.0;
        }
        let outcome = normalize(&mut frame, &NormalizerConfig::default()).unwrap();
        assert!(outcome.is_accepted());
        let (_, max_x) = x_extent(&frame);
        assert!((max_x - 400.0).abs() <= 0.01);
    }
}
