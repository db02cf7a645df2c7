//! The captured hand-pose frame.
//!
//! A frame is the flattened output of one hand-tracking inference:
//! 21 keypoints × (x, y, z) = 63 coordinates, conventionally padded
//! with a zeroed second-hand block to a total width of 126. Stored
//! frames are one-dimensional float64 arrays; nothing downstream ever
//! reshapes them back into keypoints.

use crate::{COORDS_PER_KEYPOINT, LANDMARK_COORDS};

/// One captured hand pose as a flat vector of `f64` values.
///
/// The first [`LANDMARK_COORDS`] values are the tracked hand laid out
/// as `x0, y0, z0, x1, y1, z1, ...`; values beyond that are padding
/// and pass through every transformation untouched.
///
/// # Example
///
/// ```
/// use gesture_core::{Frame, DEFAULT_FRAME_WIDTH, KEYPOINTS_PER_HAND};
///
/// let keypoints = vec![[0.5, 0.5, 0.1]; KEYPOINTS_PER_HAND];
/// let frame = Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH);
/// assert_eq!(frame.len(), DEFAULT_FRAME_WIDTH);
/// assert_eq!(frame.values[0], 0.5);
/// assert_eq!(frame.values[125], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Flattened landmark values.
    pub values: Vec<f64>,
}

impl Frame {
    /// Wraps raw values as a frame without validation.
    ///
    /// Length checks happen where they matter: the normalizer rejects
    /// frames shorter than one hand, the windower rejects frames that
    /// do not match the configured width.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_core::Frame;
    ///
    /// let frame = Frame::new(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(frame.len(), 3);
    /// ```
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Flattens keypoint triples and zero-pads to `width`.
    ///
    /// This is the shape the capture client sends: 21 `[x, y, z]`
    /// triples, stored with a zeroed second-hand block appended.
    /// If the flattened triples already reach `width`, nothing is
    /// padded or truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_core::{Frame, DEFAULT_FRAME_WIDTH};
    ///
    /// let keypoints = vec![[0.25, 0.75, 0.0]; 21];
    /// let frame = Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH);
    /// assert_eq!(frame.len(), 126);
    /// assert_eq!(frame.values[63..], [0.0; 63]);
    /// ```
    pub fn from_keypoints(keypoints: &[[f64; 3]], width: usize) -> Self {
        let mut values: Vec<f64> = keypoints.iter().flatten().copied().collect();
        if values.len() < width {
            values.resize(width, 0.0);
        }
        Self { values }
    }

    /// Number of values in the frame.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the frame holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The x coordinates of the tracked hand, in keypoint order.
    ///
    /// Only the first [`LANDMARK_COORDS`] values are visited; padding
    /// never contributes.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_core::Frame;
    ///
    /// let frame = Frame::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let xs: Vec<f64> = frame.xs().collect();
    /// assert_eq!(xs, vec![1.0, 4.0]);
    /// ```
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.hand_coords(0)
    }

    /// The y coordinates of the tracked hand, in keypoint order.
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.hand_coords(1)
    }

    /// The z coordinates of the tracked hand, in keypoint order.
    pub fn zs(&self) -> impl Iterator<Item = f64> + '_ {
        self.hand_coords(2)
    }

    fn hand_coords(&self, offset: usize) -> impl Iterator<Item = f64> + '_ {
        let end = self.values.len().min(LANDMARK_COORDS);
        self.values[..end]
            .iter()
            .skip(offset)
            .step_by(COORDS_PER_KEYPOINT)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_FRAME_WIDTH, KEYPOINTS_PER_HAND};

    #[test]
    fn from_keypoints_flattens_in_triple_order() {
        let keypoints = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let frame = Frame::from_keypoints(&keypoints, 6);
        assert_eq!(frame.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_keypoints_pads_with_zeros() {
        let keypoints = vec![[0.5, 0.5, 0.5]; KEYPOINTS_PER_HAND];
        let frame = Frame::from_keypoints(&keypoints, DEFAULT_FRAME_WIDTH);
        assert_eq!(frame.len(), DEFAULT_FRAME_WIDTH);
        assert!(frame.values[LANDMARK_COORDS..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_keypoints_never_truncates() {
        let keypoints = vec![[1.0, 1.0, 1.0]; 4];
        let frame = Frame::from_keypoints(&keypoints, 6);
        assert_eq!(frame.len(), 12);
    }

    #[test]
    fn coordinate_views_stride_over_triples() {
        let mut values = Vec::new();
        for k in 0..KEYPOINTS_PER_HAND {
            values.extend([k as f64, 100.0 + k as f64, 200.0 + k as f64]);
        }
        let frame = Frame::new(values);

        let xs: Vec<f64> = frame.xs().collect();
        let ys: Vec<f64> = frame.ys().collect();
        let zs: Vec<f64> = frame.zs().collect();
        assert_eq!(xs.len(), KEYPOINTS_PER_HAND);
        assert_eq!(xs[3], 3.0);
        assert_eq!(ys[3], 103.0);
        assert_eq!(zs[3], 203.0);
    }

    #[test]
    fn coordinate_views_ignore_padding() {
        let mut values = vec![1.0; DEFAULT_FRAME_WIDTH];
        for v in values[LANDMARK_COORDS..].iter_mut() {
            *v = 999.0;
        }
        let frame = Frame::new(values);
        assert!(frame.xs().all(|v| v == 1.0));
        assert_eq!(frame.xs().count(), KEYPOINTS_PER_HAND);
    }
}
