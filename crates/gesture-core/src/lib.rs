//! # gesture-core
//!
//! Core vocabulary for the hand-gesture capture and training pipeline.
//!
//! - [`Frame`] — one captured hand pose: 21 keypoints flattened to 63
//!   coordinates, padded to the conventional 126-value width
//! - [`LabelMap`] — the closed set of gesture class names, built once
//!   from a names file and threaded through the pipeline
//! - [`normalize`] — rescales a frame into a fixed 400-unit-wide box,
//!   or rejects it with a recorded reason
//! - [`GestureError`] — the error type shared by every crate
//!
//! ## Architecture Rules
//!
//! - This crate sits at the bottom of the workspace. It depends on no
//!   other `gesture-*` crate.
//! - No async code, and no filesystem access beyond reading the class
//!   names file once at startup.

pub mod error;
pub mod frame;
pub mod labels;
pub mod normalize;

pub use error::GestureError;
pub use frame::Frame;
pub use labels::LabelMap;
pub use normalize::{normalize, NormalizeOutcome, NormalizeReject, NormalizerConfig};

/// Coordinates per keypoint: x, y, z.
pub const COORDS_PER_KEYPOINT: usize = 3;

/// Tracked keypoints per hand.
pub const KEYPOINTS_PER_HAND: usize = 21;

/// Flattened landmark coordinates per hand: 21 keypoints × (x, y, z).
pub const LANDMARK_COORDS: usize = KEYPOINTS_PER_HAND * COORDS_PER_KEYPOINT;

/// Conventional stored frame width: one tracked hand plus a zeroed
/// second-hand block of the same size.
pub const DEFAULT_FRAME_WIDTH: usize = 2 * LANDMARK_COORDS;

/// Frames per captured sample.
pub const DEFAULT_SEQUENCE_LEN: usize = 10;
