//! # gesture-dataset
//!
//! Turns the frame store's directory tree into training tensors.
//!
//! - [`window_sample`] — groups one sample's frame files into a
//!   fixed-length window, or records why it cannot
//! - [`scan`] — walks every known class and collects windows plus
//!   per-sample rejection records
//! - [`GestureDataset`] — the stacked sequences and one-hot labels,
//!   with a seeded held-out split
//!
//! The `migrate-frames` binary applies landmark normalization to a raw
//! capture store and writes the accepted frames to a second store.
//!
//! ## Architecture Rules
//!
//! - Depends on `gesture-core` and `gesture-store`; knows nothing
//!   about HTTP or model internals.
//! - Incomplete or malformed samples are recorded rejections, never
//!   silent skips and never panics.
//! - The label map is taken as a parameter everywhere. Nothing in this
//!   crate reads the class names file.

pub mod assemble;
pub mod window;

pub use assemble::{scan, AcceptedSample, GestureDataset, RejectedSample, ScanOutcome};
pub use window::{window_sample, WindowOutcome, WindowReject};

pub use gesture_core;
pub use gesture_store;

use gesture_core::{DEFAULT_FRAME_WIDTH, DEFAULT_SEQUENCE_LEN};

/// Shape and split parameters for dataset assembly.
///
/// # Example
///
/// ```
/// use gesture_dataset::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.sequence_len, 10);
/// assert_eq!(config.frame_width, 126);
/// assert_eq!(config.holdout_fraction, 0.05);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Frames per sample window.
    pub sequence_len: usize,
    /// Required value count of every frame.
    pub frame_width: usize,
    /// Fraction of samples held out of training.
    pub holdout_fraction: f64,
    /// Seed for the held-out split shuffle.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sequence_len: DEFAULT_SEQUENCE_LEN,
            frame_width: DEFAULT_FRAME_WIDTH,
            holdout_fraction: 0.05,
            seed: 42,
        }
    }
}
