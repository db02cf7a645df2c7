//! Dataset assembly: scan the store, stack windows into tensors.

use ndarray::{Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use gesture_core::{GestureError, LabelMap};
use gesture_store::FrameStore;

use crate::window::{window_sample, WindowOutcome, WindowReject};
use crate::PipelineConfig;

/// One sample that produced a full window.
#[derive(Debug, Clone)]
pub struct AcceptedSample {
    /// Index of the sample's class in the label map.
    pub label_index: usize,
    /// Sample directory name, kept for reports.
    pub sample: String,
    /// The window, exactly `sequence_len` frames.
    pub frames: Vec<gesture_core::Frame>,
}

/// One sample that was excluded, with its reason.
#[derive(Debug, Clone)]
pub struct RejectedSample {
    pub label: String,
    pub sample: String,
    pub reason: WindowReject,
}

/// Everything a store scan found.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub accepted: Vec<AcceptedSample>,
    pub rejected: Vec<RejectedSample>,
}

/// Walks the store and windows every sample of every known class.
///
/// Classes are visited in label-map order and samples in sorted name
/// order, so the scan is deterministic for a given tree. Directory
/// names that are not in the label map are never visited at all — the
/// label set is closed. A class with no directory contributes nothing
/// and logs a warning.
///
/// # Errors
///
/// Returns [`GestureError::Storage`] if a class directory exists but
/// cannot be enumerated. Per-sample problems are not errors; they end
/// up in [`ScanOutcome::rejected`].
pub fn scan(
    store: &FrameStore,
    labels: &LabelMap,
    config: &PipelineConfig,
) -> Result<ScanOutcome, GestureError> {
    let mut outcome = ScanOutcome::default();

    for (label_index, label) in labels.names().iter().enumerate() {
        if !store.class_dir(label).is_dir() {
            tracing::warn!(label, "class directory missing, contributing no samples");
            continue;
        }
        for sample in store.list_samples(label)? {
            match window_sample(store, label, &sample, config) {
                WindowOutcome::Accepted(frames) => {
                    outcome.accepted.push(AcceptedSample {
                        label_index,
                        sample,
                        frames,
                    });
                }
                WindowOutcome::Rejected(reason) => {
                    tracing::debug!(label, sample, %reason, "sample excluded");
                    outcome.rejected.push(RejectedSample {
                        label: label.clone(),
                        sample,
                        reason,
                    });
                }
            }
        }
    }

    Ok(outcome)
}

/// Stacked training tensors: sequences and their one-hot labels.
///
/// `sequences` is shaped `(num_samples, sequence_len, frame_width)`
/// and `labels` is shaped `(num_samples, num_classes)`; row `i` of one
/// corresponds to row `i` of the other.
#[derive(Debug, Clone)]
pub struct GestureDataset {
    pub sequences: Array3<f64>,
    pub labels: Array2<f64>,
}

impl GestureDataset {
    /// Stacks scanned windows into tensors.
    ///
    /// The one-hot width comes from the label map, not from which
    /// classes happened to have samples, so datasets scanned from
    /// partial captures still line up with the model's output layer.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Dataset`] if a window's shape does not
    /// match the config (the scan never produces one) and
    /// [`GestureError::LabelIndexOutOfRange`] if an accepted sample
    /// references a class the map does not have.
    pub fn from_scan(
        scan: &ScanOutcome,
        labels: &LabelMap,
        config: &PipelineConfig,
    ) -> Result<Self, GestureError> {
        let num_samples = scan.accepted.len();
        let mut sequences =
            Array3::<f64>::zeros((num_samples, config.sequence_len, config.frame_width));
        let mut label_rows = Array2::<f64>::zeros((num_samples, labels.len()));

        for (row, accepted) in scan.accepted.iter().enumerate() {
            if accepted.frames.len() != config.sequence_len {
                return Err(GestureError::Dataset {
                    message: format!(
                        "sample '{}' has {} frames, expected {}",
                        accepted.sample,
                        accepted.frames.len(),
                        config.sequence_len
                    ),
                });
            }
            for (t, frame) in accepted.frames.iter().enumerate() {
                if frame.len() != config.frame_width {
                    return Err(GestureError::Dataset {
                        message: format!(
                            "sample '{}' frame {} has width {}, expected {}",
                            accepted.sample,
                            t,
                            frame.len(),
                            config.frame_width
                        ),
                    });
                }
                for (k, &value) in frame.values.iter().enumerate() {
                    sequences[[row, t, k]] = value;
                }
            }
            let one_hot = labels.one_hot(accepted.label_index)?;
            for (class, &value) in one_hot.iter().enumerate() {
                label_rows[[row, class]] = value;
            }
        }

        Ok(Self {
            sequences,
            labels: label_rows,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.sequences.shape()[0]
    }

    /// Returns `true` if the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frames per sample.
    pub fn sequence_len(&self) -> usize {
        self.sequences.shape()[1]
    }

    /// Values per frame.
    pub fn frame_width(&self) -> usize {
        self.sequences.shape()[2]
    }

    /// Width of the one-hot label rows.
    pub fn num_classes(&self) -> usize {
        self.labels.shape()[1]
    }

    /// Splits into `(train, eval)` by a seeded shuffle.
    ///
    /// `holdout_fraction` of the samples (rounded) go to the eval
    /// side. For any fraction below 1.0 at least one sample stays in
    /// train; a fraction of 1.0 or more holds everything out. The same
    /// seed over the same dataset always produces the same split.
    pub fn split(&self, holdout_fraction: f64, seed: u64) -> (Self, Self) {
        let n = self.len();
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let holdout = if holdout_fraction >= 1.0 {
            n
        } else {
            let wanted = ((n as f64) * holdout_fraction).round() as usize;
            wanted.min(n.saturating_sub(1))
        };
        let (eval_indices, train_indices) = indices.split_at(holdout);
        (self.select(train_indices), self.select(eval_indices))
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            sequences: self.sequences.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }
}
