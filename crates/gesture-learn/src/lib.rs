//! # gesture-learn
//!
//! Training and evaluation for the gesture sequence classifier.
//!
//! - [`ConfusionMatrix`] — prediction counts, accuracy, per-class F1
//! - [`TrainConfig`] — epochs, batch size, learning rate, seed
//! - `GestureLstm` (feature `training`) — stacked-LSTM classifier on candle
//! - `train` / `evaluate` (feature `training`) — cross-entropy training loop
//!   and whole-dataset evaluation
//!
//! ## Architecture Rules
//!
//! - Depends on `gesture-core`, `gesture-store`, `gesture-dataset`.
//! - candle stays behind the `training` feature; metrics and configuration
//!   compile without it.
//! - Checkpoints are safetensors files written through `VarMap::save`.
//! - No async code — pure synchronous logic.

pub mod metrics;

#[cfg(feature = "training")]
pub mod model;
#[cfg(feature = "training")]
pub mod trainer;

pub use metrics::ConfusionMatrix;

#[cfg(feature = "training")]
pub use model::{GestureLstm, ModelConfig};
#[cfg(feature = "training")]
pub use trainer::{evaluate, train, EpochReport, EvalReport, TrainOutcome};

pub use gesture_core;
pub use gesture_dataset;
pub use gesture_store;

/// Knobs for the training loop.
///
/// The defaults reproduce the capture pipeline's standard run: eight
/// epochs of AdamW over shuffled mini-batches.
///
/// # Example
///
/// ```
/// use gesture_learn::TrainConfig;
///
/// let config = TrainConfig::default();
/// assert_eq!(config.epochs, 8);
/// assert_eq!(config.batch_size, 32);
/// ```
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Full passes over the training data (default: 8).
    pub epochs: usize,

    /// Samples per optimizer step (default: 32).
    pub batch_size: usize,

    /// AdamW learning rate (default: 1e-3).
    pub learning_rate: f64,

    /// Seed for the epoch shuffles (default: 42).
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 8,
            batch_size: 32,
            learning_rate: 1e-3,
            seed: 42,
        }
    }
}
