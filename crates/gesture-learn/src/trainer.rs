//! Training and evaluation loops for the gesture classifier.
//!
//! Each epoch reshuffles the samples with the configured seed, walks
//! them in mini-batches minimizing cross-entropy with AdamW, and
//! reports loss and accuracy. Evaluation runs the whole dataset through
//! the model and summarizes it as a confusion matrix.

use candle_core::{Device, Tensor, D};
use candle_nn::{loss, Optimizer, VarMap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use gesture_core::GestureError;
use gesture_dataset::GestureDataset;

use crate::metrics::ConfusionMatrix;
use crate::model::{GestureLstm, ModelConfig};
use crate::TrainConfig;

/// Loss and accuracy for one pass over the training data.
#[derive(Debug, Clone)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,

    /// Mean cross-entropy across the epoch's batches.
    pub avg_loss: f32,

    /// Fraction of training samples classified correctly during the pass.
    pub accuracy: f64,
}

/// A trained classifier plus everything needed to persist and inspect it.
pub struct TrainOutcome {
    /// Parameter store; persist with `var_map.save(path)`.
    pub var_map: VarMap,

    /// The trained classifier.
    pub model: GestureLstm,

    /// Per-epoch reports, in order.
    pub epochs: Vec<EpochReport>,
}

/// Whole-dataset evaluation summary.
#[derive(Debug, Clone)]
pub struct EvalReport {
    /// Fraction of samples classified correctly.
    pub accuracy: f64,

    /// F1 per class, in class-index order.
    pub per_class_f1: Vec<f64>,

    /// Unweighted mean of the per-class F1 scores.
    pub macro_f1: f64,

    /// The underlying prediction counts.
    pub confusion: ConfusionMatrix,
}

/// Converts the f64 dataset into candle's working dtypes: F32 sequence
/// tensors and U32 class indices recovered from the one-hot rows.
fn dataset_tensors(
    dataset: &GestureDataset,
    device: &Device,
) -> Result<(Tensor, Tensor), GestureError> {
    let map_err = |e: candle_core::Error| GestureError::Training {
        message: format!("dataset_tensors: {e}"),
    };

    let values: Vec<f32> = dataset.sequences.iter().map(|&v| v as f32).collect();
    let sequences = Tensor::from_vec(
        values,
        (
            dataset.len(),
            dataset.sequence_len(),
            dataset.frame_width(),
        ),
        device,
    )
    .map_err(map_err)?;

    let mut classes: Vec<u32> = Vec::with_capacity(dataset.len());
    for row in dataset.labels.outer_iter() {
        let mut best: Option<(usize, f64)> = None;
        for (class, &value) in row.iter().enumerate() {
            if best.map_or(true, |(_, top)| value > top) {
                best = Some((class, value));
            }
        }
        let (class, _) = best.ok_or_else(|| GestureError::Training {
            message: "dataset_tensors: label row has no classes".to_string(),
        })?;
        classes.push(class as u32);
    }
    let targets = Tensor::from_vec(classes, (dataset.len(),), device).map_err(map_err)?;

    Ok((sequences, targets))
}

/// Trains a fresh classifier on `dataset`.
///
/// The model's dimensions come from the dataset itself, so the caller
/// only chooses the loop parameters.
///
/// # Errors
///
/// Returns [`GestureError::Training`] if the dataset is empty or a
/// tensor operation fails.
pub fn train(
    dataset: &GestureDataset,
    config: &TrainConfig,
    device: &Device,
) -> Result<TrainOutcome, GestureError> {
    if dataset.is_empty() {
        return Err(GestureError::Training {
            message: "train: no training samples".to_string(),
        });
    }

    let map_err = |e: candle_core::Error| GestureError::Training {
        message: format!("train: {e}"),
    };

    let model_config = ModelConfig {
        frame_width: dataset.frame_width(),
        num_classes: dataset.num_classes(),
    };
    let var_map = VarMap::new();
    let model = GestureLstm::new(&var_map, &model_config, device)?;

    let mut optimizer = candle_nn::AdamW::new(
        var_map.all_vars(),
        candle_nn::ParamsAdamW {
            lr: config.learning_rate,
            ..Default::default()
        },
    )
    .map_err(map_err)?;

    let (sequences, targets) = dataset_tensors(dataset, device)?;
    let n = dataset.len();
    let mut order: Vec<u32> = (0..n as u32).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut epochs = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        order.shuffle(&mut rng);
        let order_tensor = Tensor::from_slice(&order, (n,), device).map_err(map_err)?;
        let epoch_x = sequences.index_select(&order_tensor, 0).map_err(map_err)?;
        let epoch_y = targets.index_select(&order_tensor, 0).map_err(map_err)?;

        let mut loss_sum = 0.0f32;
        let mut batches = 0usize;
        let mut correct = 0usize;

        let mut start = 0;
        while start < n {
            let len = config.batch_size.min(n - start);
            let batch_x = epoch_x.narrow(0, start, len).map_err(map_err)?;
            let batch_y = epoch_y.narrow(0, start, len).map_err(map_err)?;

            let logits = model.forward(&batch_x)?;
            let batch_loss = loss::cross_entropy(&logits, &batch_y).map_err(map_err)?;
            optimizer.backward_step(&batch_loss).map_err(map_err)?;

            loss_sum += batch_loss.to_vec0::<f32>().map_err(map_err)?;
            batches += 1;

            let predicted = logits
                .argmax(D::Minus1)
                .map_err(map_err)?
                .to_vec1::<u32>()
                .map_err(map_err)?;
            let expected = batch_y.to_vec1::<u32>().map_err(map_err)?;
            correct += predicted
                .iter()
                .zip(expected.iter())
                .filter(|(p, e)| p == e)
                .count();

            start += len;
        }

        let report = EpochReport {
            epoch,
            avg_loss: loss_sum / batches.max(1) as f32,
            accuracy: correct as f64 / n as f64,
        };
        tracing::info!(
            epoch = report.epoch,
            avg_loss = report.avg_loss,
            accuracy = report.accuracy,
            "epoch complete"
        );
        epochs.push(report);
    }

    Ok(TrainOutcome {
        var_map,
        model,
        epochs,
    })
}

/// Runs the full dataset through the model, the way the capture
/// pipeline's evaluation pass does.
///
/// # Errors
///
/// Returns [`GestureError::Training`] if the dataset is empty, its
/// shape disagrees with the model, or a tensor operation fails.
pub fn evaluate(
    model: &GestureLstm,
    dataset: &GestureDataset,
    device: &Device,
) -> Result<EvalReport, GestureError> {
    if dataset.is_empty() {
        return Err(GestureError::Training {
            message: "evaluate: no samples to evaluate".to_string(),
        });
    }

    let map_err = |e: candle_core::Error| GestureError::Training {
        message: format!("evaluate: {e}"),
    };

    let (sequences, targets) = dataset_tensors(dataset, device)?;
    let predicted = model.predict(&sequences)?;
    let actual: Vec<usize> = targets
        .to_vec1::<u32>()
        .map_err(map_err)?
        .into_iter()
        .map(|class| class as usize)
        .collect();

    let confusion =
        ConfusionMatrix::from_predictions(&actual, &predicted, dataset.num_classes())?;
    Ok(EvalReport {
        accuracy: confusion.accuracy(),
        per_class_f1: confusion.per_class_f1(),
        macro_f1: confusion.macro_f1(),
        confusion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::{Frame, LabelMap};
    use gesture_dataset::{AcceptedSample, PipelineConfig, ScanOutcome};

    fn tiny_config() -> PipelineConfig {
        PipelineConfig {
            sequence_len: 4,
            frame_width: 6,
            ..PipelineConfig::default()
        }
    }

    fn tiny_dataset(samples_per_class: &[usize]) -> GestureDataset {
        let config = tiny_config();
        let names: Vec<String> = (0..samples_per_class.len())
            .map(|i| format!("G{i}"))
            .collect();
        let labels = LabelMap::from_names(&names).unwrap();

        let mut scan = ScanOutcome::default();
        for (label_index, &count) in samples_per_class.iter().enumerate() {
            for s in 0..count {
                let base = 0.1 + 0.8 * label_index as f64;
                let frames = (0..config.sequence_len)
                    .map(|t| {
                        Frame::new(vec![
                            base + 0.01 * s as f64 + 0.001 * t as f64;
                            config.frame_width
                        ])
                    })
                    .collect();
                scan.accepted.push(AcceptedSample {
                    label_index,
                    sample: format!("G{label_index}_{s}"),
                    frames,
                });
            }
        }
        GestureDataset::from_scan(&scan, &labels, &config).unwrap()
    }

    #[test]
    fn dataset_tensors_have_model_dtypes() {
        let dataset = tiny_dataset(&[3, 3]);
        let (sequences, targets) = dataset_tensors(&dataset, &Device::Cpu).unwrap();
        assert_eq!(sequences.dims(), &[6, 4, 6]);
        assert_eq!(sequences.dtype(), candle_core::DType::F32);
        assert_eq!(targets.dims(), &[6]);
        assert_eq!(targets.to_vec1::<u32>().unwrap(), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn train_rejects_empty_dataset() {
        let labels = LabelMap::from_names(["G0", "G1"]).unwrap();
        let empty =
            GestureDataset::from_scan(&ScanOutcome::default(), &labels, &tiny_config()).unwrap();
        assert!(train(&empty, &TrainConfig::default(), &Device::Cpu).is_err());
    }

    #[test]
    fn evaluate_rejects_empty_dataset() {
        let labels = LabelMap::from_names(["G0", "G1"]).unwrap();
        let empty =
            GestureDataset::from_scan(&ScanOutcome::default(), &labels, &tiny_config()).unwrap();
        let var_map = VarMap::new();
        let model = GestureLstm::new(
            &var_map,
            &ModelConfig {
                frame_width: 6,
                num_classes: 2,
            },
            &Device::Cpu,
        )
        .unwrap();
        assert!(evaluate(&model, &empty, &Device::Cpu).is_err());
    }
}
