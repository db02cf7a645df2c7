//! End-to-end training tests on small synthetic datasets.

#![cfg(feature = "training")]

use candle_core::Device;
use gesture_core::{Frame, LabelMap};
use gesture_dataset::{AcceptedSample, GestureDataset, PipelineConfig, ScanOutcome};
use gesture_learn::trainer::{evaluate, train};
use gesture_learn::TrainConfig;

fn separable_dataset(samples_per_class: usize) -> GestureDataset {
    let config = PipelineConfig {
        sequence_len: 5,
        frame_width: 6,
        ..PipelineConfig::default()
    };
    let labels = LabelMap::from_names(["Low", "High"]).unwrap();

    let mut scan = ScanOutcome::default();
    for label_index in 0..2 {
        let base = 0.1 + 0.8 * label_index as f64;
        for s in 0..samples_per_class {
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
                sample: format!("S{label_index}_{s}"),
                frames,
            });
        }
    }
    GestureDataset::from_scan(&scan, &labels, &config).unwrap()
}

fn quick_config() -> TrainConfig {
    TrainConfig {
        epochs: 12,
        batch_size: 4,
        learning_rate: 1e-2,
        seed: 42,
    }
}

#[test]
fn training_reduces_loss_on_separable_data() {
    let dataset = separable_dataset(12);
    let trained = train(&dataset, &quick_config(), &Device::Cpu).unwrap();

    assert_eq!(trained.epochs.len(), 12);
    assert!(trained.epochs.iter().all(|e| e.avg_loss.is_finite()));

    let early: f32 = trained.epochs[..3].iter().map(|e| e.avg_loss).sum::<f32>() / 3.0;
    let late: f32 = trained.epochs[9..].iter().map(|e| e.avg_loss).sum::<f32>() / 3.0;
    assert!(
        late < early,
        "loss should decrease: early={early}, late={late}"
    );
}

#[test]
fn trained_model_fits_the_training_set() {
    let dataset = separable_dataset(12);
    let trained = train(&dataset, &quick_config(), &Device::Cpu).unwrap();

    let report = evaluate(&trained.model, &dataset, &Device::Cpu).unwrap();
    assert_eq!(report.confusion.total(), dataset.len());
    assert_eq!(report.per_class_f1.len(), 2);
    assert!(
        report.accuracy >= 0.75,
        "separable data should be mostly learned, got {}",
        report.accuracy
    );
}

#[test]
fn checkpoint_round_trips_through_safetensors() {
    use candle_nn::VarMap;
    use gesture_learn::model::{GestureLstm, ModelConfig};

    let dataset = separable_dataset(6);
    let config = TrainConfig {
        epochs: 2,
        ..quick_config()
    };
    let trained = train(&dataset, &config, &Device::Cpu).unwrap();
    let before = evaluate(&trained.model, &dataset, &Device::Cpu).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gesture_lstm.safetensors");
    trained.var_map.save(&path).unwrap();

    let mut var_map = VarMap::new();
    let reloaded = GestureLstm::new(
        &var_map,
        &ModelConfig {
            frame_width: dataset.frame_width(),
            num_classes: dataset.num_classes(),
        },
        &Device::Cpu,
    )
    .unwrap();
    var_map.load(&path).unwrap();

    let after = evaluate(&reloaded, &dataset, &Device::Cpu).unwrap();
    assert_eq!(before.confusion, after.confusion);
    assert_eq!(before.accuracy, after.accuracy);
}

#[test]
fn epoch_reports_are_ordered_and_complete() {
    let dataset = separable_dataset(4);
    let config = TrainConfig {
        epochs: 3,
        ..quick_config()
    };
    let trained = train(&dataset, &config, &Device::Cpu).unwrap();

    let numbers: Vec<usize> = trained.epochs.iter().map(|e| e.epoch).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(trained
        .epochs
        .iter()
        .all(|e| (0.0..=1.0).contains(&e.accuracy)));
}
