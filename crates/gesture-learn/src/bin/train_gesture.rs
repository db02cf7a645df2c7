//! Gesture classifier training CLI.
//!
//! Scans the frame store, assembles sequence windows, holds out an
//! evaluation slice, trains the stacked-LSTM classifier, and writes a
//! safetensors checkpoint.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release -p gesture-learn --features training --bin train-gesture -- \
//!   --data data --classes gesture.names \
//!   --output checkpoints/gesture_lstm \
//!   --epochs 8 --batch-size 32 --lr 1e-3 \
//!   --holdout 0.05 --seed 42
//! ```

use std::path::PathBuf;
use std::time::Instant;

use gesture_core::LabelMap;
use gesture_dataset::{scan, GestureDataset, PipelineConfig};
use gesture_store::FrameStore;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    eprintln!("=== Gesture Classifier Training ===");
    eprintln!("Data:       {}", config.data.display());
    eprintln!("Classes:    {}", config.classes.display());
    eprintln!("Output:     {}", config.output.display());
    eprintln!("Epochs:     {}", config.epochs);
    eprintln!("Batch size: {}", config.batch_size);
    eprintln!("LR:         {}", config.lr);
    eprintln!("Holdout:    {}", config.holdout);
    eprintln!("Seed:       {}", config.seed);
    eprintln!();

    let labels = LabelMap::from_file(&config.classes).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to load class names: {e}");
        std::process::exit(1);
    });
    eprintln!("Classes: {}", labels.names().join(", "));

    eprintln!("Scanning frame store...");
    let start = Instant::now();
    let store = FrameStore::open(&config.data);
    let pipeline = PipelineConfig {
        holdout_fraction: config.holdout,
        seed: config.seed,
        ..PipelineConfig::default()
    };
    let scanned = scan(&store, &labels, &pipeline).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to scan frame store: {e}");
        std::process::exit(1);
    });
    eprintln!(
        "Found {} usable samples ({} excluded) in {:.1}s",
        scanned.accepted.len(),
        scanned.rejected.len(),
        start.elapsed().as_secs_f32()
    );
    for rejected in &scanned.rejected {
        eprintln!(
            "  excluded {}/{}: {}",
            rejected.label, rejected.sample, rejected.reason
        );
    }

    let dataset = GestureDataset::from_scan(&scanned, &labels, &pipeline).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to assemble dataset: {e}");
        std::process::exit(1);
    });
    let (train_set, eval_set) = dataset.split(pipeline.holdout_fraction, pipeline.seed);
    eprintln!("Split: {} train, {} eval", train_set.len(), eval_set.len());

    #[cfg(feature = "training")]
    {
        use candle_core::Device;
        use gesture_learn::trainer::{evaluate, train};
        use gesture_learn::TrainConfig;

        let device = Device::cuda_if_available(0).unwrap_or(Device::Cpu);
        eprintln!("Using device: {:?}", device);

        let train_config = TrainConfig {
            epochs: config.epochs,
            batch_size: config.batch_size,
            learning_rate: config.lr,
            seed: config.seed,
        };

        eprintln!("\nStarting training...");
        let start = Instant::now();
        let trained = train(&train_set, &train_config, &device).unwrap_or_else(|e| {
            eprintln!("ERROR: training failed: {e}");
            std::process::exit(1);
        });

        eprintln!("\n=== Training Complete ===");
        for report in &trained.epochs {
            eprintln!(
                "  Epoch {:2}: loss={:.4}  accuracy={:.2}%",
                report.epoch,
                report.avg_loss,
                report.accuracy * 100.0
            );
        }
        eprintln!("Time: {:.1}s", start.elapsed().as_secs_f32());

        if !eval_set.is_empty() {
            let report = evaluate(&trained.model, &eval_set, &device).unwrap_or_else(|e| {
                eprintln!("ERROR: evaluation failed: {e}");
                std::process::exit(1);
            });
            eprintln!("\nHeld-out accuracy: {:.2}%", report.accuracy * 100.0);
        }

        let save_path = config.output.with_extension("safetensors");
        if let Some(parent) = save_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                    eprintln!("ERROR: failed to create {}: {e}", parent.display());
                    std::process::exit(1);
                });
            }
        }
        eprintln!("\nSaving checkpoint to {}...", save_path.display());
        trained.var_map.save(&save_path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to save checkpoint: {e}");
            std::process::exit(1);
        });
        eprintln!("Done.");
    }

    #[cfg(not(feature = "training"))]
    {
        let _ = train_set;
        let _ = eval_set;
        eprintln!("ERROR: training requires --features training");
        eprintln!(
            "Run: cargo run --release -p gesture-learn --features training --bin train-gesture -- ..."
        );
        std::process::exit(1);
    }
}

struct CliConfig {
    data: PathBuf,
    classes: PathBuf,
    output: PathBuf,
    epochs: usize,
    batch_size: usize,
    lr: f64,
    holdout: f64,
    seed: u64,
}

fn parse_args(args: &[String]) -> CliConfig {
    let mut config = CliConfig {
        data: PathBuf::from("data"),
        classes: PathBuf::from("gesture.names"),
        output: PathBuf::from("checkpoints/gesture_lstm"),
        epochs: 8,
        batch_size: 32,
        lr: 1e-3,
        holdout: 0.05,
        seed: 42,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                i += 1;
                config.data = PathBuf::from(&args[i]);
            }
            "--classes" => {
                i += 1;
                config.classes = PathBuf::from(&args[i]);
            }
            "--output" => {
                i += 1;
                config.output = PathBuf::from(&args[i]);
            }
            "--epochs" => {
                i += 1;
                config.epochs = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: invalid --epochs value");
                    std::process::exit(1);
                });
            }
            "--batch-size" => {
                i += 1;
                config.batch_size = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: invalid --batch-size value");
                    std::process::exit(1);
                });
            }
            "--lr" => {
                i += 1;
                config.lr = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: invalid --lr value");
                    std::process::exit(1);
                });
            }
            "--holdout" => {
                i += 1;
                config.holdout = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: invalid --holdout value");
                    std::process::exit(1);
                });
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: invalid --seed value");
                    std::process::exit(1);
                });
            }
            "--help" | "-h" => {
                eprintln!("Usage: train-gesture [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --data PATH        Frame store root (default: data)");
                eprintln!("  --classes PATH     Class names file, one per line (default: gesture.names)");
                eprintln!("  --output PATH      Checkpoint output path (default: checkpoints/gesture_lstm)");
                eprintln!("  --epochs N         Training epochs (default: 8)");
                eprintln!("  --batch-size N     Batch size (default: 32)");
                eprintln!("  --lr FLOAT         Learning rate (default: 1e-3)");
                eprintln!("  --holdout FLOAT    Fraction held out for evaluation (default: 0.05)");
                eprintln!("  --seed N           Shuffle and split seed (default: 42)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config
}
