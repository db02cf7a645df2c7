//! Gesture classifier evaluation CLI.
//!
//! Loads a safetensors checkpoint and runs every usable sample in the
//! frame store through it, reporting accuracy, per-class F1, and the
//! confusion matrix.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release -p gesture-learn --features training --bin evaluate-gesture -- \
//!   --data data --classes gesture.names \
//!   --checkpoint checkpoints/gesture_lstm.safetensors
//! ```

use std::path::PathBuf;
use std::time::Instant;

use gesture_core::LabelMap;
use gesture_dataset::{scan, GestureDataset, PipelineConfig};
use gesture_store::FrameStore;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    eprintln!("=== Gesture Classifier Evaluation ===");
    eprintln!("Data:       {}", config.data.display());
    eprintln!("Classes:    {}", config.classes.display());
    eprintln!("Checkpoint: {}", config.checkpoint.display());
    eprintln!();

    let labels = LabelMap::from_file(&config.classes).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to load class names: {e}");
        std::process::exit(1);
    });

    eprintln!("Scanning frame store...");
    let start = Instant::now();
    let store = FrameStore::open(&config.data);
    let pipeline = PipelineConfig::default();
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

    // Evaluation runs the full dataset; nothing is held out here.
    let dataset = GestureDataset::from_scan(&scanned, &labels, &pipeline).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to assemble dataset: {e}");
        std::process::exit(1);
    });

    #[cfg(feature = "training")]
    {
        use candle_core::Device;
        use candle_nn::VarMap;
        use gesture_learn::model::{GestureLstm, ModelConfig};
        use gesture_learn::trainer::evaluate;

        let device = Device::cuda_if_available(0).unwrap_or(Device::Cpu);
        eprintln!("Using device: {:?}", device);

        let model_config = ModelConfig {
            frame_width: dataset.frame_width(),
            num_classes: dataset.num_classes(),
        };
        let mut var_map = VarMap::new();
        let model = GestureLstm::new(&var_map, &model_config, &device).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to build model: {e}");
            std::process::exit(1);
        });
        var_map.load(&config.checkpoint).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to load checkpoint: {e}");
            std::process::exit(1);
        });

        let report = evaluate(&model, &dataset, &device).unwrap_or_else(|e| {
            eprintln!("ERROR: evaluation failed: {e}");
            std::process::exit(1);
        });

        eprintln!("\n=== Evaluation Complete ===");
        eprintln!("Samples:  {}", report.confusion.total());
        eprintln!("Accuracy: {:.2}%", report.accuracy * 100.0);
        eprintln!("Macro F1: {:.4}", report.macro_f1);
        eprintln!("\nPer-class F1:");
        for (class, f1) in report.per_class_f1.iter().enumerate() {
            let name = labels.name_of(class).unwrap_or("?");
            eprintln!("  {name:<16} {f1:.4}");
        }
        eprintln!("\nConfusion matrix (rows actual, columns predicted):");
        eprintln!("{}", report.confusion.render(&labels));
    }

    #[cfg(not(feature = "training"))]
    {
        let _ = dataset;
        eprintln!("ERROR: evaluation requires --features training");
        eprintln!(
            "Run: cargo run --release -p gesture-learn --features training --bin evaluate-gesture -- ..."
        );
        std::process::exit(1);
    }
}

struct CliConfig {
    data: PathBuf,
    classes: PathBuf,
    checkpoint: PathBuf,
}

fn parse_args(args: &[String]) -> CliConfig {
    let mut config = CliConfig {
        data: PathBuf::from("data"),
        classes: PathBuf::from("gesture.names"),
        checkpoint: PathBuf::from("checkpoints/gesture_lstm.safetensors"),
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
            "--checkpoint" => {
                i += 1;
                config.checkpoint = PathBuf::from(&args[i]);
            }
            "--help" | "-h" => {
                eprintln!("Usage: evaluate-gesture [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --data PATH        Frame store root (default: data)");
                eprintln!("  --classes PATH     Class names file, one per line (default: gesture.names)");
                eprintln!("  --checkpoint PATH  Safetensors checkpoint (default: checkpoints/gesture_lstm.safetensors)");
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
