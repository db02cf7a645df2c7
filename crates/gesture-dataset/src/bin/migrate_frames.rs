//! Normalization migration CLI.
//!
//! Reads a raw capture store, rescales every frame of every known
//! class into the canonical bounding box, and writes the accepted
//! frames to a second store under the same names. Frames the
//! normalizer rejects are dropped; samples that lose frames this way
//! fall below the window length and get excluded at training time.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p gesture-dataset --bin migrate-frames -- \
//!   --source data --dest migrate-data --classes gesture.names
//! ```

use std::path::PathBuf;

use gesture_core::{normalize, LabelMap, NormalizerConfig};
use gesture_dataset::PipelineConfig;
use gesture_store::FrameStore;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    eprintln!("=== Gesture Frame Migration ===");
    eprintln!("Source:      {}", cli.source.display());
    eprintln!("Dest:        {}", cli.dest.display());
    eprintln!("Classes:     {}", cli.classes.display());
    eprintln!("Image width: {}", cli.image_width);
    eprintln!();

    let labels = LabelMap::from_file(&cli.classes).unwrap_or_else(|e| {
        eprintln!("ERROR: failed to load class names: {e}");
        std::process::exit(1);
    });

    let source = FrameStore::open(&cli.source);
    let dest = FrameStore::open(&cli.dest);
    let normalizer = NormalizerConfig {
        image_width: cli.image_width,
        ..NormalizerConfig::default()
    };
    let pipeline = PipelineConfig::default();

    let mut included = 0usize;
    let mut total = 0usize;

    for label in labels.names() {
        let samples = source.list_samples(label).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to enumerate '{label}': {e}");
            std::process::exit(1);
        });
        eprintln!("Migrating {label}: {} samples", samples.len());

        for sample in &samples {
            // The target directory exists even when every frame of the
            // sample ends up rejected; downstream scans then see an
            // empty sample and record it as incomplete.
            let sample_dir = dest.sample_dir(label, sample);
            if let Err(e) = std::fs::create_dir_all(&sample_dir) {
                eprintln!("ERROR: failed to create {}: {e}", sample_dir.display());
                std::process::exit(1);
            }

            for frame_index in 0..pipeline.sequence_len {
                let mut frame = match source.load_frame(label, sample, frame_index) {
                    Ok(Some(frame)) => frame,
                    Ok(None) => continue,
                    Err(e) => {
                        total += 1;
                        eprintln!("WARN: skipping unreadable frame: {e}");
                        continue;
                    }
                };
                total += 1;

                match normalize(&mut frame, &normalizer) {
                    Ok(outcome) if outcome.is_accepted() => {
                        if let Err(e) = dest.write_frame(label, sample, frame_index, &frame) {
                            eprintln!("ERROR: failed to write frame: {e}");
                            std::process::exit(1);
                        }
                        included += 1;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        eprintln!("WARN: skipping malformed frame {sample}_f{frame_index}: {e}");
                    }
                }
            }
        }
    }

    eprintln!();
    eprintln!("included {included} out of {total}");
}

struct CliConfig {
    source: PathBuf,
    dest: PathBuf,
    classes: PathBuf,
    image_width: f64,
}

fn parse_args(args: &[String]) -> CliConfig {
    let mut config = CliConfig {
        source: PathBuf::from("data"),
        dest: PathBuf::from("migrate-data"),
        classes: PathBuf::from("gesture.names"),
        image_width: 1080.0,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--source" => {
                i += 1;
                config.source = PathBuf::from(&args[i]);
            }
            "--dest" => {
                i += 1;
                config.dest = PathBuf::from(&args[i]);
            }
            "--classes" => {
                i += 1;
                config.classes = PathBuf::from(&args[i]);
            }
            "--image-width" => {
                i += 1;
                config.image_width = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("ERROR: invalid --image-width value");
                    std::process::exit(1);
                });
            }
            "--help" | "-h" => {
                eprintln!("Usage: migrate-frames [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --source PATH       Raw capture store (default: data)");
                eprintln!("  --dest PATH         Normalized store (default: migrate-data)");
                eprintln!("  --classes PATH      Class names file (default: gesture.names)");
                eprintln!("  --image-width F     Capture image width in coordinate units");
                eprintln!("                      (default: 1080; use 1 for fraction-of-image data)");
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
