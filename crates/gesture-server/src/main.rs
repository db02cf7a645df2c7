//! Gesture capture server entry point.
//!
//! Starts the Axum HTTP server over an on-disk frame store.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release -p gesture-server -- --data-root data --bind 0.0.0.0:8080
//! ```

use std::path::PathBuf;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let config = parse_args(&args);

    tracing::info!(
        data_root = %config.data_root.display(),
        "Starting gesture capture server on {}",
        config.bind
    );

    let app = gesture_server::build_app(config.data_root);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .expect("failed to bind listen address");

    tracing::info!("Gesture capture server listening on {}", config.bind);

    axum::serve(listener, app).await.expect("server error");
}

struct CliConfig {
    data_root: PathBuf,
    bind: String,
}

fn parse_args(args: &[String]) -> CliConfig {
    let mut config = CliConfig {
        data_root: PathBuf::from("data"),
        bind: "0.0.0.0:8080".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-root" => {
                i += 1;
                config.data_root = PathBuf::from(&args[i]);
            }
            "--bind" => {
                i += 1;
                config.bind = args[i].clone();
            }
            "--help" | "-h" => {
                eprintln!("Usage: gesture-server [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --data-root PATH   Frame store root (default: data)");
                eprintln!("  --bind ADDR        Listen address (default: 0.0.0.0:8080)");
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
