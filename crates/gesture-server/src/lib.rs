//! # gesture-server
//!
//! The HTTP capture surface for the gesture pipeline.
//!
//! This is the leaf crate — it imports from the rest of the workspace
//! and exposes the API the capture client talks to. No other crate may
//! import from here.
//!
//! ## Endpoints
//!
//! - `GET /ping` — liveness check
//! - `POST /save` — persist captured gesture samples to the frame store
//!
//! ## Architecture Rules
//!
//! - This is the ONLY crate that wires everything together.
//! - No other `gesture-*` crate may depend on `gesture-server`.
//! - Handlers never touch the filesystem directly; all writes go
//!   through [`gesture_store::FrameStore`].

pub mod models;
pub mod routes;
pub mod state;

pub use gesture_core;
pub use gesture_store;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the Axum application router with all routes.
///
/// Creates a fresh [`AppState`] over `data_root`. Use
/// [`build_app_with_state`] when you need to keep a handle on the
/// state, e.g. to read the store back in tests.
///
/// # Example
///
/// ```no_run
/// use gesture_server::build_app;
///
/// #[tokio::main]
/// async fn main() {
///     let app = build_app("data");
///     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
///     axum::serve(listener, app).await.unwrap();
/// }
/// ```
pub fn build_app(data_root: impl Into<PathBuf>) -> Router {
    build_app_with_state(AppState::new(data_root))
}

/// Build the Axum router with a pre-created [`AppState`].
///
/// # Example
///
/// ```no_run
/// use gesture_server::build_app_with_state;
/// use gesture_server::state::AppState;
///
/// #[tokio::main]
/// async fn main() {
///     let state = AppState::new("data");
///     let app = build_app_with_state(state);
///     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
///     axum::serve(listener, app).await.unwrap();
/// }
/// ```
pub fn build_app_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(routes::ping))
        .route("/save", post(routes::save))
        .with_state(state)
}
