//! Axum route handlers for the capture API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use gesture_core::{Frame, GestureError};

use crate::models::{HealthResponse, SaveRequest, SaveResponse};
use crate::state::AppState;

/// `GET /ping` — liveness check.
///
/// Answers from inside the fully wired router, so a `200` means the
/// service is actually ready to take captures, not merely that a
/// process is listening.
///
/// # Example Response
///
/// ```json
/// {"status": "ok", "version": "0.1.0"}
/// ```
pub async fn ping() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /save` — persist a batch of captured samples.
///
/// Each sample gets a freshly allocated index in its class; its frames
/// are flattened to `[x0, y0, z0, x1, ...]`, zero-padded to the
/// configured frame width, and written in order. Labels are not
/// validated against any enumeration here; the closed label set is
/// enforced where the store is read back.
///
/// Writes are not transactional: any failure logs with full context
/// and answers `500` with a plain error envelope, and frames already
/// written stay on disk.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, (StatusCode, Json<SaveResponse>)> {
    let result = tokio::task::spawn_blocking(move || persist_all(&state, &request))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "save task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse::error()),
            )
        })?;

    match result {
        Ok(written) => {
            tracing::info!(samples = written, "capture batch saved");
            Ok(Json(SaveResponse::success()))
        }
        Err(e) => {
            tracing::error!(error = %e, "capture batch failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse::error()),
            ))
        }
    }
}

/// Writes every sample in the request, returning how many landed.
fn persist_all(state: &AppState, request: &SaveRequest) -> Result<usize, GestureError> {
    let mut written = 0usize;
    for (label, samples) in &request.0 {
        for sample_frames in samples {
            let frames: Vec<Frame> = sample_frames
                .iter()
                .map(|triples| Frame::from_keypoints(triples, state.frame_width))
                .collect();
            let sample = state.store.write_sample(label, &frames)?;
            tracing::debug!(label, sample, frames = frames.len(), "sample written");
            written += 1;
        }
    }
    Ok(written)
}
