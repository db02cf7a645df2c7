//! JSON request and response models for the capture API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One captured frame on the wire: keypoint `[x, y, z]` triples in
/// landmark order.
pub type FrameTriples = Vec<[f64; 3]>;

/// One sample on the wire: ordered frames.
pub type SampleFrames = Vec<FrameTriples>;

/// Request body for `POST /save`: class label to ordered samples.
///
/// # Example
///
/// ```
/// use gesture_server::models::SaveRequest;
///
/// let json = r#"{"Heart": [[[[0.5, 0.25, 0.1]]]]}"#;
/// let request: SaveRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.0["Heart"][0][0][0], [0.5, 0.25, 0.1]);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SaveRequest(pub HashMap<String, Vec<SampleFrames>>);

/// Response envelope for `POST /save`.
///
/// # Example
///
/// ```
/// use gesture_server::models::SaveResponse;
///
/// let json = serde_json::to_string(&SaveResponse::success()).unwrap();
/// assert_eq!(json, r#"{"status":"success"}"#);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    /// `"success"` or `"error"`.
    pub status: String,
}

impl SaveResponse {
    /// The envelope for a fully persisted batch.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }

    /// The envelope for a failed batch. Carries no partial-success
    /// detail; whatever was written before the failure stays on disk.
    pub fn error() -> Self {
        Self {
            status: "error".to_string(),
        }
    }
}

/// Health check response.
///
/// # Example
///
/// ```
/// use gesture_server::models::HealthResponse;
///
/// let health = HealthResponse { status: "ok".into(), version: "0.1.0".into() };
/// let json = serde_json::to_string(&health).unwrap();
/// assert!(json.contains("ok"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
