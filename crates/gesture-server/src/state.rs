//! Shared application state for the Axum server.

use std::path::PathBuf;
use std::sync::Arc;

use gesture_core::DEFAULT_FRAME_WIDTH;
use gesture_store::FrameStore;

/// Shared application state, passed to all route handlers via Axum `State`.
///
/// The [`FrameStore`] serializes sample-index allocation internally,
/// so one instance must back every handler; handlers share it through
/// `Arc` clones of this state.
pub struct AppState {
    /// The on-disk frame store all saves land in.
    pub store: FrameStore,
    /// Width frames are padded to before persisting.
    pub frame_width: usize,
}

impl AppState {
    /// Creates state over a store rooted at `data_root`.
    ///
    /// Performs no IO; the root directory appears on the first write.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_server::state::AppState;
    ///
    /// let state = AppState::new("data");
    /// assert_eq!(state.frame_width, 126);
    /// ```
    pub fn new(data_root: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            store: FrameStore::open(data_root),
            frame_width: DEFAULT_FRAME_WIDTH,
        })
    }
}
