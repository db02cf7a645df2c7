//! # gesture-store
//!
//! The on-disk frame store for captured gesture data.
//!
//! Frames live in a directory tree keyed by class label and sample
//! name, one `.npy` file per frame:
//!
//! ```text
//! <root>/<Label>/<Label><SampleIndex>/<Label><SampleIndex>_f<FrameIndex>.npy
//! ```
//!
//! The layout is shared with existing capture data, so files are plain
//! one-dimensional little-endian float64 arrays and names follow the
//! conventions in [`layout`] exactly.
//!
//! ## Architecture Rules
//!
//! - Depends only on `gesture-core`.
//! - All filesystem knowledge for the pipeline lives here: callers
//!   never build store paths by hand.
//! - Sample indices are handed out by [`FrameStore::allocate_sample`],
//!   never by counting directories at the call site.

pub mod layout;
pub mod store;

pub use store::FrameStore;

pub use gesture_core;
