//! The shared error type for the gesture pipeline.

use thiserror::Error;

/// Errors produced anywhere in the gesture pipeline.
///
/// Domain-level rejections (a too-narrow hand, an incomplete sample)
/// are NOT errors — they are modeled as explicit outcome variants by
/// the normalizer and the windower. `GestureError` is for contract
/// violations and failures of the environment: malformed frames,
/// unreadable files, bad label indices.
#[derive(Debug, Error)]
pub enum GestureError {
    /// A frame carried fewer values than one full hand of landmarks.
    #[error("frame has {len} values but at least {required} are required")]
    FrameTooShort { len: usize, required: usize },

    /// A class label was requested that the enumeration does not contain.
    #[error("unknown class label '{label}'")]
    UnknownLabel { label: String },

    /// A label index outside the enumeration was used.
    #[error("label index {index} out of range (labels: {max})")]
    LabelIndexOutOfRange { index: usize, max: usize },

    /// The class names file contained no usable labels.
    #[error("class names file '{path}' contains no labels")]
    EmptyLabelSet { path: String },

    /// Reading or writing the on-disk store failed.
    #[error("storage error at '{path}': {message}")]
    Storage { path: String, message: String },

    /// Assembling or slicing a dataset failed.
    #[error("dataset error: {message}")]
    Dataset { message: String },

    /// Model training or evaluation failed.
    #[error("training error: {message}")]
    Training { message: String },
}

impl GestureError {
    /// Builds a [`GestureError::Storage`] from a path and any displayable cause.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_core::GestureError;
    ///
    /// let err = GestureError::storage("data/A/A0_f0.npy", "file truncated");
    /// assert!(err.to_string().contains("A0_f0.npy"));
    /// ```
    pub fn storage(path: impl AsRef<std::path::Path>, cause: impl std::fmt::Display) -> Self {
        Self::Storage {
            path: path.as_ref().display().to_string(),
            message: cause.to_string(),
        }
    }
}
