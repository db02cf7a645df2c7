//! Sequence windowing: one sample directory to one fixed-length window.

use gesture_core::Frame;
use gesture_store::FrameStore;

use crate::PipelineConfig;

/// Result of windowing one sample.
///
/// Captures are best-effort; a tracking dropout mid-capture leaves a
/// sample with fewer frame files than the window needs. Such samples
/// are excluded from training, and the exclusion carries its reason so
/// scans can report what was dropped and why instead of silently
/// shrinking the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    /// All frames present and well-formed, in index order.
    Accepted(Vec<Frame>),
    /// The sample cannot contribute a window.
    Rejected(WindowReject),
}

impl WindowOutcome {
    /// Returns `true` for [`WindowOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, WindowOutcome::Accepted(_))
    }
}

/// Why a sample was excluded from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowReject {
    /// Fewer frame files than the window requires exist and parse.
    Incomplete { found: usize, required: usize },
    /// A frame parsed but does not match the configured width; the
    /// dataset is rectangular, so one odd frame poisons the sample.
    BadWidth {
        frame_index: usize,
        len: usize,
        expected: usize,
    },
}

impl std::fmt::Display for WindowReject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowReject::Incomplete { found, required } => {
                write!(f, "only {found} of {required} frames present")
            }
            WindowReject::BadWidth {
                frame_index,
                len,
                expected,
            } => {
                write!(
                    f,
                    "frame {frame_index} has {len} values, expected {expected}"
                )
            }
        }
    }
}

/// Collects one sample's frames into a window of exactly
/// `config.sequence_len` frames.
///
/// Frame files are visited strictly in index order `0..sequence_len`;
/// there is no reordering and no interpolation for missing interior
/// frames. A frame file that is missing — or that exists but cannot be
/// read — leaves a gap, and any gap rejects the sample as
/// [`WindowReject::Incomplete`]. Unreadable files are logged at debug
/// level; they are indistinguishable from missing ones in the outcome.
///
/// # Example
///
/// ```no_run
/// use gesture_dataset::{window_sample, PipelineConfig};
/// use gesture_store::FrameStore;
///
/// let store = FrameStore::open("migrate-data");
/// let outcome = window_sample(&store, "Heart", "Heart0", &PipelineConfig::default());
/// if let gesture_dataset::WindowOutcome::Accepted(frames) = outcome {
///     assert_eq!(frames.len(), 10);
/// }
/// ```
pub fn window_sample(
    store: &FrameStore,
    label: &str,
    sample: &str,
    config: &PipelineConfig,
) -> WindowOutcome {
    let mut frames = Vec::with_capacity(config.sequence_len);
    for frame_index in 0..config.sequence_len {
        match store.load_frame(label, sample, frame_index) {
            Ok(Some(frame)) => {
                if frame.len() != config.frame_width {
                    return WindowOutcome::Rejected(WindowReject::BadWidth {
                        frame_index,
                        len: frame.len(),
                        expected: config.frame_width,
                    });
                }
                frames.push(frame);
            }
            Ok(None) => {
                tracing::debug!(label, sample, frame_index, "frame file missing");
            }
            Err(e) => {
                tracing::debug!(
                    label,
                    sample,
                    frame_index,
                    error = %e,
                    "frame unreadable, treating as missing"
                );
            }
        }
    }

    if frames.len() == config.sequence_len {
        WindowOutcome::Accepted(frames)
    } else {
        WindowOutcome::Rejected(WindowReject::Incomplete {
            found: frames.len(),
            required: config.sequence_len,
        })
    }
}
