//! FrameStore — the directory-backed store for captured frames.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ndarray::{aview1, Array1};
use ndarray_npy::{read_npy, write_npy};

use gesture_core::{Frame, GestureError};

use crate::layout;

/// Directory-backed store holding one `.npy` file per captured frame.
///
/// # Sample Lifecycle
///
/// 1. A writer asks for a fresh sample via [`FrameStore::allocate_sample`]
/// 2. The allocator hands out the label's next free index and creates
///    the sample directory, refusing to reuse one that already exists
/// 3. Frames are written under that directory as `<sample>_f<i>.npy`
/// 4. Readers enumerate samples with [`FrameStore::list_samples`] and
///    load frames individually with [`FrameStore::load_frame`]
///
/// Allocation is serialized by a per-store mutex over per-label
/// counters, and the directory creation itself fails on collision, so
/// two writers racing on the same label can never target the same
/// sample directory — not even when a second process shares the root.
///
/// # Example
///
/// ```no_run
/// use gesture_core::Frame;
/// use gesture_store::FrameStore;
///
/// let store = FrameStore::open("data");
/// let frames = vec![Frame::new(vec![0.0; 126]); 10];
/// let sample = store.write_sample("Heart", &frames).unwrap();
/// assert!(store.load_frame("Heart", &sample, 0).unwrap().is_some());
/// ```
#[derive(Debug)]
pub struct FrameStore {
    root: PathBuf,
    /// Next sample index to try, per label. Seeded lazily from the
    /// directory contents on a label's first allocation.
    next_indices: Mutex<HashMap<String, u64>>,
}

impl FrameStore {
    /// Opens a store rooted at `root`.
    ///
    /// No I/O happens here; directories are created as samples are
    /// written, so opening a store for a dataset that does not exist
    /// yet is fine.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_indices: Mutex::new(HashMap::new()),
        }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every sample of a class.
    pub fn class_dir(&self, label: &str) -> PathBuf {
        self.root.join(label)
    }

    /// Directory holding one sample's frame files.
    pub fn sample_dir(&self, label: &str, sample: &str) -> PathBuf {
        self.class_dir(label).join(sample)
    }

    /// Path of one frame file.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_store::FrameStore;
    ///
    /// let store = FrameStore::open("data");
    /// let path = store.frame_path("Heart", "Heart3", 7);
    /// assert!(path.ends_with("Heart/Heart3/Heart3_f7.npy"));
    /// ```
    pub fn frame_path(&self, label: &str, sample: &str, frame_index: usize) -> PathBuf {
        self.sample_dir(label, sample)
            .join(layout::frame_file_name(sample, frame_index))
    }

    /// Loads one frame, distinguishing absent from unreadable.
    ///
    /// Returns `Ok(None)` if the frame file does not exist. A file
    /// that exists but cannot be read or decoded is an error — the
    /// data is there and something is wrong with it.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Storage`] for I/O failures and for
    /// files that are not one-dimensional float64 `.npy` arrays.
    pub fn load_frame(
        &self,
        label: &str,
        sample: &str,
        frame_index: usize,
    ) -> Result<Option<Frame>, GestureError> {
        let path = self.frame_path(label, sample, frame_index);
        if !path.is_file() {
            return Ok(None);
        }
        let values: Array1<f64> =
            read_npy(&path).map_err(|e| GestureError::storage(&path, e))?;
        Ok(Some(Frame::new(values.to_vec())))
    }

    /// Writes one frame, creating the sample directory if needed.
    ///
    /// The file is a one-dimensional little-endian float64 `.npy`
    /// array, byte-compatible with what the original numpy tooling
    /// wrote and read.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Storage`] if the directory or file
    /// cannot be written.
    pub fn write_frame(
        &self,
        label: &str,
        sample: &str,
        frame_index: usize,
        frame: &Frame,
    ) -> Result<(), GestureError> {
        let dir = self.sample_dir(label, sample);
        std::fs::create_dir_all(&dir).map_err(|e| GestureError::storage(&dir, e))?;
        let path = dir.join(layout::frame_file_name(sample, frame_index));
        write_npy(&path, &aview1(&frame.values)).map_err(|e| GestureError::storage(&path, e))
    }

    /// Sample directory names for a label, sorted, artifacts skipped.
    ///
    /// Non-directory entries and the ignorable names in
    /// [`layout::IGNORED_ENTRIES`] are filtered out. A label with no
    /// class directory yields an empty list; callers that care about
    /// the difference can check [`FrameStore::class_dir`] themselves.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Storage`] if the class directory exists
    /// but cannot be enumerated.
    pub fn list_samples(&self, label: &str) -> Result<Vec<String>, GestureError> {
        let class_dir = self.class_dir(label);
        if !class_dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries =
            std::fs::read_dir(&class_dir).map_err(|e| GestureError::storage(&class_dir, e))?;

        let mut samples = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GestureError::storage(&class_dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if layout::is_ignored_entry(&name) {
                continue;
            }
            let is_dir = entry
                .file_type()
                .map_err(|e| GestureError::storage(entry.path(), e))?
                .is_dir();
            if is_dir {
                samples.push(name);
            }
        }
        samples.sort();
        Ok(samples)
    }

    /// Allocates the next free sample for a label and creates its
    /// directory.
    ///
    /// The per-label counter is seeded from the number of existing
    /// samples and bumped under the store's mutex, so concurrent
    /// in-process writers serialize here. The directory is created
    /// with a plain (non-recursive) create that fails if the name is
    /// taken, so an index that something else already used — another
    /// process, or a dataset with holes — is skipped, never reused.
    ///
    /// Returns the new sample's directory name.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Storage`] if directories cannot be
    /// created or enumerated.
    pub fn allocate_sample(&self, label: &str) -> Result<String, GestureError> {
        let class_dir = self.class_dir(label);
        std::fs::create_dir_all(&class_dir).map_err(|e| GestureError::storage(&class_dir, e))?;

        let seed = self.list_samples(label)?.len() as u64;
        let mut next_indices = self.next_indices.lock().map_err(|_| GestureError::Storage {
            path: self.root.display().to_string(),
            message: "sample allocator mutex poisoned".to_string(),
        })?;
        let next = match next_indices.entry(label.to_string()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(seed),
        };

        loop {
            let sample = layout::sample_dir_name(label, *next);
            let dir = class_dir.join(&sample);
            match std::fs::create_dir(&dir) {
                Ok(()) => {
                    *next += 1;
                    return Ok(sample);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    *next += 1;
                }
                Err(e) => return Err(GestureError::storage(&dir, e)),
            }
        }
    }

    /// Allocates a sample and writes its frames in index order.
    ///
    /// Frames already written are left in place if a later write
    /// fails; there is no rollback. An incomplete sample is exactly
    /// what the training scan knows how to drop.
    ///
    /// Returns the sample's directory name.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Storage`] if allocation or any frame
    /// write fails.
    pub fn write_sample(&self, label: &str, frames: &[Frame]) -> Result<String, GestureError> {
        let sample = self.allocate_sample(label)?;
        for (frame_index, frame) in frames.iter().enumerate() {
            self.write_frame(label, &sample, frame_index, frame)?;
        }
        Ok(sample)
    }
}
