//! The closed set of gesture class names.
//!
//! Class names come from a plain text file, one name per line, and the
//! line position IS the class index — the dataset's one-hot columns,
//! the model's output units, and the store's directory names all key
//! off it. The map is built once at startup and passed explicitly to
//! everything that needs it; nothing re-reads the file mid-pipeline.

use std::collections::HashMap;
use std::path::Path;

use crate::error::GestureError;

/// Ordered, closed enumeration of gesture class names.
///
/// # Example
///
/// ```
/// use gesture_core::LabelMap;
///
/// let labels = LabelMap::from_names(["Hello", "Heart", "Yes"]).unwrap();
/// assert_eq!(labels.len(), 3);
/// assert_eq!(labels.index_of("Heart"), Some(1));
/// assert_eq!(labels.name_of(1), Some("Heart"));
/// ```
#[derive(Debug, Clone)]
pub struct LabelMap {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl LabelMap {
    /// Reads the enumeration from a names file, one class per line.
    ///
    /// Blank lines are skipped (a trailing newline does not create a
    /// phantom class) and Windows line endings are tolerated. Order of
    /// the remaining lines is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Storage`] if the file cannot be read and
    /// [`GestureError::EmptyLabelSet`] if no non-blank lines remain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gesture_core::LabelMap;
    ///
    /// let labels = LabelMap::from_file("gesture.names").unwrap();
    /// assert!(!labels.is_empty());
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GestureError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| GestureError::storage(path, e))?;
        let names = text.lines().map(|line| line.trim()).filter(|line| !line.is_empty());
        Self::build(names).ok_or_else(|| GestureError::EmptyLabelSet {
            path: path.display().to_string(),
        })
    }

    /// Builds the enumeration from an in-memory list of names.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::EmptyLabelSet`] if the list is empty.
    pub fn from_names<I, S>(names: I) -> Result<Self, GestureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(names).ok_or_else(|| GestureError::EmptyLabelSet {
            path: "<in-memory>".to_string(),
        })
    }

    /// Shared constructor: keeps order, drops blanks, first occurrence
    /// wins on duplicates. Returns `None` when nothing usable remains.
    fn build<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut indices = HashMap::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || indices.contains_key(name) {
                continue;
            }
            indices.insert(name.to_string(), ordered.len());
            ordered.push(name.to_string());
        }
        if ordered.is_empty() {
            None
        } else {
            Some(Self {
                names: ordered,
                indices,
            })
        }
    }

    /// The class index for a name, if the name is in the enumeration.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// The class name for an index, if the index is in range.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the enumeration holds no classes.
    ///
    /// Always `false` for maps built by the public constructors.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All class names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// One-hot row for a class index: all zeros except a 1.0 at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::LabelIndexOutOfRange`] if `index` is not
    /// a valid class index.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_core::LabelMap;
    ///
    /// let labels = LabelMap::from_names(["A", "B", "C"]).unwrap();
    /// assert_eq!(labels.one_hot(1).unwrap(), vec![0.0, 1.0, 0.0]);
    /// ```
    pub fn one_hot(&self, index: usize) -> Result<Vec<f64>, GestureError> {
        if index >= self.names.len() {
            return Err(GestureError::LabelIndexOutOfRange {
                index,
                max: self.names.len(),
            });
        }
        let mut row = vec![0.0; self.names.len()];
        row[index] = 1.0;
        Ok(row)
    }

    /// Recovers the class index from a one-hot (or score) row by argmax.
    ///
    /// Returns `None` for an empty row. Ties resolve to the lowest
    /// index, which makes `decode_one_hot(one_hot(i)) == i` for every
    /// valid `i`.
    ///
    /// # Example
    ///
    /// ```
    /// use gesture_core::LabelMap;
    ///
    /// let labels = LabelMap::from_names(["A", "B", "C"]).unwrap();
    /// for i in 0..labels.len() {
    ///     let row = labels.one_hot(i).unwrap();
    ///     assert_eq!(labels.decode_one_hot(&row), Some(i));
    /// }
    /// ```
    pub fn decode_one_hot(&self, row: &[f64]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in row.iter().enumerate() {
            match best {
                Some((_, bv)) if v <= bv => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }
}
