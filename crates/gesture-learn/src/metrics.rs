//! Classifier evaluation: confusion counts, accuracy, per-class F1.
//!
//! Compiled unconditionally so evaluation reports can be rendered and
//! tested without pulling in candle.

use std::fmt::Write as _;

use gesture_core::{GestureError, LabelMap};

/// Prediction counts indexed `[actual][predicted]`.
///
/// # Example
///
/// ```
/// use gesture_learn::ConfusionMatrix;
///
/// let matrix = ConfusionMatrix::from_predictions(&[0, 1, 1], &[0, 1, 0], 2).unwrap();
/// assert_eq!(matrix.count(1, 0), 1);
/// assert!((matrix.accuracy() - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
    num_classes: usize,
}

impl ConfusionMatrix {
    /// Tallies paired actual/predicted class indices.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::Training`] if the slices differ in length
    /// or any index is outside `0..num_classes`.
    pub fn from_predictions(
        actual: &[usize],
        predicted: &[usize],
        num_classes: usize,
    ) -> Result<Self, GestureError> {
        if actual.len() != predicted.len() {
            return Err(GestureError::Training {
                message: format!(
                    "metrics: {} actual labels vs {} predictions",
                    actual.len(),
                    predicted.len()
                ),
            });
        }

        let mut counts = vec![vec![0usize; num_classes]; num_classes];
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            if a >= num_classes || p >= num_classes {
                return Err(GestureError::Training {
                    message: format!(
                        "metrics: class index {} out of range for {num_classes} classes",
                        a.max(p)
                    ),
                });
            }
            counts[a][p] += 1;
        }

        Ok(Self {
            counts,
            num_classes,
        })
    }

    /// Number of samples with actual class `actual` predicted as `predicted`.
    ///
    /// Out-of-range indices count zero.
    pub fn count(&self, actual: usize, predicted: usize) -> usize {
        self.counts
            .get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of tallied samples.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Number of classes the matrix was built for.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Fraction of samples on the diagonal; `0.0` for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.num_classes).map(|c| self.counts[c][c]).sum();
        correct as f64 / total as f64
    }

    /// F1 score per class, in class-index order.
    ///
    /// A class with no support and no predictions scores `0.0` rather
    /// than poisoning the average with a division by zero.
    pub fn per_class_f1(&self) -> Vec<f64> {
        (0..self.num_classes)
            .map(|class| {
                let tp = self.counts[class][class] as f64;
                let actual_total: usize = self.counts[class].iter().sum();
                let predicted_total: usize =
                    (0..self.num_classes).map(|a| self.counts[a][class]).sum();

                let precision = if predicted_total > 0 {
                    tp / predicted_total as f64
                } else {
                    0.0
                };
                let recall = if actual_total > 0 {
                    tp / actual_total as f64
                } else {
                    0.0
                };
                if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Unweighted mean of the per-class F1 scores.
    pub fn macro_f1(&self) -> f64 {
        if self.num_classes == 0 {
            return 0.0;
        }
        self.per_class_f1().iter().sum::<f64>() / self.num_classes as f64
    }

    /// Renders the matrix as an aligned text table, rows actual and
    /// columns predicted. Classes beyond the label map render as `?`.
    pub fn render(&self, labels: &LabelMap) -> String {
        let names: Vec<&str> = (0..self.num_classes)
            .map(|class| labels.name_of(class).unwrap_or("?"))
            .collect();
        let width = names
            .iter()
            .map(|name| name.len())
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1)
            .max(5)
            + 2;

        let mut out = String::new();
        let _ = write!(out, "{:>width$}", "");
        for name in &names {
            let _ = write!(out, "{name:>width$}");
        }
        let _ = writeln!(out);
        for (actual, row) in self.counts.iter().enumerate() {
            let _ = write!(out, "{:>width$}", names[actual]);
            for &count in row {
                let _ = write!(out, "{count:>width$}");
            }
            let _ = writeln!(out);
        }
        out
    }
}
