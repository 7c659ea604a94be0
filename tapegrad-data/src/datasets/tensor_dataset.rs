use super::traits::{Dataset, Sample};
use tapegrad_core::{TapeGradError, Tensor};

/// A classification dataset held in memory: a `[n, features]` tensor and one label
/// per row.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Tensor,
    labels: Vec<usize>,
}

impl TensorDataset {
    /// Creates a dataset from a feature matrix and its labels.
    ///
    /// # Errors
    ///
    /// Returns `TapeGradError::RankMismatch` if `features` is not 2-D and
    /// `TapeGradError::ShapeMismatch` if the label count differs from the row count.
    pub fn new(features: Tensor, labels: Vec<usize>) -> Result<Self, TapeGradError> {
        let rows = match features.shape() {
            [rows, _] => *rows,
            shape => {
                return Err(TapeGradError::RankMismatch {
                    expected: 2,
                    actual: shape.len(),
                    operation: "TensorDataset::new".to_string(),
                })
            }
        };
        if labels.len() != rows {
            return Err(TapeGradError::ShapeMismatch {
                expected: format!("{} labels", rows),
                actual: format!("{} labels", labels.len()),
                operation: "TensorDataset::new".to_string(),
            });
        }
        Ok(Self { features, labels })
    }

    pub fn features(&self) -> &Tensor {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Width of each feature vector.
    pub fn num_features(&self) -> usize {
        self.features.shape()[1]
    }

    /// One more than the largest label, or 0 for an empty dataset.
    pub fn num_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&max| max + 1)
    }
}

impl Dataset for TensorDataset {
    type Item = Sample;

    fn get(&self, index: usize) -> Result<Self::Item, TapeGradError> {
        if index >= self.labels.len() {
            return Err(TapeGradError::IndexOutOfBounds {
                index,
                len: self.labels.len(),
            });
        }
        let width = self.num_features();
        let row = self.features.data()[index * width..(index + 1) * width].to_vec();
        Ok((row, self.labels[index]))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
