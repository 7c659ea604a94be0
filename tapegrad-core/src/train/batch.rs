use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// A mini-batch: inputs `[n, features]` with one class label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Tensor,
    pub labels: Vec<usize>,
}

impl Batch {
    /// Creates a batch, checking that there is exactly one label per input row.
    ///
    /// # Errors
    /// * `RankMismatch` if `inputs` is not 2-D.
    /// * `ShapeMismatch` if the label count differs from the row count.
    pub fn new(inputs: Tensor, labels: Vec<usize>) -> Result<Self, TapeGradError> {
        let rows = match inputs.shape() {
            [rows, _] => *rows,
            shape => {
                return Err(TapeGradError::RankMismatch {
                    expected: 2,
                    actual: shape.len(),
                    operation: "Batch::new".to_string(),
                })
            }
        };
        if labels.len() != rows {
            return Err(TapeGradError::ShapeMismatch {
                expected: format!("{} labels", rows),
                actual: format!("{} labels", labels.len()),
                operation: "Batch::new".to_string(),
            });
        }
        Ok(Batch { inputs, labels })
    }

    /// Number of examples in the batch.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A finite, restartable source of mini-batches.
///
/// Each call to `batches` starts a new epoch and yields every batch of that epoch
/// exactly once, in the source's order.
pub trait BatchSource {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, TapeGradError>> + '_>;
}

impl BatchSource for Vec<Batch> {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch, TapeGradError>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
