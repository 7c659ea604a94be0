use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::ops::loss::cross_entropy_op;

/// Mean cross-entropy between raw logits `[batch, classes]` and integer class labels.
#[derive(Debug, Clone, Default)]
pub struct CrossEntropyLoss {}

impl CrossEntropyLoss {
    pub fn new() -> Self {
        CrossEntropyLoss {}
    }

    /// Records the loss on `graph` and returns the scalar loss value.
    ///
    /// # Errors
    /// * `ShapeMismatch` if the label count differs from the batch size.
    /// * `LabelOutOfRange` if a label is not a valid class index.
    pub fn calculate(&self, graph: &mut Graph, logits: Var, labels: &[usize]) -> Result<Var, TapeGradError> {
        cross_entropy_op(graph, logits, labels)
    }
}
