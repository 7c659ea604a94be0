use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::ops::loss::nll_loss_op;

/// Mean negative log-likelihood over log-probabilities `[batch, classes]`.
#[derive(Debug, Clone, Default)]
pub struct NLLLoss {}

impl NLLLoss {
    pub fn new() -> Self {
        NLLLoss {}
    }

    pub fn calculate(&self, graph: &mut Graph, log_probs: Var, labels: &[usize]) -> Result<Var, TapeGradError> {
        nll_loss_op(graph, log_probs, labels)
    }
}
