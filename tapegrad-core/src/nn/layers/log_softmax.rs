use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;
use crate::ops::activation::log_softmax_op;

/// Turns logits into log-probabilities along the class dimension.
///
/// Used as the last layer of a network trained with [`NLLLoss`](crate::nn::NLLLoss).
#[derive(Debug, Default, Clone)]
pub struct LogSoftmax {}

impl LogSoftmax {
    pub fn new() -> Self {
        LogSoftmax {}
    }
}

impl Module for LogSoftmax {
    fn forward(&self, graph: &mut Graph, input: Var) -> Result<Var, TapeGradError> {
        log_softmax_op(graph, input)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        Vec::new()
    }
}
