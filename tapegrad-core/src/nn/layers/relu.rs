use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;
use crate::ops::activation::relu_op;

/// Layer that applies the Rectified Linear Unit (ReLU) activation function.
///
/// This layer does not have any learnable parameters.
#[derive(Debug, Default, Clone)]
pub struct ReLU {}

impl ReLU {
    /// Creates a new ReLU layer.
    pub fn new() -> Self {
        ReLU {}
    }
}

impl Module for ReLU {
    fn forward(&self, graph: &mut Graph, input: Var) -> Result<Var, TapeGradError> {
        relu_op(graph, input)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        Vec::new()
    }
}
