use crate::error::TapeGradError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable operation.
///
/// Any operation that records a tracked value on a [`Graph`](super::Graph) stores an
/// implementation of this trait on the produced node. The node also records the input
/// values, in forward-call order, so the op itself only keeps the saved tensors its
/// gradient rule needs.
pub trait BackwardOp: Debug {
    /// Computes the gradients of the operation's inputs from the gradient of its output.
    ///
    /// # Arguments
    /// * `grad_output`: dL/dOutput, with the same shape as the operation's output.
    ///
    /// # Returns
    /// * `Ok(Vec<Tensor>)`: one gradient per input, in the order the inputs were passed
    ///   to the forward operation. Each has the shape of its input.
    /// * `Err(TapeGradError)`: if the gradient cannot be computed (e.g. shape mismatch).
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError>;
}
