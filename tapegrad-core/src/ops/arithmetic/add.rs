use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Element-wise `a + b`. Both values must have the same shape.
pub fn add_op(graph: &mut Graph, a: Var, b: Var) -> Result<Var, TapeGradError> {
    let result = graph.value(a)?.zip_map(graph.value(b)?, "add_op", |x, y| x + y)?;
    graph.record(result, &[a, b], || Box::new(AddBackward))
}

#[derive(Debug)]
struct AddBackward;

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        Ok(vec![grad_output.clone(), grad_output.clone()])
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
