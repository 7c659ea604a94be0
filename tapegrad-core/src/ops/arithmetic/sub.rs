use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Element-wise `a - b`. Both values must have the same shape.
pub fn sub_op(graph: &mut Graph, a: Var, b: Var) -> Result<Var, TapeGradError> {
    let result = graph.value(a)?.zip_map(graph.value(b)?, "sub_op", |x, y| x - y)?;
    graph.record(result, &[a, b], || Box::new(SubBackward))
}

#[derive(Debug)]
struct SubBackward;

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        Ok(vec![grad_output.clone(), grad_output.map(|g| -g)])
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
