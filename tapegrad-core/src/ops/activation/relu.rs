use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Rectified linear unit, `max(0, x)` element-wise.
pub fn relu_op(graph: &mut Graph, a: Var) -> Result<Var, TapeGradError> {
    let input = graph.value(a)?.clone();
    let result = input.map(|x| if x > 0.0 { x } else { 0.0 });
    graph.record(result, &[a], move || Box::new(ReluBackward { input }))
}

#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl BackwardOp for ReluBackward {
    /// The gradient passes where the input was strictly positive; it is zero at `x == 0`.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let grad = grad_output.zip_map(&self.input, "ReluBackward", |g, x| {
            if x > 0.0 {
                g
            } else {
                0.0
            }
        })?;
        Ok(vec![grad])
    }
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
