use crate::autograd::{BackwardOp, Graph, Var};
use crate::error::TapeGradError;
use crate::ops::linalg::matmul::matmul;
use crate::ops::linalg::transpose::transpose;
use crate::tensor::utils::check_shape;
use crate::tensor::Tensor;

/// Fused affine transform `input · weight + bias`.
///
/// * `input`: `[in_features]` (a single example) or `[batch, in_features]`
/// * `weight`: `[in_features, out_features]`
/// * `bias`: `[out_features]`, added to every row
///
/// The output is `[out_features]` or `[batch, out_features]`, following `input`.
pub fn linear_op(graph: &mut Graph, input: Var, weight: Var, bias: Var) -> Result<Var, TapeGradError> {
    let input_value = graph.value(input)?.clone();
    let weight_value = graph.value(weight)?.clone();
    let bias_value = graph.value(bias)?;

    let (in_features, out_features) = match weight_value.shape() {
        [i, o] => (*i, *o),
        shape => {
            return Err(TapeGradError::RankMismatch {
                expected: 2,
                actual: shape.len(),
                operation: "linear_op weight".to_string(),
            })
        }
    };
    if out_features == 0 {
        return Err(TapeGradError::ShapeMismatch {
            expected: format!("[{}, out_features > 0]", in_features),
            actual: format!("{:?}", weight_value.shape()),
            operation: "linear_op weight".to_string(),
        });
    }
    check_shape(&[out_features], bias_value.shape(), "linear_op bias")?;
    let single_example = input_value.rank() == 1;
    let batch_input = as_batch(&input_value, in_features)?;

    let mut output = matmul(&batch_input, &weight_value)?;
    for row in output.data_mut().chunks_mut(out_features) {
        for (o, b) in row.iter_mut().zip(bias_value.data().iter()) {
            *o += b;
        }
    }
    if single_example {
        output = output.reshape(vec![out_features])?;
    }

    graph.record(output, &[input, weight, bias], move || {
        Box::new(LinearBackward {
            input: batch_input,
            weight: weight_value,
            single_example,
        })
    })
}

/// Views `input` as `[batch, in_features]`, checking the feature width.
fn as_batch(input: &Tensor, in_features: usize) -> Result<Tensor, TapeGradError> {
    match input.shape() {
        [features] if *features == in_features => input.reshape(vec![1, in_features]),
        [_, features] if *features == in_features => Ok(input.clone()),
        [_] | [_, _] => Err(TapeGradError::ShapeMismatch {
            expected: format!("[batch, {}] or [{}]", in_features, in_features),
            actual: format!("{:?}", input.shape()),
            operation: "linear_op input".to_string(),
        }),
        shape => Err(TapeGradError::RankMismatch {
            expected: 2,
            actual: shape.len(),
            operation: "linear_op input".to_string(),
        }),
    }
}

#[derive(Debug)]
struct LinearBackward {
    /// Input as `[batch, in_features]`.
    input: Tensor,
    weight: Tensor,
    single_example: bool,
}

impl BackwardOp for LinearBackward {
    /// dX = G · Wᵀ, dW = Xᵀ · G, db = column sums of G over the batch.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        let out_features = self.weight.shape()[1];
        let batch = self.input.shape()[0];
        let grad = grad_output.reshape(vec![batch, out_features])?;

        let mut grad_input = matmul(&grad, &transpose(&self.weight)?)?;
        if self.single_example {
            grad_input = grad_input.reshape(vec![self.input.shape()[1]])?;
        }
        let grad_weight = matmul(&transpose(&self.input)?, &grad)?;

        let mut bias_sums = vec![0.0; out_features];
        for row in grad.data().chunks(out_features) {
            for (s, g) in bias_sums.iter_mut().zip(row.iter()) {
                *s += g;
            }
        }
        let grad_bias = Tensor::new(bias_sums, vec![out_features])?;

        Ok(vec![grad_input, grad_weight, grad_bias])
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
