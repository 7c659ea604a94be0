use super::*;
use crate::autograd::BackwardOp;
use crate::ops::{mul_op, sum_op};
use crate::tensor;

#[test]
fn test_check_grad_passes_for_product() {
    let a = Tensor::new(vec![1.0, -2.0, 3.0], vec![3]).unwrap();
    let b = Tensor::new(vec![0.5, 4.0, -1.5], vec![3]).unwrap();
    let func = |g: &mut Graph, v: &[Var]| mul_op(g, v[0], v[1]);
    let output_grad = tensor::ones(vec![3]);
    check_grad(func, &[a, b], &output_grad, 1e-6, 1e-8, 1e-5).unwrap();
}

/// Doubles its input but claims the gradient is the identity.
#[derive(Debug)]
struct WrongBackward;

impl BackwardOp for WrongBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
        Ok(vec![grad_output.clone()])
    }
}

#[test]
fn test_check_grad_detects_wrong_rule() {
    let x = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let func = |g: &mut Graph, v: &[Var]| {
        let doubled = g.value(v[0])?.map(|x| 2.0 * x);
        let y = g.record(doubled, &[v[0]], || Box::new(WrongBackward))?;
        sum_op(g, y)
    };
    let result = check_grad(func, &[x], &Tensor::scalar(1.0), 1e-6, 1e-8, 1e-5);
    assert!(matches!(
        result,
        Err(GradCheckError::GradientMismatch {
            input_index: 0,
            element_index: 0,
            ..
        })
    ));
}

#[test]
fn test_check_grad_reports_forward_errors() {
    let a = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let func = |g: &mut Graph, v: &[Var]| mul_op(g, v[0], v[1]);
    let result = check_grad(func, &[a, b], &tensor::ones(vec![2]), 1e-6, 1e-8, 1e-5);
    assert!(matches!(result, Err(GradCheckError::ForwardPassError(_))));
}
