use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(TapeGradError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(TapeGradError),

    #[error("Input {input_index} tracks gradients but has no gradient after the backward pass")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}: loss+ {loss_plus}, loss- {loss_minus}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Function output does not track gradients although its inputs do")]
    RequiresGradPropagationError,

    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(TapeGradError),
}

impl From<TapeGradError> for GradCheckError {
    fn from(err: TapeGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` builds a computation over the given inputs on a fresh tape. Each input is
/// recorded as a tracked leaf; the analytical gradient is obtained by seeding the
/// output with `output_grad`. The numerical gradient of element `j` of input `i` is
///
/// `(L(x + eps e_j) - L(x - eps e_j)) / (2 eps)` with `L(x) = sum(func(x) * output_grad)`.
///
/// An element passes when `|a - n| <= abs_tol` or `|a - n| <= rel_tol * max(|a|, |n|)`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[Var]) -> Result<Var, TapeGradError>,
{
    // --- 1. Analytical gradients ---
    let mut graph = Graph::new();
    let vars: Vec<Var> = inputs.iter().map(|t| graph.variable(t.clone())).collect();
    let output = func(&mut graph, &vars).map_err(GradCheckError::ForwardPassError)?;
    if !graph.requires_grad(output)? {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    graph
        .backward_with_grad(output, output_grad.clone())
        .map_err(GradCheckError::BackwardPassError)?;

    let mut analytical = Vec::with_capacity(vars.len());
    for (i, &var) in vars.iter().enumerate() {
        match graph.grad(var)? {
            Some(grad) => analytical.push(grad.clone()),
            None => return Err(GradCheckError::MissingAnalyticalGrad { input_index: i }),
        }
    }

    // --- 2. Numerical gradients, element by element ---
    let weighted_loss = |perturbed: &[Tensor]| -> Result<f64, GradCheckError> {
        let mut graph = Graph::no_grad();
        let vars: Vec<Var> = perturbed.iter().map(|t| graph.input(t.clone())).collect();
        let output = func(&mut graph, &vars).map_err(GradCheckError::ForwardPassError)?;
        let value = graph.value(output)?;
        let weighted = value.zip_map(output_grad, "check_grad", |y, g| y * g)?;
        Ok(weighted.data().iter().sum())
    };

    for (i, input) in inputs.iter().enumerate() {
        for j in 0..input.numel() {
            let mut perturbed: Vec<Tensor> = inputs.to_vec();

            perturbed[i].data_mut()[j] = input.data()[j] + epsilon;
            let loss_plus = weighted_loss(&perturbed)?;
            perturbed[i].data_mut()[j] = input.data()[j] - epsilon;
            let loss_minus = weighted_loss(&perturbed)?;

            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: j,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_value = analytical[i].data()[j];
            let close = approx::relative_eq!(
                analytical_value,
                numerical,
                epsilon = abs_tol,
                max_relative = rel_tol
            );
            if !close {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: j,
                    analytical_grad: analytical_value,
                    numerical_grad: numerical,
                    difference: (analytical_value - numerical).abs(),
                });
            }
        }
    }
    log::debug!("gradient check passed for {} inputs", inputs.len());
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
