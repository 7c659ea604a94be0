use crate::error::TapeGradError;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Creates a tensor of the given shape filled with `value`.
pub fn full(shape: Vec<usize>, value: f64) -> Tensor {
    let numel: usize = shape.iter().product();
    Tensor {
        data: vec![value; numel],
        shape,
    }
}

pub fn zeros(shape: Vec<usize>) -> Tensor {
    full(shape, 0.0)
}

pub fn ones(shape: Vec<usize>) -> Tensor {
    full(shape, 1.0)
}

/// Creates a zero tensor with the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    zeros(tensor.shape().to_vec())
}

pub fn ones_like(tensor: &Tensor) -> Tensor {
    ones(tensor.shape().to_vec())
}

/// Creates a tensor with values drawn from `N(mean, std^2)`.
///
/// # Errors
/// Returns `InvalidConfig` if `std` is negative or not finite.
pub fn randn<R: Rng + ?Sized>(
    shape: Vec<usize>,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<Tensor, TapeGradError> {
    if !(std.is_finite() && std >= 0.0) {
        return Err(TapeGradError::InvalidConfig(format!(
            "standard deviation must be finite and >= 0, got {}",
            std
        )));
    }
    let normal = Normal::new(mean, std).map_err(|e| {
        TapeGradError::InvalidConfig(format!("normal distribution N({}, {}^2): {}", mean, std, e))
    })?;
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| normal.sample(rng)).collect();
    Tensor::new(data, shape)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
