//! Parameter initialization schemes.

use crate::error::TapeGradError;
use crate::nn::parameter::{write_param, ParamRef};
use crate::tensor::{self, Tensor};
use rand::Rng;

/// Draws a `[fan_in, fan_out]` weight matrix from `N(0, 1 / fan_in)`.
///
/// # Errors
/// `InvalidConfig` if `fan_in` is zero.
pub fn lecun_normal<R: Rng + ?Sized>(
    fan_in: usize,
    fan_out: usize,
    rng: &mut R,
) -> Result<Tensor, TapeGradError> {
    if fan_in == 0 {
        return Err(TapeGradError::InvalidConfig(
            "lecun_normal requires fan_in > 0".to_string(),
        ));
    }
    let std = (1.0 / fan_in as f64).sqrt();
    tensor::randn(vec![fan_in, fan_out], 0.0, std, rng)
}

/// Refills a parameter in place with samples from `N(mean, std^2)`. The gradient is kept.
pub fn normal_<R: Rng + ?Sized>(
    param: &ParamRef,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<(), TapeGradError> {
    let mut guard = write_param(param)?;
    let fresh = tensor::randn(guard.shape().to_vec(), mean, std, rng)?;
    *guard.value_mut() = fresh;
    Ok(())
}

/// Fills a parameter in place with 0.
pub fn zeros_(param: &ParamRef) -> Result<(), TapeGradError> {
    write_param(param)?.value_mut().fill_(0.0);
    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
