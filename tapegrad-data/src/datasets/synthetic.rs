//! Synthetic datasets for smoke tests and demos.

use super::tensor_dataset::TensorDataset;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tapegrad_core::{TapeGradError, Tensor};

/// Centre of the class-1 cluster; class 0 sits at its mirror image.
const BLOB_CENTER: [f64; 2] = [2.0, 2.0];

/// Two Gaussian clusters in the plane, labelled 0 and 1, on either side of the line
/// `x + y = 0`.
///
/// Samples alternate between the classes so that any contiguous batch holds both.
/// With a small `std` (well below the centre distance of `2 * sqrt(2)`) the classes
/// are linearly separable with overwhelming probability.
///
/// # Errors
/// `InvalidConfig` if `std` is negative or not finite, or if `samples_per_class` is 0.
pub fn separable_blobs<R: Rng + ?Sized>(
    samples_per_class: usize,
    std: f64,
    rng: &mut R,
) -> Result<TensorDataset, TapeGradError> {
    if samples_per_class == 0 {
        return Err(TapeGradError::InvalidConfig(
            "separable_blobs needs at least one sample per class".to_string(),
        ));
    }
    if !(std.is_finite() && std >= 0.0) {
        return Err(TapeGradError::InvalidConfig(format!(
            "blob standard deviation must be finite and >= 0, got {}",
            std
        )));
    }
    let noise = Normal::new(0.0, std).map_err(|e| {
        TapeGradError::InvalidConfig(format!("blob standard deviation {}: {}", std, e))
    })?;

    let n = 2 * samples_per_class;
    let mut data = Vec::with_capacity(n * 2);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let label = i % 2;
        let sign = if label == 1 { 1.0 } else { -1.0 };
        for center in BLOB_CENTER {
            data.push(sign * center + noise.sample(rng));
        }
        labels.push(label);
    }
    log::debug!("generated {} separable samples with std {}", n, std);
    TensorDataset::new(Tensor::new(data, vec![n, 2])?, labels)
}

#[cfg(test)]
#[path = "synthetic_test.rs"]
mod tests;
