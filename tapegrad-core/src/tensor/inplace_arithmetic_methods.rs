use crate::error::TapeGradError;
use crate::tensor::Tensor;

impl Tensor {
    /// In-place `self += other`.
    pub fn add_(&mut self, other: &Tensor) -> Result<(), TapeGradError> {
        self.axpy_(1.0, other, "add_")
    }

    /// In-place `self -= other`.
    pub fn sub_(&mut self, other: &Tensor) -> Result<(), TapeGradError> {
        self.axpy_(-1.0, other, "sub_")
    }

    /// In-place `self += alpha * other`, the update shared by accumulation and SGD.
    pub fn add_scaled_(&mut self, alpha: f64, other: &Tensor) -> Result<(), TapeGradError> {
        self.axpy_(alpha, other, "add_scaled_")
    }

    pub fn mul_scalar_(&mut self, scalar: f64) {
        for x in self.data.iter_mut() {
            *x *= scalar;
        }
    }

    pub fn fill_(&mut self, value: f64) {
        self.data.fill(value);
    }

    fn axpy_(&mut self, alpha: f64, other: &Tensor, operation: &str) -> Result<(), TapeGradError> {
        if self.shape != other.shape {
            return Err(TapeGradError::shape_mismatch(&self.shape, &other.shape, operation));
        }
        for (x, &y) in self.data.iter_mut().zip(other.data.iter()) {
            *x += alpha * y;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "inplace_arithmetic_methods_test.rs"]
mod tests;
