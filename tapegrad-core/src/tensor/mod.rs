// src/tensor/mod.rs

use crate::error::TapeGradError;

pub mod create;
mod inplace_arithmetic_methods;
pub mod utils;

pub use create::{full, ones, ones_like, randn, zeros, zeros_like};

/// A dense, row-major, CPU-resident array of `f64` values.
///
/// `Tensor` is a plain value type: it carries no gradient and no graph link. The
/// autograd bookkeeping (gradient slot, tracking flag, producing operation) lives in
/// the [`Graph`](crate::autograd::Graph) that records operations over tensors, and in
/// [`Parameter`](crate::nn::Parameter) for trainable values.
///
/// A tensor with an empty shape is a scalar holding exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f64>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a new tensor from flat row-major data and a shape.
    ///
    /// # Errors
    /// Returns `TapeGradError::TensorCreation` if `data.len()` differs from the number
    /// of elements implied by `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, TapeGradError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(TapeGradError::TensorCreation {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: vec![value],
            shape: Vec::new(),
        }
    }

    /// Creates a 2-D tensor from a slice of equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, TapeGradError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TapeGradError::shape_mismatch(
                    &[cols],
                    &[row.len()],
                    "Tensor::from_rows",
                ));
            }
            data.extend_from_slice(row);
        }
        Tensor::new(data, vec![rows.len(), cols])
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns the flat row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consumes the tensor and returns its flat data.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Returns the single value of a one-element tensor.
    ///
    /// # Errors
    /// `BackwardNonScalar`-style callers rely on this: any tensor with more than one
    /// element yields a `ShapeMismatch`.
    pub fn item(&self) -> Result<f64, TapeGradError> {
        if self.data.len() != 1 {
            return Err(TapeGradError::shape_mismatch(&[], &self.shape, "Tensor::item"));
        }
        Ok(self.data[0])
    }

    /// Returns a new tensor with `f` applied to every element.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Tensor {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Combines two tensors of identical shape element by element.
    pub fn zip_map(
        &self,
        other: &Tensor,
        operation: &str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Tensor, TapeGradError> {
        if self.shape != other.shape {
            return Err(TapeGradError::shape_mismatch(&self.shape, &other.shape, operation));
        }
        Ok(Tensor {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
        })
    }

    /// Returns a tensor sharing this data under a new shape with the same element count.
    pub fn reshape(&self, shape: Vec<usize>) -> Result<Tensor, TapeGradError> {
        let numel: usize = shape.iter().product();
        if numel != self.numel() {
            return Err(TapeGradError::shape_mismatch(&self.shape, &shape, "reshape"));
        }
        Ok(Tensor {
            data: self.data.clone(),
            shape,
        })
    }

    /// Index of the largest element in each row (first one wins on ties).
    ///
    /// A rank-1 tensor is treated as a single row.
    pub fn argmax_rows(&self) -> Result<Vec<usize>, TapeGradError> {
        let (rows, cols) = utils::as_rows(&self.shape, "argmax_rows")?;
        if cols == 0 {
            return Err(TapeGradError::shape_mismatch(&[rows, 1], &self.shape, "argmax_rows"));
        }
        Ok(self
            .data
            .chunks(cols)
            .map(|row| {
                let mut best = 0;
                for (j, &v) in row.iter().enumerate().skip(1) {
                    if v > row[best] {
                        best = j;
                    }
                }
                best
            })
            .collect())
    }

    /// Returns true if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}
