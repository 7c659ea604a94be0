use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::nn::init;
use crate::nn::module::Module;
use crate::nn::parameter::{read_param, ParamRef, Parameter};
use crate::ops::linalg::linear_op;
use crate::tensor::utils::check_shape;
use crate::tensor::{self, Tensor};
use rand::Rng;
use std::sync::Arc;

/// Applies an affine transformation to the incoming data: `y = x · W + b`.
///
/// `W` has shape `[in_features, out_features]` and `b` has shape `[out_features]`.
/// The input is either a single example `[in_features]` or a batch
/// `[batch, in_features]`.
#[derive(Debug)]
pub struct Linear {
    weight: ParamRef,
    bias: ParamRef,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer with `W ~ N(0, 1 / in_features)` and `b = 0`.
    ///
    /// # Errors
    /// `InvalidConfig` if either feature count is zero.
    pub fn new_with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        rng: &mut R,
    ) -> Result<Self, TapeGradError> {
        if in_features == 0 || out_features == 0 {
            return Err(TapeGradError::InvalidConfig(format!(
                "Linear layer needs positive feature counts, got {} -> {}",
                in_features, out_features
            )));
        }
        let weight = init::lecun_normal(in_features, out_features, rng)?;
        let bias = tensor::zeros(vec![out_features]);
        Self::from_tensors(weight, bias)
    }

    /// Creates a layer from explicit weight and bias values.
    ///
    /// # Errors
    /// * `RankMismatch` if `weight` is not 2-D.
    /// * `InvalidConfig` if either dimension of `weight` is zero.
    /// * `ShapeMismatch` if `bias` is not `[out_features]`.
    pub fn from_tensors(weight: Tensor, bias: Tensor) -> Result<Self, TapeGradError> {
        let (in_features, out_features) = match weight.shape() {
            [i, o] => (*i, *o),
            shape => {
                return Err(TapeGradError::RankMismatch {
                    expected: 2,
                    actual: shape.len(),
                    operation: "Linear::from_tensors".to_string(),
                })
            }
        };
        if in_features == 0 || out_features == 0 {
            return Err(TapeGradError::InvalidConfig(format!(
                "Linear layer needs a non-empty weight, got shape {:?}",
                weight.shape()
            )));
        }
        check_shape(&[out_features], bias.shape(), "Linear::from_tensors bias")?;
        Ok(Linear {
            weight: Parameter::shared(weight, "weight"),
            bias: Parameter::shared(bias, "bias"),
            in_features,
            out_features,
        })
    }

    /// Redraws the weight from `N(0, 1 / in_features)` and zeroes the bias.
    pub fn reset_parameters<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(), TapeGradError> {
        let std = (1.0 / self.in_features as f64).sqrt();
        init::normal_(&self.weight, 0.0, std, rng)?;
        init::zeros_(&self.bias)
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weight(&self) -> &ParamRef {
        &self.weight
    }

    pub fn bias(&self) -> &ParamRef {
        &self.bias
    }

    /// Copy of the current weight value.
    pub fn weight_value(&self) -> Result<Tensor, TapeGradError> {
        Ok(read_param(&self.weight)?.value().clone())
    }

    /// Copy of the current bias value.
    pub fn bias_value(&self) -> Result<Tensor, TapeGradError> {
        Ok(read_param(&self.bias)?.value().clone())
    }
}

impl Module for Linear {
    fn forward(&self, graph: &mut Graph, input: Var) -> Result<Var, TapeGradError> {
        let weight = graph.param(&self.weight)?;
        let bias = graph.param(&self.bias)?;
        linear_op(graph, input, weight, bias)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        vec![Arc::clone(&self.weight), Arc::clone(&self.bias)]
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        vec![
            ("weight".to_string(), Arc::clone(&self.weight)),
            ("bias".to_string(), Arc::clone(&self.bias)),
        ]
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
