use crate::error::TapeGradError;
use crate::nn::parameter::{write_param, ParamRef};
use crate::optim::optimizer_trait::Optimizer;
use crate::optim::param_group::ParamGroup;
use crate::tensor::utils::check_shape;
use crate::tensor::Tensor;
use std::collections::HashMap;
use std::sync::Arc;

/// Stochastic gradient descent.
///
/// With the default options each step applies `p <- p - lr * p.grad` and keeps no
/// state between steps. Optional weight decay adds `weight_decay * p` to the gradient;
/// optional momentum keeps one velocity buffer per parameter:
/// `v <- momentum * v + grad`, `p <- p - lr * v`.
#[derive(Debug)]
pub struct SgdOptimizer {
    param_groups: Vec<ParamGroup>,
    lr: f64,
    momentum: f64,
    weight_decay: f64,
    // Keyed by the parameter's allocation address.
    momentum_buffers: HashMap<usize, Tensor>,
}

impl SgdOptimizer {
    /// Creates plain SGD over `params` with learning rate `lr`.
    ///
    /// # Errors
    /// `InvalidConfig` if `lr` is not a positive finite number.
    pub fn new(params: impl IntoIterator<Item = ParamRef>, lr: f64) -> Result<Self, TapeGradError> {
        Self::with_options(params, lr, 0.0, 0.0)
    }

    /// Creates SGD with momentum and weight decay (L2 penalty) for the default group.
    pub fn with_options(
        params: impl IntoIterator<Item = ParamRef>,
        lr: f64,
        momentum: f64,
        weight_decay: f64,
    ) -> Result<Self, TapeGradError> {
        check_lr(lr)?;
        if !(momentum.is_finite() && momentum >= 0.0) {
            return Err(TapeGradError::InvalidConfig(format!(
                "momentum must be >= 0, got {}",
                momentum
            )));
        }
        if !(weight_decay.is_finite() && weight_decay >= 0.0) {
            return Err(TapeGradError::InvalidConfig(format!(
                "weight decay must be >= 0, got {}",
                weight_decay
            )));
        }
        let params: Vec<ParamRef> = params.into_iter().collect();
        Ok(SgdOptimizer {
            param_groups: vec![ParamGroup::new(params)],
            lr,
            momentum,
            weight_decay,
            momentum_buffers: HashMap::new(),
        })
    }

    /// The default learning rate, used by groups that do not set their own.
    pub fn lr(&self) -> f64 {
        self.lr
    }

    pub fn set_lr(&mut self, lr: f64) -> Result<(), TapeGradError> {
        check_lr(lr)?;
        self.lr = lr;
        Ok(())
    }
}

fn check_lr(lr: f64) -> Result<(), TapeGradError> {
    if !(lr.is_finite() && lr > 0.0) {
        return Err(TapeGradError::InvalidConfig(format!(
            "learning rate must be a positive finite number, got {}",
            lr
        )));
    }
    Ok(())
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self) -> Result<(), TapeGradError> {
        let mut updated = 0usize;
        for group in self.param_groups.iter() {
            let lr = group.options.lr.unwrap_or(self.lr);
            let weight_decay = group.options.weight_decay.unwrap_or(self.weight_decay);

            for param_arc in group.params.iter() {
                let param_id = Arc::as_ptr(param_arc) as usize;
                let mut param = write_param(param_arc)?;
                if !param.requires_grad() {
                    continue;
                }
                let mut d_p = match param.grad() {
                    Some(grad) => grad.clone(),
                    None => continue,
                };
                check_shape(param.shape(), d_p.shape(), "SgdOptimizer::step")?;

                if weight_decay != 0.0 {
                    d_p.add_scaled_(weight_decay, param.value())?;
                }
                if self.momentum != 0.0 {
                    let buffer = self
                        .momentum_buffers
                        .entry(param_id)
                        .or_insert_with(|| crate::tensor::zeros_like(&d_p));
                    buffer.mul_scalar_(self.momentum);
                    buffer.add_(&d_p)?;
                    d_p = buffer.clone();
                }

                param.value_mut().add_scaled_(-lr, &d_p)?;
                updated += 1;
            }
        }
        log::debug!("SGD step updated {} parameters", updated);
        Ok(())
    }

    fn zero_grad(&mut self) {
        for group in self.param_groups.iter() {
            for param_arc in group.params.iter() {
                match param_arc.write() {
                    Ok(mut param) => param.zero_grad(),
                    Err(poisoned) => {
                        log::warn!("Lock for parameter in SgdOptimizer::zero_grad was poisoned. Recovering.");
                        poisoned.into_inner().zero_grad();
                    }
                }
            }
        }
    }

    fn add_param_group(&mut self, param_group: ParamGroup) {
        self.param_groups.push(param_group);
    }

    fn param_groups(&self) -> &[ParamGroup] {
        &self.param_groups
    }

    fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
        &mut self.param_groups
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
