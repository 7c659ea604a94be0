use crate::error::TapeGradError;
use crate::tensor::utils::check_shape;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to a parameter: owned by its layer, borrowed by the optimizer and by
/// every tape that loads it.
pub type ParamRef = Arc<RwLock<Parameter>>;

/// A trainable value of a module, together with its persistent gradient buffer.
///
/// Parameters outlive the per-step computation graphs. A graph copies the value when
/// the parameter is loaded and accumulates into `grad` during backward. Only the
/// optimizer writes the value.
pub struct Parameter {
    value: Tensor,
    grad: Option<Tensor>,
    requires_grad: bool,
    name: Option<String>,
}

impl Parameter {
    /// Creates a new Parameter from a Tensor. Parameters require gradients by default.
    pub fn new(value: Tensor, name: Option<String>) -> Self {
        Parameter {
            value,
            grad: None,
            requires_grad: true,
            name,
        }
    }

    /// Creates a parameter already wrapped in its shared handle.
    pub fn shared(value: Tensor, name: &str) -> ParamRef {
        Arc::new(RwLock::new(Parameter::new(value, Some(name.to_string()))))
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn numel(&self) -> usize {
        self.value.numel()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Freezes (`false`) or unfreezes (`true`) the parameter.
    pub fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }

    /// Returns the accumulated gradient, if any backward pass reached this parameter.
    pub fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// Adds `grad` into the gradient buffer, allocating it on first use.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `grad` does not have the parameter's shape.
    pub fn accumulate_grad(&mut self, grad: &Tensor) -> Result<(), TapeGradError> {
        check_shape(self.value.shape(), grad.shape(), "Parameter::accumulate_grad")?;
        match self.grad.as_mut() {
            Some(existing) => existing.add_(grad)?,
            None => self.grad = Some(grad.clone()),
        }
        Ok(())
    }

    /// Resets the gradient to "unset" without touching the value.
    pub fn zero_grad(&mut self) {
        self.grad = None;
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("shape", &self.value.shape())
            .field("requires_grad", &self.requires_grad)
            .field("has_grad", &self.grad.is_some())
            .finish()
    }
}

/// Acquires a read lock on a shared parameter.
pub fn read_param(param: &ParamRef) -> Result<RwLockReadGuard<'_, Parameter>, TapeGradError> {
    param.read().map_err(|e| TapeGradError::LockError {
        lock_type: "read".to_string(),
        reason: format!("parameter lock poisoned: {}", e),
    })
}

/// Acquires a write lock on a shared parameter.
pub fn write_param(param: &ParamRef) -> Result<RwLockWriteGuard<'_, Parameter>, TapeGradError> {
    param.write().map_err(|e| TapeGradError::LockError {
        lock_type: "write".to_string(),
        reason: format!("parameter lock poisoned: {}", e),
    })
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
