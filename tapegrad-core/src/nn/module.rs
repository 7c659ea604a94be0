use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::nn::parameter::ParamRef;
use std::fmt::Debug;

/// The base trait for network modules (layers and containers).
///
/// A module owns its parameters and is otherwise stateless: `forward` reads the
/// parameters onto the given tape and records the operations applied to `input`.
pub trait Module: Debug {
    /// Performs a forward pass on `graph`.
    ///
    /// # Returns
    /// The value holding the module's output, or a `TapeGradError` if the input does
    /// not fit the module (e.g. wrong feature count).
    fn forward(&self, graph: &mut Graph, input: Var) -> Result<Var, TapeGradError>;

    /// Returns the learnable parameters of the module, including those of sub-modules.
    fn parameters(&self) -> Vec<ParamRef>;

    /// Returns the learnable parameters with hierarchical names (e.g. `"linear0.weight"`).
    fn named_parameters(&self) -> Vec<(String, ParamRef)>;
}

#[cfg(test)]
#[path = "module_test.rs"]
mod tests;
