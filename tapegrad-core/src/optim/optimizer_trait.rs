use super::param_group::ParamGroup;
use crate::error::TapeGradError;

/// Trait defining the common interface for optimizers.
///
/// Optimizers are the only writers of parameter values. They read the gradients the
/// backward pass accumulated on each parameter.
pub trait Optimizer {
    /// Performs a single optimization step over every managed parameter.
    ///
    /// Parameters without a gradient (not reached by any backward pass) are skipped.
    fn step(&mut self) -> Result<(), TapeGradError>;

    /// Resets the gradients of all managed parameters to "unset".
    ///
    /// Values are untouched and calling it twice is the same as calling it once.
    fn zero_grad(&mut self);

    /// Adds a new parameter group, letting a subset of parameters use its own
    /// hyperparameters.
    fn add_param_group(&mut self, param_group: ParamGroup);

    fn param_groups(&self) -> &[ParamGroup];

    /// Mutable access to the groups, e.g. to change a learning rate between epochs.
    fn param_groups_mut(&mut self) -> &mut [ParamGroup];
}
