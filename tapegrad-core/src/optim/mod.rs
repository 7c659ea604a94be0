// src/optim/mod.rs

//! Optimizers updating [`Parameter`](crate::nn::Parameter)s from their accumulated
//! gradients.
//!
//! This module provides the `Optimizer` trait, `ParamGroup` for per-group
//! hyperparameters, and stochastic gradient descent.

pub mod optimizer_trait;
pub mod param_group;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use param_group::{ParamGroup, ParamGroupOptions};
pub use sgd::SgdOptimizer;
