//! tapegrad-core: a minimal reverse-mode automatic differentiation engine and the
//! pieces needed to train feed-forward classifiers with it.
//!
//! * [`tensor`]: dense row-major `f64` arrays.
//! * [`autograd`]: the explicit computation tape ([`Graph`]) and backward pass.
//! * [`ops`]: differentiable operations recorded on a tape.
//! * [`nn`], [`model`]: parameters, layers, losses and the [`Sequential`] container.
//! * [`optim`]: optimizers (SGD).
//! * [`train`]: the mini-batch training loop and evaluation.

pub mod autograd;
pub mod error;
pub mod metrics;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod train;
pub mod utils;

pub use autograd::{Graph, Var};
pub use error::TapeGradError;
pub use model::Sequential;
pub use tensor::Tensor;
