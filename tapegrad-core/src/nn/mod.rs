// src/nn/mod.rs

//! Neural network building blocks: parameters, layers, losses and initialization.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::{Layer, Linear, LogSoftmax, ReLU};
pub use losses::{CrossEntropyLoss, LossKind, NLLLoss};
pub use module::Module;
pub use parameter::{ParamRef, Parameter};
