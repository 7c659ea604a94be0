// src/nn/layers/mod.rs

pub mod linear;
pub mod log_softmax;
pub mod relu;

pub use linear::Linear;
pub use log_softmax::LogSoftmax;
pub use relu::ReLU;

use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;

/// The closed set of layers a network is chained from.
#[derive(Debug)]
pub enum Layer {
    Linear(Linear),
    Relu(ReLU),
    LogSoftmax(LogSoftmax),
}

impl Layer {
    /// Short lowercase kind name, used for default module names.
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Linear(_) => "linear",
            Layer::Relu(_) => "relu",
            Layer::LogSoftmax(_) => "log_softmax",
        }
    }
}

impl Module for Layer {
    fn forward(&self, graph: &mut Graph, input: Var) -> Result<Var, TapeGradError> {
        match self {
            Layer::Linear(layer) => layer.forward(graph, input),
            Layer::Relu(layer) => layer.forward(graph, input),
            Layer::LogSoftmax(layer) => layer.forward(graph, input),
        }
    }

    fn parameters(&self) -> Vec<ParamRef> {
        match self {
            Layer::Linear(layer) => layer.parameters(),
            Layer::Relu(_) | Layer::LogSoftmax(_) => Vec::new(),
        }
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        match self {
            Layer::Linear(layer) => layer.named_parameters(),
            Layer::Relu(_) | Layer::LogSoftmax(_) => Vec::new(),
        }
    }
}

impl From<Linear> for Layer {
    fn from(layer: Linear) -> Self {
        Layer::Linear(layer)
    }
}

impl From<ReLU> for Layer {
    fn from(layer: ReLU) -> Self {
        Layer::Relu(layer)
    }
}

impl From<LogSoftmax> for Layer {
    fn from(layer: LogSoftmax) -> Self {
        Layer::LogSoftmax(layer)
    }
}
