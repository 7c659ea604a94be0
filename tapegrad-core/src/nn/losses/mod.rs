pub mod cross_entropy;
pub mod nll;

pub use cross_entropy::CrossEntropyLoss;
pub use nll::NLLLoss;

use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use std::fmt;
use std::str::FromStr;

/// Selects the training loss.
///
/// `CrossEntropy` consumes raw logits. `Nll` consumes log-probabilities, so a network
/// trained with it ends in a [`LogSoftmax`](crate::nn::LogSoftmax) layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossKind {
    #[default]
    CrossEntropy,
    Nll,
}

impl LossKind {
    /// Records the loss of `output` against `labels`, reduced to a scalar mean.
    pub fn calculate(self, graph: &mut Graph, output: Var, labels: &[usize]) -> Result<Var, TapeGradError> {
        match self {
            LossKind::CrossEntropy => CrossEntropyLoss::new().calculate(graph, output, labels),
            LossKind::Nll => NLLLoss::new().calculate(graph, output, labels),
        }
    }

    /// True if the network output must already be log-probabilities.
    pub fn expects_log_probs(self) -> bool {
        matches!(self, LossKind::Nll)
    }
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossKind::CrossEntropy => write!(f, "cross_entropy"),
            LossKind::Nll => write!(f, "nll"),
        }
    }
}

impl FromStr for LossKind {
    type Err = TapeGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cross_entropy" | "crossentropy" | "ce" => Ok(LossKind::CrossEntropy),
            "nll" => Ok(LossKind::Nll),
            _ => Err(TapeGradError::InvalidConfig(format!("Unsupported loss type: {}", s))),
        }
    }
}

#[cfg(test)]
#[path = "losses_test.rs"]
mod tests;
