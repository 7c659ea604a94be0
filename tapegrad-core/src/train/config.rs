use crate::error::TapeGradError;
use crate::nn::losses::LossKind;

/// Hyperparameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// `[input, hidden.., classes]`
    pub layer_sizes: Vec<usize>,
    /// Enforced by the data source, not by the trainer.
    pub batch_size: usize,
    pub loss: LossKind,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 5,
            learning_rate: 0.01,
            layer_sizes: vec![784, 128, 64, 10],
            batch_size: 64,
            loss: LossKind::CrossEntropy,
        }
    }
}

impl TrainConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_layer_sizes(mut self, layer_sizes: Vec<usize>) -> Self {
        self.layer_sizes = layer_sizes;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_loss(mut self, loss: LossKind) -> Self {
        self.loss = loss;
        self
    }

    /// Checks every field, reporting the first invalid one.
    ///
    /// # Errors
    /// `InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<(), TapeGradError> {
        if self.epochs == 0 {
            return Err(TapeGradError::InvalidConfig("epochs must be > 0".to_string()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TapeGradError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.layer_sizes.len() < 2 || self.layer_sizes.contains(&0) {
            return Err(TapeGradError::InvalidConfig(format!(
                "layer_sizes needs at least two positive entries, got {:?}",
                self.layer_sizes
            )));
        }
        if self.batch_size == 0 {
            return Err(TapeGradError::InvalidConfig("batch_size must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
