use crate::autograd::Graph;
use crate::error::TapeGradError;
use crate::metrics;
use crate::model::Sequential;
use crate::nn::losses::LossKind;
use crate::nn::module::Module;
use crate::optim::{Optimizer, SgdOptimizer};
use crate::train::batch::{Batch, BatchSource};
use crate::train::config::TrainConfig;
use rand::Rng;
use std::fmt;

/// Summary of one training epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total batch loss divided by the number of batches.
    pub average_loss: f64,
    pub batches: usize,
    pub samples: usize,
}

impl fmt::Display for EpochReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch {:>3}: average loss {:.6} over {} batches ({} samples)",
            self.epoch, self.average_loss, self.batches, self.samples
        )
    }
}

/// Loss and accuracy of a model over a data source, without training.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Mean per-sample loss.
    pub average_loss: f64,
    pub accuracy: f64,
    pub samples: usize,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loss {:.6}, accuracy {:.2}% over {} samples",
            self.average_loss,
            self.accuracy * 100.0,
            self.samples
        )
    }
}

/// Drives the per-batch training step of a model with an optimizer.
#[derive(Debug)]
pub struct Trainer<M: Module, O: Optimizer> {
    model: M,
    optimizer: O,
    loss: LossKind,
    epochs_run: usize,
}

impl Trainer<Sequential, SgdOptimizer> {
    /// Builds an MLP and a plain SGD optimizer over its parameters from `config`.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` does not validate.
    pub fn from_config<R: Rng + ?Sized>(config: &TrainConfig, rng: &mut R) -> Result<Self, TapeGradError> {
        config.validate()?;
        let model = Sequential::mlp(&config.layer_sizes, config.loss, rng)?;
        let optimizer = SgdOptimizer::new(model.parameters(), config.learning_rate)?;
        Ok(Trainer::new(model, optimizer, config.loss))
    }
}

impl<M: Module, O: Optimizer> Trainer<M, O> {
    /// The optimizer is expected to manage `model`'s parameters.
    pub fn new(model: M, optimizer: O, loss: LossKind) -> Self {
        Trainer {
            model,
            optimizer,
            loss,
            epochs_run: 0,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn optimizer_mut(&mut self) -> &mut O {
        &mut self.optimizer
    }

    pub fn loss(&self) -> LossKind {
        self.loss
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Runs one optimization step on `batch` and returns its loss.
    ///
    /// Gradients are cleared first, then the batch is pushed through a fresh tape,
    /// backpropagated and applied by the optimizer.
    pub fn train_step(&mut self, batch: &Batch) -> Result<f64, TapeGradError> {
        self.optimizer.zero_grad();

        let mut graph = Graph::new();
        let inputs = graph.input(batch.inputs.clone());
        let outputs = self.model.forward(&mut graph, inputs)?;
        let loss = self.loss.calculate(&mut graph, outputs, &batch.labels)?;
        let loss_value = graph.value(loss)?.item()?;
        if !loss_value.is_finite() {
            log::warn!(
                "non-finite loss {} on a batch of {} samples",
                loss_value,
                batch.len()
            );
        }

        graph.backward(loss)?;
        self.optimizer.step()?;
        Ok(loss_value)
    }

    /// Iterates `source` once, training on every batch in order.
    ///
    /// # Errors
    /// The first batch error is returned as is. A source that yields no batches is an
    /// `EmptyDataset` error.
    pub fn train_epoch<S: BatchSource + ?Sized>(&mut self, source: &mut S) -> Result<EpochReport, TapeGradError> {
        let epoch = self.epochs_run + 1;
        let mut total_loss = 0.0;
        let mut batches = 0usize;
        let mut samples = 0usize;
        for batch in source.batches() {
            let batch = batch?;
            total_loss += self.train_step(&batch)?;
            batches += 1;
            samples += batch.len();
        }
        if batches == 0 {
            return Err(TapeGradError::EmptyDataset(format!("training epoch {}", epoch)));
        }
        self.epochs_run = epoch;
        Ok(EpochReport {
            epoch,
            average_loss: total_loss / batches as f64,
            batches,
            samples,
        })
    }

    /// Trains for `epochs` epochs, logging one line per epoch.
    pub fn fit<S: BatchSource + ?Sized>(
        &mut self,
        source: &mut S,
        epochs: usize,
    ) -> Result<Vec<EpochReport>, TapeGradError> {
        let mut reports = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            let report = self.train_epoch(source)?;
            log::info!("{}", report);
            reports.push(report);
        }
        Ok(reports)
    }

    /// Evaluates the current model on `source` without recording gradients.
    pub fn evaluate<S: BatchSource + ?Sized>(&self, source: &mut S) -> Result<Evaluation, TapeGradError> {
        evaluate(&self.model, self.loss, source)
    }
}

/// Computes the mean loss and the accuracy of `model` over every batch of `source`.
///
/// Runs on `no_grad` tapes, so parameters receive no gradient.
pub fn evaluate<M, S>(model: &M, loss: LossKind, source: &mut S) -> Result<Evaluation, TapeGradError>
where
    M: Module + ?Sized,
    S: BatchSource + ?Sized,
{
    let mut weighted_loss = 0.0;
    let mut correct = 0usize;
    let mut samples = 0usize;
    for batch in source.batches() {
        let batch = batch?;
        let mut graph = Graph::no_grad();
        let inputs = graph.input(batch.inputs.clone());
        let outputs = model.forward(&mut graph, inputs)?;
        let loss_var = loss.calculate(&mut graph, outputs, &batch.labels)?;

        weighted_loss += graph.value(loss_var)?.item()? * batch.len() as f64;
        let predictions = graph.value(outputs)?.argmax_rows()?;
        correct += metrics::correct_count(&predictions, &batch.labels);
        samples += batch.len();
    }
    if samples == 0 {
        return Err(TapeGradError::EmptyDataset("evaluation".to_string()));
    }
    Ok(Evaluation {
        average_loss: weighted_loss / samples as f64,
        accuracy: correct as f64 / samples as f64,
        samples,
    })
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
