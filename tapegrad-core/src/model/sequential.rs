use crate::autograd::{Graph, Var};
use crate::error::TapeGradError;
use crate::nn::layers::{Layer, Linear, LogSoftmax, ReLU};
use crate::nn::losses::LossKind;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;
use rand::Rng;

/// An ordered chain of layers; the output of each is the input of the next.
#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<Layer>,
    names: Vec<String>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            layers: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Builds a multi-layer perceptron from `layer_sizes` (`[in, hidden.., out]`).
    ///
    /// Consecutive sizes are joined by `Linear` layers with a `ReLU` between them.
    /// For [`LossKind::Nll`] a final `LogSoftmax` is appended so the network emits
    /// log-probabilities.
    ///
    /// # Errors
    /// `InvalidConfig` if fewer than two sizes are given or any size is zero.
    pub fn mlp<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        loss: LossKind,
        rng: &mut R,
    ) -> Result<Self, TapeGradError> {
        if layer_sizes.len() < 2 {
            return Err(TapeGradError::InvalidConfig(format!(
                "an MLP needs at least an input and an output size, got {:?}",
                layer_sizes
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(TapeGradError::InvalidConfig(format!(
                "layer sizes must be positive, got {:?}",
                layer_sizes
            )));
        }

        let mut model = Sequential::new();
        let last = layer_sizes.len() - 2;
        for (i, pair) in layer_sizes.windows(2).enumerate() {
            let linear = Linear::new_with_rng(pair[0], pair[1], rng)?;
            model.add_module(&format!("linear{}", i), linear.into());
            if i < last {
                model.add_module(&format!("relu{}", i), ReLU::new().into());
            }
        }
        if loss.expects_log_probs() {
            model.add_module("log_softmax", LogSoftmax::new().into());
        }
        log::debug!(
            "built MLP {:?} with {} layers for {} loss",
            layer_sizes,
            model.len(),
            loss
        );
        Ok(model)
    }

    /// Appends a layer under `name`.
    pub fn add_module(&mut self, name: &str, layer: Layer) {
        self.layers.push(layer);
        self.names.push(name.to_string());
    }

    /// Appends a layer named after its kind and position.
    pub fn push(&mut self, layer: Layer) {
        let name = format!("{}{}", layer.kind(), self.layers.len());
        self.add_module(&name, layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Iterates `(name, layer)` pairs in forward order.
    pub fn named_layers(&self) -> impl Iterator<Item = (&str, &Layer)> {
        self.names.iter().map(String::as_str).zip(self.layers.iter())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Module for Sequential {
    fn forward(&self, graph: &mut Graph, input: Var) -> Result<Var, TapeGradError> {
        let mut current = input;
        for layer in &self.layers {
            current = layer.forward(graph, current)?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        self.layers.iter().flat_map(|layer| layer.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        let mut params = Vec::new();
        for (name, layer) in self.named_layers() {
            for (param_name, param) in layer.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
