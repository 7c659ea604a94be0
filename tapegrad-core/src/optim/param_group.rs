use crate::nn::parameter::ParamRef;

/// Defines a group of parameters with specific optimizer hyperparameters.
///
/// Options left as `None` fall back to the optimizer's defaults.
#[derive(Clone, Debug)]
pub struct ParamGroup {
    pub params: Vec<ParamRef>,
    pub options: ParamGroupOptions,
}

/// Options specific to a parameter group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamGroupOptions {
    pub lr: Option<f64>,
    pub weight_decay: Option<f64>,
}

impl ParamGroup {
    /// Creates a new parameter group with default options.
    pub fn new(params: Vec<ParamRef>) -> Self {
        ParamGroup {
            params,
            options: ParamGroupOptions::default(),
        }
    }

    pub fn with_lr(mut self, lr: f64) -> Self {
        self.options.lr = Some(lr);
        self
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.options.lr = Some(lr);
    }

    pub fn get_lr(&self) -> Option<f64> {
        self.options.lr
    }

    pub fn set_weight_decay(&mut self, weight_decay: f64) {
        self.options.weight_decay = Some(weight_decay);
    }
}
