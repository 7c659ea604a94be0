use crate::autograd::BackwardOp;
use crate::error::TapeGradError;
use crate::nn::parameter::{read_param, write_param, ParamRef};
use crate::tensor::utils::check_shape;
use crate::tensor::{self, Tensor};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handle to a value recorded on a [`Graph`].
///
/// Handles are cheap to copy; several operations may consume the same handle, which is
/// how a value fans out to multiple consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(usize);

impl Var {
    /// Position of the value on its tape.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The operation that produced a value, with links to its inputs.
struct OpNode {
    backward: Box<dyn BackwardOp>,
    inputs: Vec<Var>,
}

/// A value on the tape: payload, optional gradient buffer, tracking flag and producer.
struct ValueNode {
    value: Tensor,
    grad: Option<Tensor>,
    requires_grad: bool,
    op: Option<OpNode>,
    param: Option<ParamRef>,
}

/// An explicit computation tape.
///
/// Values are appended in evaluation order, so every operation only ever refers to
/// values recorded before it and the recorded graph is acyclic. A training step builds
/// its own `Graph`, runs forward and backward through it, and drops it afterwards.
pub struct Graph {
    nodes: Vec<ValueNode>,
    grad_enabled: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops = self.nodes.iter().filter(|n| n.op.is_some()).count();
        f.debug_struct("Graph")
            .field("values", &self.nodes.len())
            .field("ops", &ops)
            .field("grad_enabled", &self.grad_enabled)
            .finish()
    }
}

impl Graph {
    /// Creates an empty tape that records operations.
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            grad_enabled: true,
        }
    }

    /// Creates an empty tape on which nothing is tracked, for inference.
    ///
    /// Parameters are loaded as constants and no operation nodes are stored.
    pub fn no_grad() -> Self {
        Graph {
            nodes: Vec::new(),
            grad_enabled: false,
        }
    }

    pub fn is_grad_enabled(&self) -> bool {
        self.grad_enabled
    }

    /// Number of values recorded so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Records a leaf that does not track gradients (input data, constants).
    pub fn input(&mut self, value: Tensor) -> Var {
        self.push_leaf(value, false, None)
    }

    /// Records a leaf that tracks gradients (on a `no_grad` tape it is a constant).
    pub fn variable(&mut self, value: Tensor) -> Var {
        let requires_grad = self.grad_enabled;
        self.push_leaf(value, requires_grad, None)
    }

    /// Records a leaf bound to a trainable parameter.
    ///
    /// The current parameter value is copied onto the tape. During backward, the gradient
    /// reaching this leaf is also accumulated into the parameter's own gradient buffer.
    pub fn param(&mut self, param: &ParamRef) -> Result<Var, TapeGradError> {
        let (value, param_requires_grad) = {
            let guard = read_param(param)?;
            (guard.value().clone(), guard.requires_grad())
        };
        let requires_grad = self.grad_enabled && param_requires_grad;
        let binding = if requires_grad {
            Some(Arc::clone(param))
        } else {
            None
        };
        Ok(self.push_leaf(value, requires_grad, binding))
    }

    fn push_leaf(&mut self, value: Tensor, requires_grad: bool, param: Option<ParamRef>) -> Var {
        self.nodes.push(ValueNode {
            value,
            grad: None,
            requires_grad,
            op: None,
            param,
        });
        Var(self.nodes.len() - 1)
    }

    /// Records the result of an operation over `inputs`.
    ///
    /// The output tracks gradients iff recording is enabled and any input tracks them.
    /// `make_backward` is only invoked for tracked outputs, so untracked forward passes
    /// never build gradient context.
    pub fn record<F>(
        &mut self,
        value: Tensor,
        inputs: &[Var],
        make_backward: F,
    ) -> Result<Var, TapeGradError>
    where
        F: FnOnce() -> Box<dyn BackwardOp>,
    {
        let mut requires_grad = false;
        for &input in inputs {
            requires_grad |= self.node(input)?.requires_grad;
        }
        requires_grad &= self.grad_enabled;

        let op = if requires_grad {
            Some(OpNode {
                backward: make_backward(),
                inputs: inputs.to_vec(),
            })
        } else {
            None
        };
        self.nodes.push(ValueNode {
            value,
            grad: None,
            requires_grad,
            op,
            param: None,
        });
        Ok(Var(self.nodes.len() - 1))
    }

    fn node(&self, var: Var) -> Result<&ValueNode, TapeGradError> {
        self.nodes.get(var.0).ok_or(TapeGradError::UnknownVar {
            index: var.0,
            len: self.nodes.len(),
        })
    }

    /// Returns the payload of a recorded value.
    pub fn value(&self, var: Var) -> Result<&Tensor, TapeGradError> {
        Ok(&self.node(var)?.value)
    }

    /// Returns the accumulated gradient of a value, if a backward pass reached it.
    pub fn grad(&self, var: Var) -> Result<Option<&Tensor>, TapeGradError> {
        Ok(self.node(var)?.grad.as_ref())
    }

    pub fn requires_grad(&self, var: Var) -> Result<bool, TapeGradError> {
        Ok(self.node(var)?.requires_grad)
    }

    /// True if the value was produced by a recorded operation.
    pub fn has_op(&self, var: Var) -> Result<bool, TapeGradError> {
        Ok(self.node(var)?.op.is_some())
    }

    /// Clears the gradient buffers of every value on this tape.
    ///
    /// Parameter gradients live on the parameters and are cleared by the optimizer.
    pub fn zero_grad(&mut self) {
        for node in self.nodes.iter_mut() {
            node.grad = None;
        }
    }

    /// Runs the backward pass from a scalar value, seeding its gradient with 1.
    ///
    /// Gradients are *added* to existing buffers: calling `backward` twice without
    /// clearing doubles every gradient. This accumulation is intentional; clear with
    /// [`Graph::zero_grad`] and `Optimizer::zero_grad` between steps.
    ///
    /// # Errors
    /// * `NotTracked` if `root` does not track gradients.
    /// * `BackwardNonScalar` if `root` holds more than one element.
    pub fn backward(&mut self, root: Var) -> Result<(), TapeGradError> {
        let node = self.node(root)?;
        if !node.requires_grad {
            return Err(TapeGradError::NotTracked { index: root.0 });
        }
        if node.value.numel() != 1 {
            return Err(TapeGradError::BackwardNonScalar {
                shape: node.value.shape().to_vec(),
            });
        }
        let seed = tensor::ones_like(&node.value);
        self.backward_with_grad(root, seed)
    }

    /// Runs the backward pass from `root` using an explicit seed gradient.
    ///
    /// # Errors
    /// * `NotTracked` if `root` does not track gradients.
    /// * `ShapeMismatch` if `seed` does not have the shape of `root`.
    pub fn backward_with_grad(&mut self, root: Var, seed: Tensor) -> Result<(), TapeGradError> {
        let root_node = self.node(root)?;
        if !root_node.requires_grad {
            return Err(TapeGradError::NotTracked { index: root.0 });
        }
        check_shape(root_node.value.shape(), seed.shape(), "backward seed")?;

        let sorted = topological_sort(&self.nodes, root);
        log::debug!(
            "backward from value {}: {} tracked values reachable out of {}",
            root.0,
            sorted.len(),
            self.nodes.len()
        );

        // Gradients flowing in this call only; combined before being propagated.
        let mut pending: HashMap<Var, Tensor> = HashMap::new();
        pending.insert(root, seed);

        for var in sorted.into_iter().rev() {
            let Some(grad) = pending.remove(&var) else {
                continue;
            };

            let node = &self.nodes[var.0];
            if let Some(op) = node.op.as_ref() {
                let input_grads = op.backward.backward(&grad)?;
                if input_grads.len() != op.inputs.len() {
                    return Err(TapeGradError::InternalError(format!(
                        "{:?} returned {} gradients for {} inputs",
                        op.backward,
                        input_grads.len(),
                        op.inputs.len()
                    )));
                }
                for (&input, input_grad) in op.inputs.iter().zip(input_grads) {
                    let input_node = &self.nodes[input.0];
                    if !input_node.requires_grad {
                        continue;
                    }
                    check_shape(
                        input_node.value.shape(),
                        input_grad.shape(),
                        &format!("gradient of {:?}", op.backward),
                    )?;
                    match pending.entry(input) {
                        Entry::Occupied(mut entry) => entry.get_mut().add_(&input_grad)?,
                        Entry::Vacant(entry) => {
                            entry.insert(input_grad);
                        }
                    }
                }
            }

            if let Some(param) = node.param.as_ref() {
                write_param(param)?.accumulate_grad(&grad)?;
            }

            let node = &mut self.nodes[var.0];
            match node.grad.as_mut() {
                Some(existing) => existing.add_(&grad)?,
                None => node.grad = Some(grad),
            }
        }
        Ok(())
    }
}

/// Orders the tracked values reachable from `root` so that every value comes after
/// all of its inputs (post-order). Iterating the result in reverse visits `root` first.
fn topological_sort(nodes: &[ValueNode], root: Var) -> Vec<Var> {
    let mut sorted = Vec::new();
    let mut visited = vec![false; nodes.len()];
    // (value, inputs already expanded)
    let mut stack = vec![(root, false)];

    while let Some((var, expanded)) = stack.pop() {
        if expanded {
            sorted.push(var);
            continue;
        }
        if visited[var.0] {
            continue;
        }
        visited[var.0] = true;
        stack.push((var, true));
        if let Some(op) = nodes[var.0].op.as_ref() {
            for &input in op.inputs.iter() {
                if !visited[input.0] && nodes[input.0].requires_grad {
                    stack.push((input, false));
                }
            }
        }
    }
    sorted
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
