mod common;

use common::{fixture_batch, fixture_model, tensor};
use tapegrad_core::autograd::grad_check::check_grad;
use tapegrad_core::nn::module::Module;
use tapegrad_core::nn::parameter::read_param;
use tapegrad_core::ops::{
    cross_entropy_op, linear_op, log_softmax_op, mean_op, mul_op, nll_loss_op, relu_op, sub_op,
};
use tapegrad_core::tensor::Tensor;
use tapegrad_core::{Graph, TapeGradError, Var};

fn mlp_loss(graph: &mut Graph, v: &[Var]) -> Result<Var, TapeGradError> {
    // v = [x, w1, b1, w2, b2]
    let hidden = linear_op(graph, v[0], v[1], v[2])?;
    let hidden = relu_op(graph, hidden)?;
    let logits = linear_op(graph, hidden, v[3], v[4])?;
    cross_entropy_op(graph, logits, &[0, 1, 1])
}

#[test]
fn finite_differences_match_backward_through_mlp_chain() {
    let inputs = vec![
        tensor(vec![0.5, -1.2, 0.3, 1.1, 0.8, -0.4, -0.6, 0.2, 0.9], vec![3, 3]),
        tensor(vec![0.4, -0.3, 0.2, 0.7, -0.5, 0.6, 0.1, 0.3, -0.8, 0.5, 0.25, -0.45], vec![3, 4]),
        tensor(vec![0.05, -0.1, 0.15, 0.2], vec![4]),
        tensor(vec![0.3, -0.6, 0.9, 0.1, -0.2, 0.4, 0.7, -0.3], vec![4, 2]),
        tensor(vec![0.0, 0.1], vec![2]),
    ];
    check_grad(mlp_loss, &inputs, &Tensor::scalar(1.0), 1e-6, 1e-7, 1e-4)
        .expect("gradient check of the MLP chain");
}

#[test]
fn finite_differences_match_backward_through_log_softmax_and_nll() {
    let func = |g: &mut Graph, v: &[Var]| {
        let lp = log_softmax_op(g, v[0])?;
        nll_loss_op(g, lp, &[2, 0])
    };
    let logits = tensor(vec![1.5, -0.3, 0.2, 0.0, 2.2, -1.1], vec![2, 3]);
    check_grad(func, &[logits], &Tensor::scalar(1.0), 1e-6, 1e-7, 1e-4)
        .expect("gradient check of log_softmax + nll");
}

#[test]
fn finite_differences_match_backward_for_arithmetic_chain() {
    // mean((a - b) * a)
    let func = |g: &mut Graph, v: &[Var]| {
        let diff = sub_op(g, v[0], v[1])?;
        let prod = mul_op(g, diff, v[0])?;
        mean_op(g, prod)
    };
    let a = tensor(vec![1.0, -2.0, 0.5, 3.0], vec![2, 2]);
    let b = tensor(vec![0.3, 0.7, -1.5, 2.0], vec![2, 2]);
    check_grad(func, &[a, b], &Tensor::scalar(1.0), 1e-6, 1e-7, 1e-4)
        .expect("gradient check of the arithmetic chain");
}

#[test]
fn log_softmax_rows_exponentiate_to_one_for_large_entries() {
    let mut graph = Graph::new();
    let x = graph.input(tensor(
        vec![50.0, 51.0, 52.0, 700.0, 710.0, -700.0, 1e4, 1e4, 1e4],
        vec![3, 3],
    ));
    let lp = log_softmax_op(&mut graph, x).expect("log_softmax");
    let values = graph.value(lp).expect("value");
    assert!(values.is_finite());
    for row in values.data().chunks(3) {
        let total: f64 = row.iter().map(|v| v.exp()).sum();
        approx::assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn nll_of_single_example_is_negative_log_probability() {
    let log_probs = tensor(vec![-0.2, -1.9, -3.0], vec![1, 3]);
    for k in 0..3 {
        let mut graph = Graph::new();
        let lp = graph.input(log_probs.clone());
        let loss = nll_loss_op(&mut graph, lp, &[k]).expect("nll");
        let value = graph.value(loss).and_then(|t| t.item()).expect("scalar");
        approx::assert_relative_eq!(value, -log_probs.data()[k]);
    }
}

fn parameter_grads(model: &tapegrad_core::Sequential) -> Vec<Tensor> {
    model
        .parameters()
        .iter()
        .map(|p| read_param(p).expect("lock").grad().cloned().expect("grad"))
        .collect()
}

fn forward_backward(model: &tapegrad_core::Sequential) {
    let batch = fixture_batch();
    let mut graph = Graph::new();
    let x = graph.input(batch.inputs.clone());
    let logits = model.forward(&mut graph, x).expect("forward");
    let loss = cross_entropy_op(&mut graph, logits, &batch.labels).expect("loss");
    graph.backward(loss).expect("backward");
}

#[test]
fn parameter_gradients_accumulate_across_tapes() {
    let model = fixture_model(false);
    forward_backward(&model);
    let once = parameter_grads(&model);
    forward_backward(&model);
    let twice = parameter_grads(&model);
    for (a, b) in once.iter().zip(twice.iter()) {
        for (x, y) in a.data().iter().zip(b.data().iter()) {
            assert_eq!(2.0 * x, *y);
        }
    }
}

#[test]
fn zero_grad_then_backward_matches_fresh_model() {
    let model = fixture_model(false);
    forward_backward(&model);
    forward_backward(&model);
    for p in model.parameters() {
        p.write().expect("lock").zero_grad();
    }
    forward_backward(&model);

    let fresh = fixture_model(false);
    forward_backward(&fresh);
    assert_eq!(parameter_grads(&model), parameter_grads(&fresh));
}
