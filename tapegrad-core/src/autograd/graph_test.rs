use super::*;
use crate::nn::parameter::{read_param, Parameter};
use crate::ops::{add_op, linear_op, mul_op, mul_scalar_op, sum_op};
use crate::utils::testing::{check_tensor_near, create_test_tensor};

fn grad_of(graph: &Graph, var: Var) -> Tensor {
    graph.grad(var).unwrap().cloned().unwrap()
}

#[test]
fn test_tracking_propagates_from_any_input() {
    let mut graph = Graph::new();
    let c = graph.input(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let v = graph.variable(create_test_tensor(vec![3.0, 4.0], vec![2]));
    let constant_only = add_op(&mut graph, c, c).unwrap();
    let mixed = add_op(&mut graph, c, v).unwrap();

    assert!(!graph.requires_grad(constant_only).unwrap());
    assert!(!graph.has_op(constant_only).unwrap());
    assert!(graph.requires_grad(mixed).unwrap());
    assert!(graph.has_op(mixed).unwrap());
}

#[test]
fn test_backward_on_untracked_value_fails() {
    let mut graph = Graph::new();
    let c = graph.input(Tensor::scalar(2.0));
    assert_eq!(graph.backward(c), Err(TapeGradError::NotTracked { index: 0 }));
}

#[test]
fn test_backward_non_scalar_without_seed_fails() {
    let mut graph = Graph::new();
    let v = graph.variable(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let y = mul_scalar_op(&mut graph, v, 3.0).unwrap();
    assert_eq!(
        graph.backward(y),
        Err(TapeGradError::BackwardNonScalar { shape: vec![2] })
    );
}

#[test]
fn test_backward_with_grad_seed_shape_checked() {
    let mut graph = Graph::new();
    let v = graph.variable(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let y = mul_scalar_op(&mut graph, v, 3.0).unwrap();
    assert!(matches!(
        graph.backward_with_grad(y, Tensor::scalar(1.0)),
        Err(TapeGradError::ShapeMismatch { .. })
    ));
    graph
        .backward_with_grad(y, create_test_tensor(vec![1.0, -1.0], vec![2]))
        .unwrap();
    check_tensor_near(&grad_of(&graph, v), &[2], &[3.0, -3.0], 1e-12);
}

#[test]
fn test_unknown_var() {
    let graph = Graph::new();
    assert_eq!(
        graph.value(Var(3)).err(),
        Some(TapeGradError::UnknownVar { index: 3, len: 0 })
    );
}

#[test]
fn test_fan_out_gradients_are_summed() {
    // y = x * x + x, dy/dx = 2x + 1
    let mut graph = Graph::new();
    let x = graph.variable(Tensor::scalar(3.0));
    let sq = mul_op(&mut graph, x, x).unwrap();
    let y = add_op(&mut graph, sq, x).unwrap();
    graph.backward(y).unwrap();
    check_tensor_near(&grad_of(&graph, x), &[], &[7.0], 1e-12);
}

#[test]
fn test_diamond_graph() {
    // a -> (b = 2a, c = a * a) -> d = b * c = 2a^3, dd/da = 6a^2
    let mut graph = Graph::new();
    // With a = 3: b = 6, c = 9, so dd/db = c = 9 and dd/dc = b = 6.
    let a = graph.variable(Tensor::scalar(3.0));
    let b = mul_scalar_op(&mut graph, a, 2.0).unwrap();
    let c = mul_op(&mut graph, a, a).unwrap();
    let d = mul_op(&mut graph, b, c).unwrap();
    graph.backward(d).unwrap();
    check_tensor_near(&grad_of(&graph, a), &[], &[54.0], 1e-12);
    // Intermediate values also hold their gradients.
    check_tensor_near(&grad_of(&graph, b), &[], &[9.0], 1e-12);
    check_tensor_near(&grad_of(&graph, c), &[], &[6.0], 1e-12);
}

#[test]
fn test_backward_twice_doubles_gradients() {
    let mut graph = Graph::new();
    let a = graph.variable(create_test_tensor(vec![1.0, -2.0], vec![2]));
    let b = graph.variable(create_test_tensor(vec![0.5, 4.0], vec![2]));
    let prod = mul_op(&mut graph, a, b).unwrap();
    let loss = sum_op(&mut graph, prod).unwrap();

    graph.backward(loss).unwrap();
    let first_a = grad_of(&graph, a);
    let first_b = grad_of(&graph, b);
    graph.backward(loss).unwrap();

    let doubled_a = first_a.map(|g| 2.0 * g);
    let doubled_b = first_b.map(|g| 2.0 * g);
    assert_eq!(grad_of(&graph, a), doubled_a);
    assert_eq!(grad_of(&graph, b), doubled_b);
}

#[test]
fn test_zero_grad_then_backward_matches_fresh_backward() {
    let mut graph = Graph::new();
    let a = graph.variable(create_test_tensor(vec![1.0, -2.0, 0.5], vec![3]));
    let sq = mul_op(&mut graph, a, a).unwrap();
    let loss = sum_op(&mut graph, sq).unwrap();

    graph.backward(loss).unwrap();
    let fresh = grad_of(&graph, a);
    graph.backward(loss).unwrap();
    graph.zero_grad();
    assert!(graph.grad(a).unwrap().is_none());
    graph.backward(loss).unwrap();
    assert_eq!(grad_of(&graph, a), fresh);
}

#[test]
fn test_untracked_branch_receives_no_gradient() {
    let mut graph = Graph::new();
    let c = graph.input(create_test_tensor(vec![2.0, 3.0], vec![2]));
    let v = graph.variable(create_test_tensor(vec![1.0, 1.0], vec![2]));
    let prod = mul_op(&mut graph, c, v).unwrap();
    let loss = sum_op(&mut graph, prod).unwrap();
    graph.backward(loss).unwrap();
    assert!(graph.grad(c).unwrap().is_none());
    check_tensor_near(&grad_of(&graph, v), &[2], &[2.0, 3.0], 1e-12);
}

#[test]
fn test_param_gradient_accumulates_into_parameter() {
    let weight = Parameter::shared(create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]), "w");
    let bias = Parameter::shared(create_test_tensor(vec![0.0, 0.0], vec![2]), "b");

    for step in 1..=2 {
        let mut graph = Graph::new();
        let x = graph.input(create_test_tensor(vec![1.0, -1.0], vec![1, 2]));
        let w = graph.param(&weight).unwrap();
        let b = graph.param(&bias).unwrap();
        let y = linear_op(&mut graph, x, w, b).unwrap();
        let loss = sum_op(&mut graph, y).unwrap();
        graph.backward(loss).unwrap();

        // Graphs are per step; the parameter buffer persists until cleared.
        let scale = step as f64;
        let guard = read_param(&weight).unwrap();
        check_tensor_near(
            guard.grad().unwrap(),
            &[2, 2],
            &[scale, scale, -scale, -scale],
            1e-12,
        );
        let guard = read_param(&bias).unwrap();
        check_tensor_near(guard.grad().unwrap(), &[2], &[scale, scale], 1e-12);
    }
}

#[test]
fn test_frozen_param_is_constant() {
    let weight = Parameter::shared(Tensor::scalar(2.0), "w");
    weight.write().unwrap().set_requires_grad(false);
    let mut graph = Graph::new();
    let w = graph.param(&weight).unwrap();
    assert!(!graph.requires_grad(w).unwrap());
}

#[test]
fn test_no_grad_graph_records_no_ops() {
    let weight = Parameter::shared(create_test_tensor(vec![1.0, 2.0], vec![2]), "w");
    let mut graph = Graph::no_grad();
    assert!(!graph.is_grad_enabled());
    let w = graph.param(&weight).unwrap();
    let v = graph.variable(create_test_tensor(vec![3.0, 4.0], vec![2]));
    let prod = mul_op(&mut graph, w, v).unwrap();
    let loss = sum_op(&mut graph, prod).unwrap();

    check_tensor_near(graph.value(loss).unwrap(), &[], &[11.0], 1e-12);
    assert!(!graph.has_op(prod).unwrap());
    assert!(!graph.requires_grad(loss).unwrap());
    assert_eq!(graph.len(), 4);
    assert!(matches!(graph.backward(loss), Err(TapeGradError::NotTracked { .. })));
    assert!(read_param(&weight).unwrap().grad().is_none());
}

#[test]
fn test_topological_sort_orders_inputs_first() {
    let mut graph = Graph::new();
    let a = graph.variable(Tensor::scalar(1.0));
    let b = graph.variable(Tensor::scalar(2.0));
    let c = mul_op(&mut graph, a, b).unwrap();
    let d = add_op(&mut graph, c, a).unwrap();
    let order = topological_sort(&graph.nodes, d);
    let pos = |v: Var| order.iter().position(|&o| o == v).unwrap();
    assert_eq!(order.len(), 4);
    assert!(pos(a) < pos(c));
    assert!(pos(b) < pos(c));
    assert!(pos(c) < pos(d));
}
