use super::*;
use crate::autograd::grad_check::check_grad;
use crate::ops::{log_softmax_op, nll_loss_op};
use crate::utils::testing::{check_tensor_near, create_test_tensor};
use approx::assert_relative_eq;

#[test]
fn test_cross_entropy_equal_logits() {
    let mut graph = Graph::new();
    let logits = graph.variable(create_test_tensor(vec![0.0, 0.0], vec![1, 2]));
    let loss = cross_entropy_op(&mut graph, logits, &[0]).unwrap();
    assert_relative_eq!(
        graph.value(loss).unwrap().item().unwrap(),
        (2.0f64).ln(),
        epsilon = 1e-12
    );
    graph.backward(loss).unwrap();
    check_tensor_near(graph.grad(logits).unwrap().unwrap(), &[1, 2], &[-0.5, 0.5], 1e-12);
}

#[test]
fn test_cross_entropy_matches_log_softmax_then_nll() {
    let data = vec![1.0, -0.5, 2.0, 0.3, 0.3, -1.2];
    let labels = [2, 0];

    let mut fused = Graph::new();
    let logits = fused.variable(create_test_tensor(data.clone(), vec![2, 3]));
    let loss = cross_entropy_op(&mut fused, logits, &labels).unwrap();
    fused.backward(loss).unwrap();

    let mut chained = Graph::new();
    let logits2 = chained.variable(create_test_tensor(data, vec![2, 3]));
    let lp = log_softmax_op(&mut chained, logits2).unwrap();
    let loss2 = nll_loss_op(&mut chained, lp, &labels).unwrap();
    chained.backward(loss2).unwrap();

    assert_relative_eq!(
        fused.value(loss).unwrap().item().unwrap(),
        chained.value(loss2).unwrap().item().unwrap(),
        epsilon = 1e-12
    );
    let g1 = fused.grad(logits).unwrap().unwrap();
    let g2 = chained.grad(logits2).unwrap().unwrap();
    for (a, b) in g1.data().iter().zip(g2.data().iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
}

#[test]
fn test_cross_entropy_large_logits_finite() {
    let mut graph = Graph::new();
    let logits = graph.variable(create_test_tensor(vec![1000.0, 0.0, -1000.0, 500.0], vec![2, 2]));
    let loss = cross_entropy_op(&mut graph, logits, &[1, 0]).unwrap();
    let value = graph.value(loss).unwrap().item().unwrap();
    assert!(value.is_finite());
    // row 0 misclassified by a margin of 1000, row 1 by 1500.
    assert_relative_eq!(value, (1000.0 + 1500.0) / 2.0, epsilon = 1e-9);
    graph.backward(loss).unwrap();
    assert!(graph.grad(logits).unwrap().unwrap().is_finite());
}

#[test]
fn test_cross_entropy_backward_grad_check() {
    let logits = create_test_tensor(vec![0.2, -1.0, 3.0, 1.5, 0.0, -0.5], vec![2, 3]);
    let output_grad = Tensor::scalar(1.0);
    let func = |g: &mut Graph, v: &[Var]| cross_entropy_op(g, v[0], &[1, 2]);
    check_grad(func, &[logits], &output_grad, 1e-6, 1e-8, 1e-5).unwrap();
}

#[test]
fn test_cross_entropy_label_count_mismatch() {
    let mut graph = Graph::new();
    let logits = graph.variable(create_test_tensor(vec![0.0; 6], vec![2, 3]));
    assert!(matches!(
        cross_entropy_op(&mut graph, logits, &[0, 1, 2]),
        Err(TapeGradError::ShapeMismatch { .. })
    ));
}
