use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_sum_forward_is_scalar() {
    let mut graph = Graph::new();
    let a = graph.input(create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]));
    let s = sum_op(&mut graph, a).unwrap();
    let value = graph.value(s).unwrap();
    assert_eq!(value.rank(), 0);
    assert_eq!(value.item().unwrap(), 10.0);
}

#[test]
fn test_sum_backward() {
    let mut graph = Graph::new();
    let a = graph.variable(create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]));
    let s = sum_op(&mut graph, a).unwrap();
    graph.backward(s).unwrap();
    check_tensor_near(graph.grad(a).unwrap().unwrap(), &[3], &[1.0, 1.0, 1.0], 1e-12);
}

#[test]
fn test_sum_grad_check() {
    let a = create_test_tensor(vec![0.3, -1.2, 2.5, 0.0, 1.0, 4.0], vec![2, 3]);
    let func = |g: &mut Graph, v: &[Var]| sum_op(g, v[0]);
    check_grad(func, &[a], &Tensor::scalar(1.5), 1e-6, 1e-8, 1e-5).unwrap();
}
