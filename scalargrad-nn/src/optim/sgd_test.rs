use super::*;
use approx::assert_relative_eq;

#[test]
fn test_sgd_basic_step() -> Result<(), NnError> {
    let mut graph: Graph = Graph::new();
    let a = graph.leaf(1.0);
    let b = graph.leaf(-2.0);
    graph.set_grad(a, 0.5)?;
    graph.set_grad(b, -1.0)?;

    let mut optimizer = Sgd::new([a, b], 0.1)?;
    optimizer.step(&mut graph)?;

    assert_relative_eq!(graph.data(a)?, 0.95, epsilon = 1e-12);
    assert_relative_eq!(graph.data(b)?, -1.9, epsilon = 1e-12);
    // gradients are left for zero_grad
    assert_eq!(graph.grad(a)?, 0.5);
    assert_eq!(optimizer.steps(), 1);
    Ok(())
}

#[test]
fn test_sgd_only_touches_its_params() -> Result<(), NnError> {
    let mut graph: Graph = Graph::new();
    let managed = graph.leaf(1.0);
    let other = graph.leaf(1.0);
    graph.set_grad(managed, 1.0)?;
    graph.set_grad(other, 1.0)?;

    let mut optimizer = Sgd::new(vec![managed], 0.5)?;
    optimizer.step(&mut graph)?;
    optimizer.zero_grad(&mut graph)?;

    assert_eq!(graph.data(managed)?, 0.5);
    assert_eq!(graph.grad(managed)?, 0.0);
    assert_eq!(graph.data(other)?, 1.0);
    assert_eq!(graph.grad(other)?, 1.0);
    Ok(())
}

#[test]
fn test_sgd_minimizes_quadratic() -> Result<(), NnError> {
    let mut graph: Graph = Graph::new();
    let x = graph.leaf(5.0);
    let checkpoint = graph.checkpoint();
    let mut optimizer = Sgd::new([x], 0.1)?;

    for _ in 0..100 {
        // (x - 3)^2
        let shifted = graph.sub(x, 3.0)?;
        let loss = graph.pow(shifted, 2.0)?;
        optimizer.zero_grad(&mut graph)?;
        graph.backward(loss)?;
        optimizer.step(&mut graph)?;
        graph.rewind(checkpoint);
    }

    assert_eq!(graph.len(), 1);
    assert_relative_eq!(graph.data(x)?, 3.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_sgd_learning_rate() -> Result<(), NnError> {
    let mut optimizer = Sgd::<f32>::new(Vec::new(), 0.01)?;
    assert_eq!(optimizer.learning_rate(), 0.01);
    optimizer.set_learning_rate(0.1)?;
    assert_eq!(optimizer.learning_rate(), 0.1);
    assert!(optimizer.set_learning_rate(0.0).is_err());
    assert!(optimizer.set_learning_rate(f32::NAN).is_err());
    assert_eq!(optimizer.learning_rate(), 0.1);
    Ok(())
}

#[test]
fn test_sgd_rejects_invalid_learning_rate() {
    assert!(matches!(
        Sgd::<f64>::new(Vec::new(), -0.1),
        Err(NnError::InvalidConfig(_))
    ));
    assert!(Sgd::<f64>::new(Vec::new(), f64::INFINITY).is_err());
}

#[test]
fn test_sgd_unknown_param() -> Result<(), NnError> {
    let mut big: Graph = Graph::new();
    big.leaf(0.0);
    let stale = big.leaf(0.0);
    let mut small: Graph = Graph::new();
    let mut optimizer = Sgd::new([stale], 0.1)?;
    assert!(matches!(
        optimizer.step(&mut small),
        Err(NnError::Autograd(_))
    ));
    Ok(())
}
