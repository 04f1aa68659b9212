use log::debug;

use crate::{math::matrix::Matrix, network::network::Network, optim::sgd::Sgd};

/// One pass of single-example gradient steps over `inputs`, in order.
///
/// Returns the mean cost measured on each example just before its step.
///
/// # Panics
/// Panics if `inputs` is empty or its length differs from `expected_outputs`.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Matrix],
    expected_outputs: &[Matrix],
    optimizer: &Sgd,
) -> f64 {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(
        inputs.len(),
        expected_outputs.len(),
        "inputs and expected_outputs must have equal length"
    );

    let mut total_cost = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs) {
        total_cost += network.cost(input, expected);
        let gradients = network.backprop(input, expected);
        network.apply_gradients(gradients, optimizer);
    }

    let mean = total_cost / inputs.len() as f64;
    debug!("epoch over {} examples, mean cost {mean:.6}", inputs.len());
    mean
}
