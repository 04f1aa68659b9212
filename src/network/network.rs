use std::fmt;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    activation::activation::{sigmoid, sigmoid_derivative},
    layers::dense::Layer,
    loss::mse::{cost_derivative, total_cost},
    math::{
        matrix::Matrix,
        scalar::{multiply, random_uniform, sample_uniform},
    },
    matrix_elementwise, matrix_product,
    network::{error::NetworkError, gradients::Gradients, spec::NetworkSpec},
    optim::sgd::Sgd,
};

const SEPARATOR: &str = "-----------------------------------------------------------";

/// Fully connected sigmoid network trained one example at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Builds `layer_sizes.len() - 1` layers with every parameter set to `1`.
    ///
    /// `layer_sizes[0]` is the input width; each following entry is the
    /// output count of one layer.
    pub fn new(layer_sizes: &[usize]) -> Result<Network, NetworkError> {
        if layer_sizes.len() < 2 {
            return Err(NetworkError::TooFewLayers(layer_sizes.len()));
        }
        if let Some(position) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(NetworkError::ZeroLayerSize(position));
        }

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1]))
            .collect();
        debug!("created network with layer sizes {layer_sizes:?}");
        Ok(Network { layers })
    }

    /// Assembles a network from prepared layers, checking that they chain.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network, NetworkError> {
        if layers.is_empty() {
            return Err(NetworkError::TooFewLayers(0));
        }
        for (index, pair) in layers.windows(2).enumerate() {
            if pair[1].inputs() != pair[0].outputs() {
                return Err(NetworkError::LayerMismatch {
                    index: index + 1,
                    expected: pair[0].outputs(),
                    found: pair[1].inputs(),
                });
            }
        }
        Ok(Network { layers })
    }

    /// Builds the architecture described by `spec`, randomizing it if asked.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network, NetworkError> {
        spec.validate()?;
        let mut network = Network::new(&spec.layer_sizes)?;
        if spec.randomize {
            match spec.seed {
                Some(seed) => network.randomize_with(&mut StdRng::seed_from_u64(seed)),
                None => network.randomize(),
            }
        }
        Ok(network)
    }

    /// Re-draws every weight and bias uniformly from `[-10, 10)`.
    pub fn randomize(&mut self) {
        for layer in &mut self.layers {
            layer.weights = layer.weights.transform(random_uniform);
            layer.bias = layer.bias.transform(random_uniform);
        }
        debug!("randomized {} layers", self.layers.len());
    }

    /// [`Network::randomize`] drawing from `rng`, for reproducible runs.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.weights = layer.weights.transform(|_| sample_uniform(&mut *rng));
            layer.bias = layer.bias.transform(|_| sample_uniform(&mut *rng));
        }
        debug!("randomized {} layers from supplied generator", self.layers.len());
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Height an input column must have.
    pub fn input_size(&self) -> usize {
        self.layers[0].inputs()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs()
    }

    /// Output activation for an input column.
    ///
    /// An input whose height differs from [`Network::input_size`] is fatal.
    pub fn feedforward(&self, input: &Matrix) -> Matrix {
        self.layers
            .iter()
            .fold(input.duplicate(), |activation, layer| layer.feed_from(&activation))
    }

    /// Summed squared-error cost of the current output for one example.
    pub fn cost(&self, input: &Matrix, expected: &Matrix) -> f64 {
        total_cost(&self.feedforward(input), expected)
    }

    /// Gradient of the cost for one example with respect to every weight and bias.
    pub fn backprop(&self, input: &Matrix, expected: &Matrix) -> Gradients {
        let count = self.layers.len();

        // zs[i] is layer i's pre-activation, activations[i] its output.
        let mut zs: Vec<Matrix> = Vec::with_capacity(count);
        let mut activations: Vec<Matrix> = Vec::with_capacity(count);
        for layer in &self.layers {
            let z = layer.weighted_input(activations.last().unwrap_or(input));
            activations.push(z.transform(sigmoid));
            zs.push(z);
        }

        let error = matrix_elementwise!(activations[count - 1], expected, cost_derivative);
        let mut delta = matrix_elementwise!(error, zs[count - 1].transform(sigmoid_derivative), multiply);

        let mut weights = Vec::with_capacity(count);
        let mut biases = Vec::with_capacity(count);
        for i in (0..count).rev() {
            if i + 1 < count {
                let propagated = matrix_product!(self.layers[i + 1].weights.transpose(), delta);
                delta = matrix_elementwise!(propagated, zs[i].transform(sigmoid_derivative), multiply);
            }
            let layer_input = if i == 0 { input } else { &activations[i - 1] };
            weights.push(matrix_product!(delta, layer_input.transpose()));
            biases.push(delta.duplicate());
        }
        weights.reverse();
        biases.reverse();

        Gradients { weights, biases }
    }

    /// Applies a gradient bundle with `optimizer`, consuming it.
    ///
    /// # Panics
    /// Panics if the bundle does not hold one gradient pair per layer.
    pub fn apply_gradients(&mut self, gradients: Gradients, optimizer: &Sgd) {
        assert_eq!(
            gradients.len(),
            self.layers.len(),
            "gradient bundle has {} layers, network has {}",
            gradients.len(),
            self.layers.len()
        );
        for (layer, (weights_grad, biases_grad)) in self.layers.iter_mut().zip(gradients.iter()) {
            optimizer.step(layer, weights_grad, biases_grad);
        }
    }

    /// One gradient-descent step on a single example.
    pub fn train(&mut self, input: &Matrix, expected: &Matrix, learning_rate: f64) {
        let gradients = self.backprop(input, expected);
        self.apply_gradients(gradients, &Sgd::new(learning_rate));
        trace!("trained one example at learning rate {learning_rate}");
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, layer) in self.layers.iter().enumerate() {
            writeln!(f, "Layer {} Weights", index + 1)?;
            write!(f, "{}", layer.weights)?;
            writeln!(f, "{SEPARATOR}")?;
            writeln!(f, "Layer {} Bias", index + 1)?;
            write!(f, "{}", layer.bias)?;
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_shapes() {
        let net = Network::new(&[3, 4, 2]).unwrap();
        assert_eq!(net.layer_count(), 2);
        assert_eq!((net.input_size(), net.output_size()), (3, 2));

        let first = &net.layers()[0];
        assert_eq!((first.weights().width(), first.weights().height()), (3, 4));
        assert_eq!((first.bias().width(), first.bias().height()), (1, 4));
        let second = &net.layers()[1];
        assert_eq!((second.weights().width(), second.weights().height()), (4, 2));
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(matches!(Network::new(&[3]), Err(NetworkError::TooFewLayers(1))));
        assert!(matches!(Network::new(&[2, 0, 1]), Err(NetworkError::ZeroLayerSize(1))));
    }

    #[test]
    fn from_layers_checks_chaining() {
        let err = Network::from_layers(vec![Layer::new(2, 3), Layer::new(2, 1)]).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::LayerMismatch { index: 1, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn all_ones_feedforward() {
        let net = Network::new(&[2, 1]).unwrap();
        let out = net.feedforward(&Matrix::from_column(&[1.0, 1.0]));
        assert_eq!((out.width(), out.height()), (1, 1));
        assert!((out.get(0, 0) - sigmoid(3.0)).abs() < 1e-12);
        assert!((out.get(0, 0) - 0.9526).abs() < 1e-4);
    }

    #[test]
    fn feedforward_leaves_input_untouched() {
        let net = Network::new(&[2, 2, 1]).unwrap();
        let input = Matrix::from_column(&[0.5, -0.5]);
        let before = input.clone();
        net.feedforward(&input);
        assert_eq!(input, before);
    }

    #[test]
    #[should_panic(expected = "Left Width Must Equal Right Height")]
    fn feedforward_with_wrong_input_height_is_fatal() {
        Network::new(&[2, 1]).unwrap().feedforward(&Matrix::from_column(&[1.0]));
    }

    #[test]
    fn randomize_with_seed_is_reproducible_and_in_range() {
        let mut a = Network::new(&[3, 5, 2]).unwrap();
        let mut b = a.clone();
        a.randomize_with(&mut StdRng::seed_from_u64(7));
        b.randomize_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);

        for layer in a.layers() {
            for &cell in layer.weights().data().iter().chain(layer.bias().data()) {
                assert!((-10.0..10.0).contains(&cell));
            }
        }
        assert_ne!(a, Network::new(&[3, 5, 2]).unwrap());
    }

    #[test]
    fn randomize_keeps_shapes() {
        let mut net = Network::new(&[2, 3, 1]).unwrap();
        net.randomize();
        assert_eq!(net.layers()[0].weights().width(), 2);
        assert_eq!(net.layers()[1].bias().height(), 1);
    }

    #[test]
    fn gradient_shapes_match_layers() {
        let mut net = Network::new(&[4, 3, 5, 2]).unwrap();
        net.randomize_with(&mut StdRng::seed_from_u64(1));
        let grads = net.backprop(
            &Matrix::from_column(&[0.1, 0.2, 0.3, 0.4]),
            &Matrix::from_column(&[1.0, 0.0]),
        );

        assert_eq!(grads.len(), net.layer_count());
        for (layer, (w, b)) in net.layers().iter().zip(grads.iter()) {
            assert_eq!((w.width(), w.height()), (layer.weights().width(), layer.weights().height()));
            assert_eq!((b.width(), b.height()), (layer.bias().width(), layer.bias().height()));
        }
    }

    #[test]
    fn single_layer_gradient_by_hand() {
        let layer = Layer::with_parameters(
            Matrix::from_column(&[0.5]),
            Matrix::from_column(&[0.0]),
        )
        .unwrap();
        let net = Network::from_layers(vec![layer]).unwrap();
        let grads = net.backprop(&Matrix::from_column(&[1.0]), &Matrix::from_column(&[0.0]));

        let a = sigmoid(0.5);
        let delta = a * sigmoid_derivative(0.5);
        assert!((grads.biases[0].get(0, 0) - delta).abs() < 1e-12);
        assert!((grads.weights[0].get(0, 0) - delta).abs() < 1e-12);
    }

    #[test]
    fn train_moves_parameters_against_the_gradient() {
        let mut net = Network::new(&[2, 2, 1]).unwrap();
        let input = Matrix::from_column(&[1.0, 0.0]);
        let expected = Matrix::from_column(&[0.0]);
        let grads = net.backprop(&input, &expected);
        let before = net.clone();

        net.train(&input, &expected, 0.5);

        for ((old, new), (w, b)) in before.layers().iter().zip(net.layers()).zip(grads.iter()) {
            for i in 0..w.data().len() {
                let stepped = old.weights().data()[i] - 0.5 * w.data()[i];
                assert!((new.weights().data()[i] - stepped).abs() < 1e-12);
            }
            for i in 0..b.data().len() {
                let stepped = old.bias().data()[i] - 0.5 * b.data()[i];
                assert!((new.bias().data()[i] - stepped).abs() < 1e-12);
            }
        }
    }

    #[test]
    #[should_panic(expected = "gradient bundle has 1 layers, network has 2")]
    fn apply_gradients_rejects_short_bundle() {
        let mut net = Network::new(&[1, 1, 1]).unwrap();
        let grads = Gradients {
            weights: vec![Matrix::new(1, 1)],
            biases: vec![Matrix::new(1, 1)],
        };
        net.apply_gradients(grads, &Sgd::new(0.1));
    }

    #[test]
    fn display_prints_every_layer() {
        let text = Network::new(&[2, 1]).unwrap().to_string();
        assert_eq!(
            text,
            format!(
                "Layer 1 Weights\n1.0000\t1.0000\t\n{SEPARATOR}\nLayer 1 Bias\n1.0000\t\n{SEPARATOR}\n"
            )
        );
    }
}
