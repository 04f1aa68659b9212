use crate::{
    layers::dense::Layer,
    math::{
        matrix::Matrix,
        scalar::{add, multiply},
    },
    matrix_elementwise,
};

/// Plain gradient descent: `p ← p + (-learning_rate) · ∇p`.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Replaces the layer's weights and bias with their stepped versions.
    pub fn step(&self, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix) {
        layer.weights = self.descend(&layer.weights, weights_grad);
        layer.bias = self.descend(&layer.bias, biases_grad);
    }

    fn descend(&self, parameter: &Matrix, gradient: &Matrix) -> Matrix {
        let mut rate = Matrix::new(gradient.width(), gradient.height());
        rate.fill(-self.learning_rate);
        let scaled = matrix_elementwise!(gradient, rate, multiply);
        matrix_elementwise!(parameter, scaled, add)
    }
}
