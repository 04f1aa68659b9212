use crate::math::matrix::Matrix;

/// Per-layer cost gradients from one backpropagation pass.
///
/// `weights[i]` and `biases[i]` are shaped like layer `i`'s weights and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Gradients {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// `(weights_grad, bias_grad)` pairs in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (&Matrix, &Matrix)> {
        self.weights.iter().zip(self.biases.iter())
    }
}
