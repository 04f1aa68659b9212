use crate::{
    activation::activation::sigmoid,
    math::{matrix::Matrix, scalar::add},
    matrix_elementwise, matrix_product,
    network::error::NetworkError,
};

/// One affine stage `z = W·a + b` followed by sigmoid.
///
/// `weights` is `inputs` wide and `outputs` tall; `bias` is a single column of
/// `outputs` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub(crate) weights: Matrix,
    pub(crate) bias: Matrix,
}

impl Layer {
    /// Layer with every weight and bias set to `1`.
    pub fn new(inputs: usize, outputs: usize) -> Layer {
        let mut weights = Matrix::new(inputs, outputs);
        let mut bias = Matrix::new(1, outputs);
        weights.fill(1.0);
        bias.fill(1.0);
        Layer { weights, bias }
    }

    /// Layer from explicit parameters; `bias` must be a column as tall as `weights`.
    pub fn with_parameters(weights: Matrix, bias: Matrix) -> Result<Layer, NetworkError> {
        if bias.width() != 1 || bias.height() != weights.height() {
            return Err(NetworkError::BiasShape {
                expected: (1, weights.height()),
                found: (bias.width(), bias.height()),
            });
        }
        Ok(Layer { weights, bias })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    pub fn inputs(&self) -> usize {
        self.weights.width()
    }

    pub fn outputs(&self) -> usize {
        self.weights.height()
    }

    /// Pre-activation `W·a + b` for an input column `a`.
    pub fn weighted_input(&self, activation: &Matrix) -> Matrix {
        let weighted = matrix_product!(self.weights, activation);
        matrix_elementwise!(weighted, self.bias, add)
    }

    /// `σ(W·a + b)`
    pub fn feed_from(&self, activation: &Matrix) -> Matrix {
        self.weighted_input(activation).transform(sigmoid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_is_all_ones() {
        let layer = Layer::new(3, 2);
        assert_eq!((layer.weights().width(), layer.weights().height()), (3, 2));
        assert_eq!((layer.bias().width(), layer.bias().height()), (1, 2));
        assert!(layer.weights().data().iter().all(|&w| w == 1.0));
        assert!(layer.bias().data().iter().all(|&b| b == 1.0));
    }

    #[test]
    fn weighted_input_is_affine() {
        let layer = Layer::with_parameters(
            Matrix::from_rows(vec![vec![1.0, -1.0], vec![0.5, 2.0]]),
            Matrix::from_column(&[0.25, -1.0]),
        )
        .unwrap();
        let z = layer.weighted_input(&Matrix::from_column(&[2.0, 1.0]));
        assert_eq!(z.data(), &[1.25, 2.0]);
    }

    #[test]
    fn with_parameters_rejects_row_bias() {
        let err = Layer::with_parameters(Matrix::new(2, 3), Matrix::from_row(&[0.0; 3])).unwrap_err();
        assert!(matches!(err, NetworkError::BiasShape { expected: (1, 3), found: (3, 1) }));
    }

    #[test]
    #[should_panic(expected = "matrix_product(self.weights, activation)")]
    fn input_of_wrong_height_is_fatal() {
        Layer::new(2, 1).feed_from(&Matrix::from_column(&[1.0, 1.0, 1.0]));
    }
}
