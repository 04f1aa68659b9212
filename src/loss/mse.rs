use crate::math::matrix::Matrix;

/// Squared error of one output cell: `0.5 * (a - y)²`.
pub fn cost(activation: f64, expected: f64) -> f64 {
    0.5 * (activation - expected) * (activation - expected)
}

/// `∂cost/∂a = a - y`
pub fn cost_derivative(activation: f64, expected: f64) -> f64 {
    activation - expected
}

/// Sum of [`cost`] over every cell of two same-shape matrices.
#[track_caller]
pub fn total_cost(output: &Matrix, expected: &Matrix) -> f64 {
    crate::matrix_elementwise!(output, expected, cost)
        .data()
        .iter()
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_and_derivative() {
        assert_eq!(cost(0.75, 0.25), 0.125);
        assert_eq!(cost_derivative(0.75, 0.25), 0.5);
        assert_eq!(cost(1.0, 1.0), 0.0);
    }

    #[test]
    fn total_cost_sums_cells() {
        let output = Matrix::from_column(&[1.0, 0.0]);
        let expected = Matrix::from_column(&[0.0, 0.0]);
        assert_eq!(total_cost(&output, &expected), 0.5);
    }

    #[test]
    #[should_panic(expected = "matrix_elementwise(output, expected, cost)")]
    fn total_cost_requires_matching_shapes() {
        total_cost(&Matrix::from_column(&[1.0]), &Matrix::from_row(&[1.0, 2.0]));
    }
}
