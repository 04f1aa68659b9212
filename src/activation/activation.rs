use std::f64::consts::E;

/// Logistic function `1 / (1 + e^-z)`.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + E.powf(-z))
}

/// `σ(z) * (1 - σ(z))`, evaluated at the pre-activation `z`.
pub fn sigmoid_derivative(z: f64) -> f64 {
    let fz = sigmoid(z);
    fz * (1.0 - fz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_of_zero_is_half() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid_derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_bounded_and_increasing() {
        let mut prev = 0.0;
        for i in -50..=50 {
            let y = sigmoid(i as f64 * 0.2);
            assert!((0.0..=1.0).contains(&y));
            assert!(y >= prev, "sigmoid decreased at {i}");
            prev = y;
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for z in [-3.0, -0.5, 0.7, 2.0] {
            let numeric = (sigmoid(z + h) - sigmoid(z - h)) / (2.0 * h);
            assert!((numeric - sigmoid_derivative(z)).abs() < 1e-8, "z = {z}");
        }
    }

    #[test]
    fn sigmoid_of_three() {
        assert!((sigmoid(3.0) - 0.952_574).abs() < 1e-6);
    }
}
