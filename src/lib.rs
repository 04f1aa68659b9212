pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use math::error::MatrixError;
pub use activation::activation::{sigmoid, sigmoid_derivative};
pub use loss::mse::{cost, cost_derivative};
pub use math::scalar::{add, multiply, random_uniform};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::{Gradients, NetworkError, NetworkSpec};
pub use optim::sgd::Sgd;
pub use train::trainer::train_epoch;
