pub mod error;
pub mod matrix;
pub mod scalar;

pub use error::MatrixError;
pub use matrix::Matrix;
