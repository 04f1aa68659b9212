pub mod mse;

pub use mse::{cost, cost_derivative, total_cost};
