pub mod error;
pub mod gradients;
pub mod network;
pub mod spec;

pub use error::NetworkError;
pub use gradients::Gradients;
pub use network::Network;
pub use spec::NetworkSpec;
