use thiserror::Error;

/// Faults in how a network is described, as opposed to matrix contract violations.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("a network needs at least 2 layer sizes, got {0}")]
    TooFewLayers(usize),

    #[error("layer size at position {0} is zero")]
    ZeroLayerSize(usize),

    #[error("layer {index} takes {found} inputs but the previous layer produces {expected}")]
    LayerMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("bias must be shaped {expected:?}, got {found:?}")]
    BiasShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("dataset needs (inputs, outputs) = {expected:?}, network has {found:?}")]
    DatasetShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("learning rate must be finite and positive, got {0}")]
    LearningRate(f64),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
