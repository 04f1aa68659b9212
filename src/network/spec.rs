use serde::{Deserialize, Serialize};

use crate::network::error::NetworkError;

fn default_epochs() -> usize {
    1
}

fn default_randomize() -> bool {
    true
}

/// Serializable description of a network architecture and its training run.
///
/// Only the shape and hyperparameters live here; trained weights are never
/// written out.
///
/// Fields:
/// - `layer_sizes`   — input width followed by each layer's output count
/// - `learning_rate` — gradient-descent step size
/// - `epochs`        — passes over the dataset made by the driver
/// - `randomize`     — re-draw parameters after construction (default `true`)
/// - `seed`          — seed for the re-draw; thread-local randomness if absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub layer_sizes: Vec<usize>,
    pub learning_rate: f64,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_randomize")]
    pub randomize: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    /// Two-input, one-output configuration used by the demo driver.
    pub fn xor() -> NetworkSpec {
        NetworkSpec {
            name: Some("xor".to_string()),
            layer_sizes: vec![2, 3, 1],
            learning_rate: 0.5,
            epochs: 10_000,
            randomize: true,
            seed: Some(7),
        }
    }

    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.layer_sizes.len() < 2 {
            return Err(NetworkError::TooFewLayers(self.layer_sizes.len()));
        }
        if let Some(position) = self.layer_sizes.iter().position(|&size| size == 0) {
            return Err(NetworkError::ZeroLayerSize(position));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetworkError::LearningRate(self.learning_rate));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), NetworkError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a spec from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
