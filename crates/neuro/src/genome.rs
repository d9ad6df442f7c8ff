use crate::error::{NeuroError, Result};
use crate::topology::LayerSizes;
use serde::{Deserialize, Serialize};

/// Serializable snapshot of a [`crate::Network`].
///
/// `weights[layer][in][out]` and `biases[layer][0][out]`: biases stay
/// singleton-row matrices so the nesting matches what the persistence layer
/// stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub layer_sizes: Vec<usize>,
    pub weights: Vec<Vec<Vec<f32>>>,
    pub biases: Vec<Vec<Vec<f32>>>,
}

impl Genome {
    /// Checks that every tensor has the shape `layer_sizes` dictates.
    pub fn validate(&self) -> Result<LayerSizes> {
        let sizes = LayerSizes::new(self.layer_sizes.clone())?;
        let layers = sizes.num_layers();
        if self.weights.len() != layers || self.biases.len() != layers {
            return Err(NeuroError::MalformedGenome(format!(
                "{} weight and {} bias tensors for {layers} layers",
                self.weights.len(),
                self.biases.len()
            )));
        }
        for (layer, (fan_in, fan_out)) in sizes.pairs().enumerate() {
            let w = &self.weights[layer];
            if w.len() != fan_in || w.iter().any(|row| row.len() != fan_out) {
                return Err(NeuroError::MalformedGenome(format!(
                    "weights of layer {layer} are not {fan_in}x{fan_out}"
                )));
            }
            let b = &self.biases[layer];
            if b.len() != 1 || b[0].len() != fan_out {
                return Err(NeuroError::MalformedGenome(format!(
                    "biases of layer {layer} are not 1x{fan_out}"
                )));
            }
        }
        Ok(sizes)
    }

    /// Fails with `TopologyMismatch` unless the genome has exactly `expected` widths.
    pub fn check_topology(&self, expected: &LayerSizes) -> Result<()> {
        if self.layer_sizes == expected.as_slice() {
            Ok(())
        } else {
            Err(NeuroError::TopologyMismatch {
                expected: expected.as_slice().to_vec(),
                got: self.layer_sizes.clone(),
            })
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a genome.
    pub fn from_json(json: &str) -> Result<Self> {
        let genome: Self = serde_json::from_str(json)?;
        genome.validate()?;
        Ok(genome)
    }
}
