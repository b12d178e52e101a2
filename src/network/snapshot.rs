use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::loss::TaskKind;

/// Owned copy of the engine's parameters for renderers. Editing a snapshot
/// never reaches back into the network it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub layer_sizes: Vec<usize>,
    /// `weights[l][i][j]`: input neuron `i` of layer `l` to output neuron `j`.
    pub weights: Vec<Vec<Vec<f64>>>,
    pub biases: Vec<Vec<f64>>,
    pub activation: ActivationFunction,
    pub task: TaskKind,
}

impl ParameterSnapshot {
    pub fn parameter_count(&self) -> usize {
        let w: usize = self.weights.iter().map(|m| m.iter().map(Vec::len).sum::<usize>()).sum();
        let b: usize = self.biases.iter().map(Vec::len).sum();
        w + b
    }
}
