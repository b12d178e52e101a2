use serde::{Serialize, Deserialize};

use crate::layers::Layer;
use crate::math::Matrix;

/// Everything one forward pass computed, owned by the caller.
///
/// `activations[0]` is the raw `(x, y)` input and `activations[L-1]` the
/// single output; `pre_activations[l]` is the `z` vector feeding
/// `activations[l + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardTrace {
    pub activations: Vec<Vec<f64>>,
    pub pre_activations: Vec<Vec<f64>>,
    pub yhat: f64,
}

/// Batch-averaged gradients of the loss, shaped exactly like the network's
/// parameters, plus the batch-averaged loss they were computed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSet {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Vec<f64>>,
    pub loss: f64,
}

impl GradientSet {
    pub(crate) fn zeros_like(layers: &[Layer]) -> GradientSet {
        GradientSet {
            weights: layers.iter()
                .map(|layer| Matrix::zeros(layer.weights.rows, layer.weights.cols))
                .collect(),
            biases: layers.iter().map(|layer| vec![0.0; layer.size()]).collect(),
            loss: 0.0,
        }
    }

    /// `gW[l][i][j] += a[i]·delta[j]`, `gB[l][j] += delta[j]`
    pub(crate) fn accumulate(&mut self, layer: usize, input: &[f64], delta: &[f64]) {
        for (row, &a) in self.weights[layer].data.iter_mut().zip(input) {
            for (g, &d) in row.iter_mut().zip(delta) {
                *g += a * d;
            }
        }
        for (g, &d) in self.biases[layer].iter_mut().zip(delta) {
            *g += d;
        }
    }

    pub(crate) fn scale(&mut self, factor: f64) {
        for matrix in self.weights.iter_mut() {
            *matrix = matrix.map(|g| g * factor);
        }
        for bias in self.biases.iter_mut() {
            bias.iter_mut().for_each(|g| *g *= factor);
        }
        self.loss *= factor;
    }
}
