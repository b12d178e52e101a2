use serde::{Serialize, Deserialize};

use crate::math::{Matrix, gaussian_sample};

/// Scale applied to the N(0, 1) draws that seed every bias.
pub const BIAS_INIT_SCALE: f64 = 0.05;

/// One fully-connected layer: `weights` is `(input_size, size)`, `biases` has
/// one entry per output neuron. A layer holds parameters only; activations
/// live in the `ForwardTrace` of the call that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl Layer {
    /// Draws fresh parameters: weights `N(0,1)/sqrt(fan_in)` so pre-activation
    /// variance stays roughly constant with depth, biases `N(0,1)·0.05`.
    pub fn new(size: usize, input_size: usize) -> Layer {
        let weights = Matrix::gaussian(input_size, size, 1.0 / (input_size as f64).sqrt());
        let biases = (0..size).map(|_| gaussian_sample() * BIAS_INIT_SCALE).collect();

        Layer {
            weights,
            biases,
        }
    }

    pub fn size(&self) -> usize {
        self.biases.len()
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// `z[j] = b[j] + Σ_i input[i]·W[i][j]`
    pub fn pre_activation(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.biases.clone();
        for (row, &a) in self.weights.data.iter().zip(input) {
            for (zj, &w) in z.iter_mut().zip(row) {
                *zj += a * w;
            }
        }
        z
    }

    /// Pulls an output-side error back through the weights:
    /// `out[i] = Σ_j delta[j]·W[i][j]`. The caller multiplies by the previous
    /// layer's activation derivative.
    pub fn back_propagate(&self, delta: &[f64]) -> Vec<f64> {
        self.weights.data.iter()
            .map(|row| row.iter().zip(delta).map(|(w, d)| w * d).sum())
            .collect()
    }

    /// Returns the layer after one descent step; `self` is left untouched so
    /// the caller can swap every layer in at once.
    pub fn descended(&self, weights_grad: &Matrix, biases_grad: &[f64], lr: f64) -> Layer {
        Layer {
            weights: &self.weights - &weights_grad.map(|x| x * lr),
            biases: self.biases.iter().zip(biases_grad).map(|(b, g)| b - lr * g).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_layer() -> Layer {
        Layer {
            weights: Matrix::from_data(vec![vec![1.0, -1.0], vec![0.5, 0.5]]),
            biases: vec![0.1, -0.1],
        }
    }

    #[test]
    fn new_layer_shapes() {
        let layer = Layer::new(4, 3);
        assert_eq!(layer.weights.shape(), (3, 4));
        assert_eq!(layer.size(), 4);
        assert_eq!(layer.input_size(), 3);
    }

    #[test]
    fn pre_activation_is_affine() {
        let z = fixed_layer().pre_activation(&[1.0, 2.0]);
        assert!((z[0] - 2.1).abs() < 1e-12);
        assert!((z[1] - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn back_propagate_uses_transposed_weights() {
        let back = fixed_layer().back_propagate(&[1.0, 2.0]);
        assert_eq!(back, vec![-1.0, 1.5]);
    }

    #[test]
    fn descended_moves_against_gradient() {
        let layer = fixed_layer();
        let grad = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let next = layer.descended(&grad, &[1.0, -1.0], 0.5);
        assert_eq!(next.weights.data, vec![vec![0.5, -1.0], vec![0.5, 0.0]]);
        assert!((next.biases[0] - (-0.4)).abs() < 1e-12);
        assert!((next.biases[1] - 0.4).abs() < 1e-12);
        assert_eq!(layer, fixed_layer());
    }
}
