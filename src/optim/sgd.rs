use crate::error::{PlaygroundError, Result};
use crate::layers::Layer;
use crate::math::Matrix;

/// Plain full-batch gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    /// Rejects non-finite or non-positive rates. Large rates are accepted and
    /// may diverge; that is the caller's call.
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(PlaygroundError::InvalidLearningRate(learning_rate));
        }
        Ok(Sgd { learning_rate })
    }

    /// Computes one SGD update of a layer given its pre-computed gradients.
    pub fn step(&self, layer: &Layer, weights_grad: &Matrix, biases_grad: &[f64]) -> Layer {
        layer.descended(weights_grad, biases_grad, self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_rates() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(Sgd::new(lr), Err(PlaygroundError::InvalidLearningRate(_))));
        }
        assert!(Sgd::new(25.0).is_ok());
    }
}
